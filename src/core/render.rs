//! Content rendering: the `Content` column.
//!
//! Text segments are reassembled with Markdown-style markers, attachments are
//! described inline, and system events get a short English sentence.

use std::borrow::Cow;

use super::classify::{ContentKinds, EventType};
use super::models::{
    Attachment, ChatMessage, Event, EventPayload, Formatting, HangoutEvent, MediaType, Place,
    Segment,
};
use super::participants::ParticipantTable;

/// An inline formatting flag and the marker that wraps text carrying it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatFlag {
    Bold,
    Italics,
    Strikethrough,
    Underline,
}

impl FormatFlag {
    pub fn is_set(self, formatting: &Formatting) -> bool {
        match self {
            FormatFlag::Bold => formatting.bold,
            FormatFlag::Italics => formatting.italics,
            FormatFlag::Strikethrough => formatting.strikethrough,
            FormatFlag::Underline => formatting.underline,
        }
    }

    pub fn marker(self) -> &'static str {
        match self {
            FormatFlag::Bold => "**",
            FormatFlag::Italics => "*",
            FormatFlag::Strikethrough => "~",
            FormatFlag::Underline => "_",
        }
    }
}

/// Order in which wrappers are applied, innermost first.
///
/// Bold ends up innermost and underline outermost: `x` with every flag set
/// becomes `_~***x***~_`, not `_*~**x**~*_`. This is the nesting found in CSVs
/// written by earlier Hangouts-to-CSV converters, kept so old and new exports
/// of the same archive compare equal.
pub const FORMAT_ORDER: [FormatFlag; 4] = [
    FormatFlag::Bold,
    FormatFlag::Italics,
    FormatFlag::Strikethrough,
    FormatFlag::Underline,
];

/// Written for a `LINE_BREAK` segment: a literal backslash followed by `n`,
/// so each event stays on one CSV line.
pub const LINE_BREAK: &str = "\\n";

/// Wraps `text` in the markers for each flag set in `formatting`.
pub fn format_text(text: &str, formatting: &Formatting) -> String {
    if formatting.is_plain() {
        return text.to_string();
    }
    let mut out = text.to_string();
    for flag in FORMAT_ORDER {
        if flag.is_set(formatting) {
            let marker = flag.marker();
            out = format!("{marker}{out}{marker}");
        }
    }
    out
}

/// Reassembles a segment list into one string with no separators.
pub fn flatten_segments(segments: &[Segment]) -> String {
    let mut out = String::new();
    for segment in segments {
        match segment {
            Segment::Text { text, formatting } | Segment::Link { text, formatting } => {
                out.push_str(&format_text(text, formatting));
            }
            Segment::LineBreak => out.push_str(LINE_BREAK),
            Segment::Other => {}
        }
    }
    out
}

/// File name of a photo: the last path segment of its URL, percent-decoded twice.
///
/// Takeout double-encodes these names (`%2520` for a space). Bytes that do not
/// decode to UTF-8 are replaced with U+FFFD.
pub fn photo_file_name(url: &str) -> String {
    let last = url.rsplit('/').next().unwrap_or(url);
    let once = percent_decode(last);
    percent_decode(&once).into_owned()
}

fn percent_decode(s: &str) -> Cow<'_, str> {
    match urlencoding::decode_binary(s.as_bytes()) {
        Cow::Borrowed(_) => Cow::Borrowed(s),
        Cow::Owned(bytes) => Cow::Owned(String::from_utf8_lossy(&bytes).into_owned()),
    }
}

/// `<name> - <address> (<url>)`
pub fn describe_place(place: &Place) -> String {
    format!("{} - {} ({})", place.name, place.address, place.url)
}

/// Sentence for a call start or end.
pub fn describe_hangout(event: &HangoutEvent) -> Option<String> {
    match event {
        HangoutEvent::Start { media } => Some(
            match media {
                Some(MediaType::AudioVideo) => "Started video call",
                Some(MediaType::AudioOnly) => "Started audio call",
                _ => "Started call",
            }
            .to_string(),
        ),
        HangoutEvent::End { duration_secs } => {
            let mins = duration_secs / 60;
            let secs = duration_secs % 60;
            Some(if mins > 0 {
                format!("Call ended in {} mins {} secs", mins, secs)
            } else {
                format!("Call ended in {} secs", secs)
            })
        }
        HangoutEvent::Other => None,
    }
}

fn render_chat(message: &ChatMessage, kinds: ContentKinds) -> String {
    let mut parts: Vec<String> = Vec::new();
    let has_text = kinds.contains(ContentKinds::TEXT);

    if has_text {
        parts.push(flatten_segments(message.segments.as_deref().unwrap_or_default()));
    }

    if kinds.intersects(ContentKinds::IMAGE | ContentKinds::LOCATION) {
        for attachment in message.attachments.iter().flatten() {
            match attachment {
                Attachment::Photo { url } => {
                    let name = photo_file_name(url);
                    if has_text {
                        parts.push(format!(" (sent photo: {name})"));
                    } else if !parts.is_empty() {
                        parts.push(format!(", {name}"));
                    } else {
                        parts.push(name);
                    }
                }
                Attachment::Place(place) => {
                    let described = describe_place(place);
                    if parts.is_empty() {
                        parts.push(described);
                    } else {
                        parts.push(format!(", {described}"));
                    }
                }
                Attachment::Unknown(_) => {}
            }
        }
    }

    parts.concat()
}

fn render_members(ids: &[String], participants: &ParticipantTable) -> String {
    ids.iter()
        .map(|id| participants.label(id))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Renders the `Content` column for `event`, classified as `event_type`.
///
/// Events that match no branch render as the empty string.
pub fn render_content(
    event: &Event,
    event_type: &EventType,
    participants: &ParticipantTable,
) -> String {
    match (&event.payload, event_type) {
        (EventPayload::Chat(message), EventType::Message(kind)) => {
            render_chat(message, kind.kinds())
        }
        (EventPayload::Rename { old_name, new_name }, EventType::Rename) => {
            format!("Renamed from \"{}\" to \"{}\"", old_name, new_name)
        }
        (EventPayload::Hangout(hangout), EventType::Call) => {
            describe_hangout(hangout).unwrap_or_default()
        }
        (EventPayload::AddMembers(ids) | EventPayload::RemoveMembers(ids), ty)
            if ty.is_membership() =>
        {
            render_members(ids, participants)
        }
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::classify::classify;
    use crate::core::models::Participant;

    fn bold() -> Formatting {
        Formatting {
            bold: true,
            ..Formatting::default()
        }
    }

    fn all_flags() -> Formatting {
        Formatting {
            bold: true,
            italics: true,
            strikethrough: true,
            underline: true,
        }
    }

    fn text(s: &str) -> Segment {
        Segment::Text {
            text: s.into(),
            formatting: Formatting::default(),
        }
    }

    fn event(payload: EventPayload) -> Event {
        Event {
            sender_id: "1".into(),
            timestamp_micros: 0,
            payload,
        }
    }

    fn render(payload: EventPayload) -> String {
        let e = event(payload);
        let table = ParticipantTable::from_participants(&[
            Participant::new("1", Some("Alice".into())),
            Participant::new("2", None),
        ]);
        render_content(&e, &classify(&e), &table)
    }

    fn chat(segments: Option<Vec<Segment>>, attachments: Option<Vec<Attachment>>) -> EventPayload {
        EventPayload::Chat(ChatMessage {
            segments,
            attachments,
        })
    }

    fn photo(url: &str) -> Attachment {
        Attachment::Photo { url: url.into() }
    }

    fn place() -> Attachment {
        Attachment::Place(Place {
            name: "Cafe".into(),
            address: "1 Main St".into(),
            url: "https://maps/x".into(),
        })
    }

    #[test]
    fn test_format_single_flags() {
        assert_eq!(format_text("x", &bold()), "**x**");
        let italics = Formatting {
            italics: true,
            ..Formatting::default()
        };
        assert_eq!(format_text("x", &italics), "*x*");
        assert_eq!(format_text("x", &Formatting::default()), "x");
    }

    #[test]
    fn test_format_all_flags_nesting() {
        assert_eq!(format_text("x", &all_flags()), "_~***x***~_");
    }

    #[test]
    fn test_flatten_segments() {
        let segments = vec![
            text("Hello "),
            Segment::Text {
                text: "world".into(),
                formatting: bold(),
            },
            Segment::LineBreak,
            Segment::Link {
                text: "https://example.com".into(),
                formatting: Formatting::default(),
            },
            Segment::Other,
        ];
        assert_eq!(
            flatten_segments(&segments),
            "Hello **world**\\nhttps://example.com"
        );
    }

    #[test]
    fn test_line_break_is_literal_backslash_n() {
        let out = flatten_segments(&[text("a"), Segment::LineBreak, text("b")]);
        assert_eq!(out, "a\\nb");
        assert!(!out.contains('\n'));
    }

    #[test]
    fn test_photo_file_name_double_decoded() {
        assert_eq!(
            photo_file_name("https://lh3.googleusercontent.com/abc/name%2520with%2520space.jpg"),
            "name with space.jpg"
        );
        assert_eq!(photo_file_name("plain.jpg"), "plain.jpg");
    }

    #[test]
    fn test_text_with_photo() {
        let out = render(chat(Some(vec![text("look")]), Some(vec![photo("https://x/a%2520b.jpg")])));
        assert_eq!(out, "look (sent photo: a b.jpg)");
    }

    #[test]
    fn test_photos_without_text() {
        let out = render(chat(None, Some(vec![photo("https://x/a.jpg"), photo("https://x/b.jpg")])));
        assert_eq!(out, "a.jpg, b.jpg");
    }

    #[test]
    fn test_place_after_text_and_alone() {
        assert_eq!(
            render(chat(None, Some(vec![place()]))),
            "Cafe - 1 Main St (https://maps/x)"
        );
        assert_eq!(
            render(chat(Some(vec![text("here")]), Some(vec![place()]))),
            "here, Cafe - 1 Main St (https://maps/x)"
        );
    }

    #[test]
    fn test_unknown_attachment_renders_nothing() {
        let out = render(chat(
            None,
            Some(vec![Attachment::Unknown(vec!["THING".into()]), photo("https://x/a.jpg")]),
        ));
        assert_eq!(out, "a.jpg");
        assert_eq!(render(chat(Some(vec![text("hi")]), Some(vec![Attachment::Unknown(vec![])]))), "hi");
    }

    #[test]
    fn test_rename() {
        let out = render(EventPayload::Rename {
            old_name: "Old".into(),
            new_name: "New".into(),
        });
        assert_eq!(out, "Renamed from \"Old\" to \"New\"");
    }

    #[test]
    fn test_call_start_variants() {
        let start = |media| render(EventPayload::Hangout(HangoutEvent::Start { media }));
        assert_eq!(start(Some(MediaType::AudioVideo)), "Started video call");
        assert_eq!(start(Some(MediaType::AudioOnly)), "Started audio call");
        assert_eq!(start(Some(MediaType::Other)), "Started call");
        assert_eq!(start(None), "Started call");
    }

    #[test]
    fn test_call_end_durations() {
        let end = |duration_secs| render(EventPayload::Hangout(HangoutEvent::End { duration_secs }));
        assert_eq!(end(125), "Call ended in 2 mins 5 secs");
        assert_eq!(end(45), "Call ended in 45 secs");
        assert_eq!(end(60), "Call ended in 1 mins 0 secs");
        assert_eq!(end(0), "Call ended in 0 secs");
        assert_eq!(render(EventPayload::Hangout(HangoutEvent::Other)), "");
    }

    #[test]
    fn test_membership_names() {
        let out = render(EventPayload::AddMembers(vec!["1".into(), "2".into(), "404".into()]));
        assert_eq!(out, "Alice, 2, Unknown");
        let out = render(EventPayload::RemoveMembers(vec!["1".into()]));
        assert_eq!(out, "Alice");
    }

    #[test]
    fn test_degenerate_events_render_empty() {
        assert_eq!(render(chat(None, None)), "");
        assert_eq!(render(EventPayload::Unknown("X".into())), "");
    }

    #[test]
    fn test_mismatched_type_renders_empty() {
        let e = event(EventPayload::Rename {
            old_name: "a".into(),
            new_name: "b".into(),
        });
        let table = ParticipantTable::default();
        assert_eq!(render_content(&e, &EventType::Call, &table), "");
    }
}
