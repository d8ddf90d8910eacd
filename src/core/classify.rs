//! Event classification.
//!
//! Every event gets an [`EventType`] whose `Display` form is the `Type`
//! column of the output. Chat messages carry a [`MessageKind`] describing
//! their text and per-attachment kinds; the renderer branches on the
//! [`ContentKinds`] flag set derived from it.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use super::models::{Attachment, ChatMessage, Event, EventPayload};

/// Set of content kinds present in a chat message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ContentKinds(u8);

impl ContentKinds {
    pub const EMPTY: Self = Self(0);
    pub const TEXT: Self = Self(1);
    pub const IMAGE: Self = Self(1 << 1);
    pub const LOCATION: Self = Self(1 << 2);
    pub const UNKNOWN: Self = Self(1 << 3);

    /// `true` if every flag in `other` is set.
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// `true` if any flag in `other` is set.
    pub fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for ContentKinds {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for ContentKinds {
    fn bitor_assign(&mut self, rhs: Self) {
        self.insert(rhs);
    }
}

/// Kind of a single chat attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttachmentKind {
    Image,
    Location,
    Unknown,
}

impl AttachmentKind {
    pub fn of(attachment: &Attachment) -> Self {
        match attachment {
            Attachment::Photo { .. } => AttachmentKind::Image,
            Attachment::Place(_) => AttachmentKind::Location,
            Attachment::Unknown(_) => AttachmentKind::Unknown,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            AttachmentKind::Image => "img",
            AttachmentKind::Location => "loc",
            AttachmentKind::Unknown => "unk",
        }
    }

    fn flag(self) -> ContentKinds {
        match self {
            AttachmentKind::Image => ContentKinds::IMAGE,
            AttachmentKind::Location => ContentKinds::LOCATION,
            AttachmentKind::Unknown => ContentKinds::UNKNOWN,
        }
    }
}

/// Shape of a chat message: whether it has a segment list, and its attachments in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageKind {
    pub text: bool,
    pub attachments: Vec<AttachmentKind>,
}

impl MessageKind {
    pub fn of(message: &ChatMessage) -> Self {
        Self {
            text: message.segments.is_some(),
            attachments: message
                .attachments
                .iter()
                .flatten()
                .map(AttachmentKind::of)
                .collect(),
        }
    }

    pub fn kinds(&self) -> ContentKinds {
        let mut kinds = if self.text {
            ContentKinds::TEXT
        } else {
            ContentKinds::EMPTY
        };
        for attachment in &self.attachments {
            kinds |= attachment.flag();
        }
        kinds
    }
}

impl fmt::Display for MessageKind {
    /// `txt`, then one tag per attachment, joined by `+`.
    /// A message with neither renders as the empty string.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        if self.text {
            f.write_str("txt")?;
            first = false;
        }
        for attachment in &self.attachments {
            if !first {
                f.write_str("+")?;
            }
            f.write_str(attachment.tag())?;
            first = false;
        }
        Ok(())
    }
}

/// Classification of an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventType {
    Message(MessageKind),
    Rename,
    Call,
    AddMembers,
    RemoveMembers,
    Unknown,
}

impl EventType {
    /// Content flags; empty for everything but chat messages.
    pub fn kinds(&self) -> ContentKinds {
        match self {
            EventType::Message(kind) => kind.kinds(),
            _ => ContentKinds::EMPTY,
        }
    }

    /// `true` for membership changes in either direction.
    pub fn is_membership(&self) -> bool {
        matches!(self, EventType::AddMembers | EventType::RemoveMembers)
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventType::Message(kind) => kind.fmt(f),
            EventType::Rename => f.write_str("rename"),
            EventType::Call => f.write_str("call"),
            EventType::AddMembers => f.write_str("add member(s)"),
            EventType::RemoveMembers => f.write_str("remove member(s)"),
            EventType::Unknown => f.write_str("unknown"),
        }
    }
}

/// Classifies an event. Depends only on the event itself.
///
/// # Example
///
/// ```rust
/// use hangpack::core::models::{Attachment, ChatMessage, Event, EventPayload, Segment};
/// use hangpack::core::classify;
///
/// let event = Event {
///     sender_id: "1".into(),
///     timestamp_micros: 0,
///     payload: EventPayload::Chat(ChatMessage {
///         segments: Some(vec![Segment::LineBreak]),
///         attachments: Some(vec![Attachment::Photo { url: "https://x/a.jpg".into() }]),
///     }),
/// };
/// assert_eq!(classify(&event).to_string(), "txt+img");
/// ```
pub fn classify(event: &Event) -> EventType {
    match &event.payload {
        EventPayload::Chat(message) => EventType::Message(MessageKind::of(message)),
        EventPayload::Rename { .. } => EventType::Rename,
        EventPayload::Hangout(_) => EventType::Call,
        EventPayload::AddMembers(_) => EventType::AddMembers,
        EventPayload::RemoveMembers(_) => EventType::RemoveMembers,
        EventPayload::Unknown(_) => EventType::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{HangoutEvent, Place, Segment};

    fn event(payload: EventPayload) -> Event {
        Event {
            sender_id: "1".into(),
            timestamp_micros: 0,
            payload,
        }
    }

    fn chat(segments: Option<Vec<Segment>>, attachments: Option<Vec<Attachment>>) -> Event {
        event(EventPayload::Chat(ChatMessage {
            segments,
            attachments,
        }))
    }

    fn photo() -> Attachment {
        Attachment::Photo {
            url: "https://x/a.jpg".into(),
        }
    }

    fn place() -> Attachment {
        Attachment::Place(Place {
            name: "Cafe".into(),
            address: "1 Main St".into(),
            url: "https://maps/x".into(),
        })
    }

    #[test]
    fn test_system_event_tags() {
        let rename = event(EventPayload::Rename {
            old_name: "a".into(),
            new_name: "b".into(),
        });
        assert_eq!(classify(&rename).to_string(), "rename");
        assert_eq!(
            classify(&event(EventPayload::Hangout(HangoutEvent::Other))).to_string(),
            "call"
        );
        assert_eq!(
            classify(&event(EventPayload::AddMembers(vec![]))).to_string(),
            "add member(s)"
        );
        assert_eq!(
            classify(&event(EventPayload::RemoveMembers(vec![]))).to_string(),
            "remove member(s)"
        );
        assert_eq!(
            classify(&event(EventPayload::Unknown("X".into()))).to_string(),
            "unknown"
        );
    }

    #[test]
    fn test_text_only() {
        let e = chat(Some(vec![]), None);
        assert_eq!(classify(&e).to_string(), "txt");
        assert_eq!(classify(&e).kinds(), ContentKinds::TEXT);
    }

    #[test]
    fn test_text_and_photo() {
        let e = chat(Some(vec![Segment::LineBreak]), Some(vec![photo()]));
        let ty = classify(&e);
        assert_eq!(ty.to_string(), "txt+img");
        assert!(ty.kinds().contains(ContentKinds::TEXT | ContentKinds::IMAGE));
        assert!(!ty.kinds().intersects(ContentKinds::LOCATION));
    }

    #[test]
    fn test_attachment_order_preserved() {
        let e = chat(
            None,
            Some(vec![place(), photo(), Attachment::Unknown(vec!["X".into()]), photo()]),
        );
        assert_eq!(classify(&e).to_string(), "loc+img+unk+img");
    }

    #[test]
    fn test_degenerate_message_is_empty_tag() {
        let e = chat(None, None);
        let ty = classify(&e);
        assert_eq!(ty.to_string(), "");
        assert!(ty.kinds().is_empty());
    }

    #[test]
    fn test_classification_is_repeatable() {
        let e = chat(Some(vec![]), Some(vec![photo()]));
        let first = classify(&e);
        let _ = classify(&chat(None, Some(vec![place()])));
        assert_eq!(classify(&e), first);
    }

    #[test]
    fn test_membership_predicate() {
        assert!(EventType::AddMembers.is_membership());
        assert!(EventType::RemoveMembers.is_membership());
        assert!(!EventType::Rename.is_membership());
    }
}
