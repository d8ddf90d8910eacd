//! Typed representation of a Hangouts archive.
//!
//! The loader in [`crate::parsing`] converts raw JSON into these types once;
//! every later stage only reads them. Payloads are a sum type per event kind
//! so the renderer can match exhaustively instead of probing for keys.

use serde::{Deserialize, Serialize};

/// The whole exported dataset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Archive {
    pub conversations: Vec<Conversation>,
}

impl Archive {
    /// Total number of events across all conversations.
    pub fn event_count(&self) -> usize {
        self.conversations.iter().map(|c| c.events.len()).sum()
    }
}

/// One chat thread with its participants and event log.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversation {
    pub id: String,
    pub kind: ConversationKind,
    /// Only ever set for group conversations, and not always then.
    pub declared_name: Option<String>,
    pub participants: Vec<Participant>,
    pub events: Vec<Event>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConversationKind {
    OneToOne,
    Group,
}

/// A conversation member as listed in `participant_data`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Opaque numeric `gaia_id`.
    pub id: String,
    /// `fallback_name` from the export, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub name: Option<String>,
}

impl Participant {
    pub fn new(id: impl Into<String>, name: Option<String>) -> Self {
        Self {
            id: id.into(),
            name,
        }
    }

    /// Display name, or the raw id when the export has none.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

/// One timestamped occurrence within a conversation.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub sender_id: String,
    /// Microseconds since the Unix epoch.
    pub timestamp_micros: i64,
    pub payload: EventPayload,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EventPayload {
    Chat(ChatMessage),
    Rename { old_name: String, new_name: String },
    Hangout(HangoutEvent),
    AddMembers(Vec<String>),
    RemoveMembers(Vec<String>),
    /// Event kind outside the known set; carries the raw `event_type`.
    Unknown(String),
}

/// Body of a `REGULAR_CHAT_MESSAGE`.
///
/// `None` means the key was absent from `message_content`, which is not the
/// same as an empty list: a present-but-empty segment list still counts as text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatMessage {
    pub segments: Option<Vec<Segment>>,
    pub attachments: Option<Vec<Attachment>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    Text { text: String, formatting: Formatting },
    Link { text: String, formatting: Formatting },
    LineBreak,
    /// Any other segment type; renders as nothing.
    Other,
}

/// Inline formatting flags of a text run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Formatting {
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italics: bool,
    #[serde(default)]
    pub strikethrough: bool,
    #[serde(default)]
    pub underline: bool,
}

impl Formatting {
    pub fn is_plain(&self) -> bool {
        !(self.bold || self.italics || self.strikethrough || self.underline)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Attachment {
    Photo { url: String },
    Place(Place),
    /// Embed whose type list matched neither photo nor place.
    Unknown(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Place {
    pub name: String,
    /// Postal address `name`, falling back to `street_address`.
    pub address: String,
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaType {
    AudioVideo,
    AudioOnly,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HangoutEvent {
    Start { media: Option<MediaType> },
    End { duration_secs: u64 },
    /// Call sub-kinds other than start/end; renders as nothing.
    Other,
}

/// The four-column output record produced for every event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedRow {
    pub sender: String,
    pub timestamp: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub content: String,
}

impl NormalizedRow {
    pub fn new(
        sender: impl Into<String>,
        timestamp: impl Into<String>,
        kind: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            sender: sender.into(),
            timestamp: timestamp.into(),
            kind: kind.into(),
            content: content.into(),
        }
    }

    /// Column values in header order: Sender, Timestamp, Type, Content.
    pub fn as_record(&self) -> [&str; 4] {
        [&self.sender, &self.timestamp, &self.kind, &self.content]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_participant_label() {
        assert_eq!(Participant::new("1", Some("Alice".into())).label(), "Alice");
        assert_eq!(Participant::new("1", None).label(), "1");
    }

    #[test]
    fn test_formatting_plain() {
        assert!(Formatting::default().is_plain());
        let f = Formatting {
            underline: true,
            ..Formatting::default()
        };
        assert!(!f.is_plain());
    }

    #[test]
    fn test_archive_event_count() {
        let event = Event {
            sender_id: "1".into(),
            timestamp_micros: 0,
            payload: EventPayload::Unknown("X".into()),
        };
        let conv = Conversation {
            id: "c".into(),
            kind: ConversationKind::OneToOne,
            declared_name: None,
            participants: vec![],
            events: vec![event.clone(), event],
        };
        let archive = Archive {
            conversations: vec![conv.clone(), conv],
        };
        assert_eq!(archive.event_count(), 4);
    }

    #[test]
    fn test_row_serialization_uses_type_key() {
        let row = NormalizedRow::new("Alice", "2024-01-01 00:00:00", "txt", "hi");
        let json = serde_json::to_string(&row).unwrap();
        assert!(json.contains(r#""type":"txt""#));
        assert_eq!(row.as_record(), ["Alice", "2024-01-01 00:00:00", "txt", "hi"]);
    }
}
