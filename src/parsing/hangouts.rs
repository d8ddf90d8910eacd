//! Hangouts Takeout JSON loader.
//!
//! The raw structs mirror the parts of `Hangouts.json` that hangpack reads;
//! every other key in the export is ignored. After deserialization the raw
//! tree is converted into [`crate::core::models`] in one pass, so a payload
//! that is missing for its declared event kind fails the whole load.
//!
//! ```json
//! {
//!   "conversations": [
//!     {
//!       "conversation": {
//!         "conversation_id": {"id": "Ugx..."},
//!         "conversation": {
//!           "type": "GROUP",
//!           "name": "Weekend plans",
//!           "participant_data": [
//!             {"id": {"gaia_id": "1001"}, "fallback_name": "Alice"}
//!           ]
//!         }
//!       },
//!       "events": [
//!         {
//!           "sender_id": {"gaia_id": "1001"},
//!           "timestamp": "1500000000000000",
//!           "event_type": "REGULAR_CHAT_MESSAGE",
//!           "chat_message": {"message_content": {"segment": [{"type": "TEXT", "text": "hi"}]}}
//!         }
//!       ]
//!     }
//!   ]
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::core::models::{
    Archive, Attachment, ChatMessage, Conversation, ConversationKind, Event, EventPayload,
    Formatting, HangoutEvent, MediaType, Participant, Place, Segment,
};
use crate::error::{HangpackError, Result};

// ============================================================================
// Raw structures
// ============================================================================

/// Top level of `Hangouts.json`.
#[derive(Debug, Deserialize)]
pub struct RawArchive {
    pub conversations: Vec<RawConversationEntry>,
}

#[derive(Debug, Deserialize)]
pub struct RawConversationEntry {
    pub conversation: RawConversationWrapper,
    pub events: Vec<RawEvent>,
}

#[derive(Debug, Deserialize)]
pub struct RawConversationWrapper {
    pub conversation_id: Option<RawConversationId>,
    pub conversation: RawConversationState,
}

#[derive(Debug, Deserialize)]
pub struct RawConversationId {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct RawConversationState {
    pub id: Option<RawConversationId>,
    #[serde(rename = "type")]
    pub kind: String,
    pub name: Option<String>,
    pub participant_data: Vec<RawParticipant>,
}

#[derive(Debug, Deserialize)]
pub struct RawParticipant {
    pub id: RawParticipantId,
    pub fallback_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawParticipantId {
    pub gaia_id: String,
}

#[derive(Debug, Deserialize)]
pub struct RawEvent {
    pub sender_id: RawParticipantId,
    pub timestamp: RawInteger,
    pub event_type: String,
    pub chat_message: Option<RawChatMessage>,
    pub conversation_rename: Option<RawRename>,
    pub hangout_event: Option<RawHangoutEvent>,
    pub membership_change: Option<RawMembershipChange>,
}

/// Integers that the export writes either as JSON numbers or as strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawInteger {
    Number(i64),
    Text(String),
}

impl RawInteger {
    pub fn to_i64(&self) -> Result<i64> {
        match self {
            RawInteger::Number(n) => Ok(*n),
            RawInteger::Text(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|_| HangpackError::invalid_timestamp(s.clone())),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RawChatMessage {
    pub message_content: RawMessageContent,
}

#[derive(Debug, Deserialize)]
pub struct RawMessageContent {
    pub segment: Option<Vec<RawSegment>>,
    pub attachment: Option<Vec<RawAttachment>>,
}

#[derive(Debug, Deserialize)]
pub struct RawSegment {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: Option<String>,
    pub formatting: Option<Formatting>,
}

#[derive(Debug, Deserialize)]
pub struct RawAttachment {
    pub embed_item: RawEmbedItem,
}

#[derive(Debug, Deserialize)]
pub struct RawEmbedItem {
    #[serde(rename = "type")]
    pub types: EmbedTypes,
    pub plus_photo: Option<RawPlusPhoto>,
    pub place_v2: Option<RawPlace>,
}

/// `embed_item.type` is a list in current exports and a bare string in some older ones.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum EmbedTypes {
    Many(Vec<String>),
    One(String),
}

impl EmbedTypes {
    /// List membership for the array form, substring match for the string form.
    pub fn contains(&self, tag: &str) -> bool {
        match self {
            EmbedTypes::Many(list) => list.iter().any(|t| t == tag),
            EmbedTypes::One(s) => s.contains(tag),
        }
    }

    fn into_vec(self) -> Vec<String> {
        match self {
            EmbedTypes::Many(list) => list,
            EmbedTypes::One(s) => vec![s],
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RawPlusPhoto {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct RawPlace {
    pub url: String,
    pub name: String,
    pub address: RawPlaceAddress,
}

#[derive(Debug, Deserialize)]
pub struct RawPlaceAddress {
    pub postal_address_v2: RawPostalAddress,
}

#[derive(Debug, Deserialize)]
pub struct RawPostalAddress {
    pub name: Option<String>,
    pub street_address: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawRename {
    pub old_name: String,
    pub new_name: String,
}

#[derive(Debug, Deserialize)]
pub struct RawHangoutEvent {
    pub event_type: String,
    pub media_type: Option<String>,
    pub hangout_duration_secs: Option<RawInteger>,
}

#[derive(Debug, Deserialize)]
pub struct RawMembershipChange {
    pub participant_id: Vec<RawParticipantId>,
}

// ============================================================================
// Loading
// ============================================================================

/// Reads and converts a Takeout archive from disk.
///
/// The whole file is held in memory; Takeout archives are a single JSON document.
pub fn parse_archive(path: &Path) -> Result<Archive> {
    let content = fs::read_to_string(path)?;
    let raw: RawArchive = serde_json::from_str(&content)
        .map_err(|e| HangpackError::parse(e, Some(path.to_path_buf())))?;
    convert_archive(raw)
}

/// Converts an archive already held as a string.
///
/// # Example
///
/// ```rust
/// use hangpack::parsing::parse_archive_str;
///
/// let json = r#"{"conversations": [{
///     "conversation": {"conversation": {"type": "STICKY_ONE_TO_ONE", "participant_data": []}},
///     "events": []
/// }]}"#;
/// let archive = parse_archive_str(json)?;
/// assert_eq!(archive.conversations.len(), 1);
/// # Ok::<(), hangpack::HangpackError>(())
/// ```
pub fn parse_archive_str(content: &str) -> Result<Archive> {
    let raw: RawArchive = serde_json::from_str(content)?;
    convert_archive(raw)
}

pub fn convert_archive(raw: RawArchive) -> Result<Archive> {
    let conversations = raw
        .conversations
        .into_iter()
        .enumerate()
        .map(|(index, entry)| convert_conversation(index, entry))
        .collect::<Result<Vec<_>>>()?;

    debug!(conversations = conversations.len(), "archive converted");
    Ok(Archive { conversations })
}

fn convert_conversation(index: usize, entry: RawConversationEntry) -> Result<Conversation> {
    let RawConversationWrapper {
        conversation_id,
        conversation: state,
    } = entry.conversation;

    let id = state
        .id
        .or(conversation_id)
        .map(|c| c.id)
        .unwrap_or_else(|| format!("conversation-{}", index + 1));

    let kind = if state.kind == "GROUP" {
        ConversationKind::Group
    } else {
        ConversationKind::OneToOne
    };

    let participants = state
        .participant_data
        .into_iter()
        .map(|p| Participant::new(p.id.gaia_id, p.fallback_name))
        .collect();

    let events = entry
        .events
        .into_iter()
        .map(|e| convert_event(&id, e))
        .collect::<Result<Vec<_>>>()?;

    Ok(Conversation {
        id,
        kind,
        declared_name: state.name,
        participants,
        events,
    })
}

/// Converts one raw event, requiring the payload its `event_type` implies.
pub fn convert_event(conversation_id: &str, raw: RawEvent) -> Result<Event> {
    let timestamp_micros = raw.timestamp.to_i64()?;
    let context = || {
        format!(
            "{} event at {} in conversation {}",
            raw.event_type, timestamp_micros, conversation_id
        )
    };

    let payload = match raw.event_type.as_str() {
        "REGULAR_CHAT_MESSAGE" => {
            let message = raw
                .chat_message
                .ok_or_else(|| HangpackError::missing_field("chat_message", context()))?;
            EventPayload::Chat(convert_chat_message(message.message_content, &context)?)
        }
        "RENAME_CONVERSATION" => {
            let rename = raw
                .conversation_rename
                .ok_or_else(|| HangpackError::missing_field("conversation_rename", context()))?;
            EventPayload::Rename {
                old_name: rename.old_name,
                new_name: rename.new_name,
            }
        }
        "HANGOUT_EVENT" => {
            let hangout = raw
                .hangout_event
                .ok_or_else(|| HangpackError::missing_field("hangout_event", context()))?;
            EventPayload::Hangout(convert_hangout(hangout, &context)?)
        }
        "ADD_USER" | "REMOVE_USER" => {
            let change = raw
                .membership_change
                .ok_or_else(|| HangpackError::missing_field("membership_change", context()))?;
            let ids = change.participant_id.into_iter().map(|p| p.gaia_id).collect();
            if raw.event_type == "ADD_USER" {
                EventPayload::AddMembers(ids)
            } else {
                EventPayload::RemoveMembers(ids)
            }
        }
        other => EventPayload::Unknown(other.to_string()),
    };

    Ok(Event {
        sender_id: raw.sender_id.gaia_id,
        timestamp_micros,
        payload,
    })
}

fn convert_chat_message(
    content: RawMessageContent,
    context: &dyn Fn() -> String,
) -> Result<ChatMessage> {
    let segments = content
        .segment
        .map(|list| {
            list.into_iter()
                .map(|s| convert_segment(s, context))
                .collect::<Result<Vec<_>>>()
        })
        .transpose()?;

    let attachments = content
        .attachment
        .map(|list| {
            list.into_iter()
                .map(|a| convert_attachment(a.embed_item, context))
                .collect::<Result<Vec<_>>>()
        })
        .transpose()?;

    Ok(ChatMessage {
        segments,
        attachments,
    })
}

fn convert_segment(raw: RawSegment, context: &dyn Fn() -> String) -> Result<Segment> {
    let formatting = raw.formatting.unwrap_or_default();
    let segment = match raw.kind.as_str() {
        "TEXT" => Segment::Text {
            text: raw
                .text
                .ok_or_else(|| HangpackError::missing_field("text", context()))?,
            formatting,
        },
        "LINK" => Segment::Link {
            text: raw
                .text
                .ok_or_else(|| HangpackError::missing_field("text", context()))?,
            formatting,
        },
        "LINE_BREAK" => Segment::LineBreak,
        _ => Segment::Other,
    };
    Ok(segment)
}

fn convert_attachment(item: RawEmbedItem, context: &dyn Fn() -> String) -> Result<Attachment> {
    if item.types.contains("PLUS_PHOTO") {
        let photo = item
            .plus_photo
            .ok_or_else(|| HangpackError::missing_field("plus_photo", context()))?;
        return Ok(Attachment::Photo { url: photo.url });
    }

    if item.types.contains("PLACE_V2") {
        let place = item
            .place_v2
            .ok_or_else(|| HangpackError::missing_field("place_v2", context()))?;
        let postal = place.address.postal_address_v2;
        let address = postal
            .name
            .or(postal.street_address)
            .ok_or_else(|| HangpackError::missing_field("street_address", context()))?;
        return Ok(Attachment::Place(Place {
            name: place.name,
            address,
            url: place.url,
        }));
    }

    Ok(Attachment::Unknown(item.types.into_vec()))
}

fn convert_hangout(raw: RawHangoutEvent, context: &dyn Fn() -> String) -> Result<HangoutEvent> {
    let event = match raw.event_type.as_str() {
        "START_HANGOUT" => HangoutEvent::Start {
            media: raw.media_type.as_deref().map(|m| match m {
                "AUDIO_VIDEO" => MediaType::AudioVideo,
                "AUDIO_ONLY" => MediaType::AudioOnly,
                _ => MediaType::Other,
            }),
        },
        "END_HANGOUT" => {
            let raw_duration = raw
                .hangout_duration_secs
                .ok_or_else(|| HangpackError::missing_field("hangout_duration_secs", context()))?;
            let secs = raw_duration.to_i64().map_err(|_| {
                HangpackError::invalid_format(format!("non-integer call duration in {}", context()))
            })?;
            let duration_secs = u64::try_from(secs).map_err(|_| {
                HangpackError::invalid_format(format!("negative call duration in {}", context()))
            })?;
            HangoutEvent::End { duration_secs }
        }
        _ => HangoutEvent::Other,
    };
    Ok(event)
}
