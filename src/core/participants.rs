//! Participant resolution.
//!
//! Maps opaque `gaia_id`s to display labels for one conversation. Ids that are
//! not in the conversation's participant list resolve to the `"Unknown"`
//! sentinel instead of failing; exports routinely reference people who have
//! since left or whose profile was deleted.

use std::collections::HashMap;

use tracing::trace;

use super::models::{Conversation, Participant};

/// Label used for any id that is not in the participant table.
pub const UNKNOWN_PARTICIPANT: &str = "Unknown";

/// Result of a participant lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved<'a> {
    Known(&'a Participant),
    Unknown,
}

impl<'a> Resolved<'a> {
    /// Display name, raw id when the participant has no name, or the sentinel.
    pub fn label(&self) -> &'a str {
        match *self {
            Resolved::Known(participant) => participant.label(),
            Resolved::Unknown => UNKNOWN_PARTICIPANT,
        }
    }
}

/// Read-only id lookup built once per conversation.
#[derive(Debug, Clone, Default)]
pub struct ParticipantTable {
    by_id: HashMap<String, Participant>,
}

impl ParticipantTable {
    /// Builds the table from a conversation's participant list.
    ///
    /// If an id appears twice the first entry wins.
    pub fn build(conversation: &Conversation) -> Self {
        Self::from_participants(&conversation.participants)
    }

    pub fn from_participants(participants: &[Participant]) -> Self {
        let mut by_id = HashMap::with_capacity(participants.len());
        for participant in participants {
            by_id
                .entry(participant.id.clone())
                .or_insert_with(|| participant.clone());
        }
        Self { by_id }
    }

    /// Exact-match lookup; never fails.
    pub fn lookup(&self, id: &str) -> Resolved<'_> {
        match self.by_id.get(id) {
            Some(participant) => Resolved::Known(participant),
            None => {
                trace!(id, "unresolved participant id");
                Resolved::Unknown
            }
        }
    }

    /// Shorthand for `lookup(id).label()`.
    pub fn label(&self, id: &str) -> &str {
        self.lookup(id).label()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
