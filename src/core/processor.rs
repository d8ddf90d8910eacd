//! Per-conversation pipeline: sort, then normalize every event.

use std::cmp::Reverse;

use chrono::{Local, TimeZone};
use tracing::debug;

use super::models::{Conversation, Event, NormalizedRow};
use super::normalize::normalize_in;
use super::participants::ParticipantTable;
use crate::config::SortOrder;
use crate::error::Result;

/// Events ordered by timestamp.
///
/// The sort is stable in both directions: events sharing a timestamp keep
/// their original relative order.
pub fn sort_events(events: &[Event], order: SortOrder) -> Vec<&Event> {
    let mut sorted: Vec<&Event> = events.iter().collect();
    if order.is_descending() {
        sorted.sort_by_key(|e| Reverse(e.timestamp_micros));
    } else {
        sorted.sort_by_key(|e| e.timestamp_micros);
    }
    sorted
}

/// Normalizes a whole conversation in the local time zone.
///
/// Produces exactly one row per event.
pub fn process_conversation(conversation: &Conversation, order: SortOrder) -> Result<Vec<NormalizedRow>> {
    process_conversation_in(conversation, order, &Local)
}

/// Normalizes a whole conversation, formatting timestamps in `tz`.
pub fn process_conversation_in<Tz>(
    conversation: &Conversation,
    order: SortOrder,
    tz: &Tz,
) -> Result<Vec<NormalizedRow>>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let participants = ParticipantTable::build(conversation);
    let rows = sort_events(&conversation.events, order)
        .into_iter()
        .map(|event| normalize_in(event, &participants, tz))
        .collect::<Result<Vec<_>>>()?;

    debug!(
        conversation = %conversation.id,
        participants = participants.len(),
        rows = rows.len(),
        "conversation processed"
    );
    Ok(rows)
}

/// Counters for a finished export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessingStats {
    pub conversations: usize,
    pub events: usize,
}

impl ProcessingStats {
    pub fn new(conversations: usize, events: usize) -> Self {
        Self {
            conversations,
            events,
        }
    }

    pub fn record(&mut self, rows: usize) {
        self.conversations += 1;
        self.events += rows;
    }

    /// Average events per conversation.
    pub fn average_events(&self) -> f64 {
        if self.conversations == 0 {
            return 0.0;
        }
        self.events as f64 / self.conversations as f64
    }
}
