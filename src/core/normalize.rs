//! Event normalization: one [`NormalizedRow`] per raw event.

use chrono::{DateTime, Local, TimeZone};

use super::classify::classify;
use super::models::{Event, NormalizedRow};
use super::participants::ParticipantTable;
use super::render::render_content;
use crate::error::{HangpackError, Result};

/// Layout of the `Timestamp` column.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const MICROS_PER_SECOND: i64 = 1_000_000;

/// Formats epoch microseconds as `YYYY-MM-DD HH:MM:SS` in `tz`.
///
/// Sub-second precision is floored away before conversion.
///
/// # Example
///
/// ```rust
/// use chrono::Utc;
/// use hangpack::core::format_timestamp_in;
///
/// let ts = format_timestamp_in(1_705_314_600_123_456, &Utc)?;
/// assert_eq!(ts, "2024-01-15 10:30:00");
/// # Ok::<(), hangpack::HangpackError>(())
/// ```
pub fn format_timestamp_in<Tz>(micros: i64, tz: &Tz) -> Result<String>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let secs = micros.div_euclid(MICROS_PER_SECOND);
    let utc = DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| HangpackError::invalid_timestamp(micros.to_string()))?;
    Ok(utc.with_timezone(tz).format(TIMESTAMP_FORMAT).to_string())
}

/// Formats epoch microseconds in the machine's local time zone.
pub fn format_timestamp(micros: i64) -> Result<String> {
    format_timestamp_in(micros, &Local)
}

/// Normalizes one event using the local time zone.
pub fn normalize(event: &Event, participants: &ParticipantTable) -> Result<NormalizedRow> {
    normalize_in(event, participants, &Local)
}

/// Normalizes one event, formatting its timestamp in `tz`.
pub fn normalize_in<Tz>(
    event: &Event,
    participants: &ParticipantTable,
    tz: &Tz,
) -> Result<NormalizedRow>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let event_type = classify(event);
    let content = render_content(event, &event_type, participants);

    Ok(NormalizedRow {
        sender: participants.label(&event.sender_id).to_string(),
        timestamp: format_timestamp_in(event.timestamp_micros, tz)?,
        kind: event_type.to_string(),
        content,
    })
}
