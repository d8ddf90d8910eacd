//! Core transformation pipeline.
//!
//! Stages, leaf first:
//! - [`participants`] - id to display-name lookup with an `"Unknown"` sentinel
//! - [`naming`] - conversation titles and output file names
//! - [`classify`] - the `Type` column
//! - [`render`] - the `Content` column
//! - [`normalize`] - one [`NormalizedRow`] per event
//! - [`processor`] - sorting and per-conversation processing
//! - [`output`] - CSV writer
//!
//! # Quick Start
//!
//! ```rust
//! use hangpack::config::SortOrder;
//! use hangpack::core::{conversation_name, process_conversation};
//! use hangpack::parsing::parse_archive_str;
//!
//! let archive = parse_archive_str(r#"{"conversations": [{
//!     "conversation": {"conversation": {
//!         "type": "STICKY_ONE_TO_ONE",
//!         "participant_data": [{"id": {"gaia_id": "1"}, "fallback_name": "Alice"}]
//!     }},
//!     "events": [{
//!         "sender_id": {"gaia_id": "1"},
//!         "timestamp": "1705314600000000",
//!         "event_type": "RENAME_CONVERSATION",
//!         "conversation_rename": {"old_name": "", "new_name": "Plans"}
//!     }]
//! }]}"#)?;
//!
//! let conversation = &archive.conversations[0];
//! assert_eq!(conversation_name(conversation), "Alice");
//!
//! let rows = process_conversation(conversation, SortOrder::Ascending)?;
//! assert_eq!(rows[0].kind, "rename");
//! assert_eq!(rows[0].content, "Renamed from \"\" to \"Plans\"");
//! # Ok::<(), hangpack::HangpackError>(())
//! ```

pub mod classify;
pub mod models;
pub mod naming;
pub mod normalize;
pub mod output;
pub mod participants;
pub mod processor;
pub mod render;

// Re-export main types for convenience
pub use classify::{AttachmentKind, ContentKinds, EventType, MessageKind, classify};
pub use models::{Archive, Conversation, Event, EventPayload, NormalizedRow, Participant};
pub use naming::{FileNamer, conversation_name, sanitize_filename};
pub use normalize::{format_timestamp, format_timestamp_in, normalize, normalize_in};
pub use participants::{ParticipantTable, Resolved, UNKNOWN_PARTICIPANT};
pub use processor::{ProcessingStats, process_conversation, process_conversation_in, sort_events};
pub use render::render_content;

// Conditionally re-export output writers
#[cfg(feature = "csv-output")]
pub use output::{to_csv, write_csv};
