//! # Hangpack
//!
//! Converts a Google Hangouts Takeout archive (`Hangouts.json`) into one CSV
//! table per conversation, for spreadsheet review or archival.
//!
//! ## Overview
//!
//! Every event of every conversation becomes one four-column row:
//!
//! | Column | Content |
//! |--------|---------|
//! | `Sender` | participant display name, raw id, or `Unknown` |
//! | `Timestamp` | local time, `YYYY-MM-DD HH:MM:SS` |
//! | `Type` | `txt`, `img`, `loc`, `unk` joined by `+`, or `rename`, `call`, `add member(s)`, `remove member(s)`, `unknown` |
//! | `Content` | message text with inline formatting markers, attachment descriptions, or a system-event sentence |
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use hangpack::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let archive = parse_archive(Path::new("Hangouts.json"))?;
//!
//!     for conversation in &archive.conversations {
//!         let rows = process_conversation(conversation, SortOrder::Ascending)?;
//!         println!("{}: {} rows", conversation_name(conversation), rows.len());
//!     }
//!
//!     // Or write every conversation to its own CSV file
//!     export_archive(&archive, &ExportConfig::new(), None)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`parsing`] - archive loader ([`parse_archive`](parsing::parse_archive))
//! - [`core`] - the transformation pipeline
//!   - [`core::participants`] - [`ParticipantTable`](core::ParticipantTable)
//!   - [`core::classify`] - [`EventType`](core::EventType), [`ContentKinds`](core::ContentKinds)
//!   - [`core::render`] - [`render_content`](core::render_content)
//!   - [`core::normalize`] - [`NormalizedRow`](core::NormalizedRow)
//!   - [`core::processor`] - [`process_conversation`](core::process_conversation)
//!   - [`core::output`] - CSV writer
//! - [`export`] - one CSV per conversation
//! - [`config`] - [`ExportConfig`](config::ExportConfig), [`SortOrder`](config::SortOrder)
//! - [`progress`] - progress callbacks
//! - [`error`] - [`HangpackError`], [`Result`]

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
#[cfg(feature = "csv-output")]
pub mod export;
pub mod parsing;
pub mod progress;

// Re-export the main types at the crate root for convenience
pub use error::{HangpackError, Result};

/// Convenient re-exports for common usage.
///
/// ```rust
/// use hangpack::prelude::*;
/// ```
pub mod prelude {
    // Error types
    pub use crate::error::{HangpackError, Result};

    // Configuration
    pub use crate::config::{ExportConfig, SortOrder};

    // Loading
    pub use crate::parsing::{parse_archive, parse_archive_str};

    // Model and pipeline
    pub use crate::core::{
        Archive, Conversation, Event, EventPayload, EventType, NormalizedRow, ParticipantTable,
        classify, conversation_name, normalize, process_conversation, render_content,
    };

    // Output
    #[cfg(feature = "csv-output")]
    pub use crate::core::output::{to_csv, write_csv};
    #[cfg(feature = "csv-output")]
    pub use crate::export::{ExportSummary, export_archive};

    // Progress
    pub use crate::progress::{Progress, ProgressCallback};
}
