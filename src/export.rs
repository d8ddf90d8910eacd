//! Whole-archive export: one CSV file per conversation.
//!
//! Conversations are processed strictly one after another. Each file is
//! created, written, flushed and closed before the next conversation starts.
//!
//! # Example
//!
//! ```rust,no_run
//! # fn main() -> hangpack::Result<()> {
//! use std::path::Path;
//! use hangpack::config::{ExportConfig, SortOrder};
//! use hangpack::export::export_archive;
//! use hangpack::parsing::parse_archive;
//!
//! let archive = parse_archive(Path::new("Hangouts.json"))?;
//! let config = ExportConfig::new().with_order(SortOrder::Descending);
//! let summary = export_archive(&archive, &config, None)?;
//! println!("{} files written", summary.files.len());
//! # Ok(())
//! # }
//! ```

use std::fs;
use std::path::PathBuf;

use chrono::{Local, TimeZone};
use tracing::{debug, info};

use crate::config::ExportConfig;
use crate::core::models::Archive;
use crate::core::naming::{FileNamer, conversation_name};
use crate::core::output::write_csv;
use crate::core::processor::{ProcessingStats, process_conversation_in};
use crate::error::Result;
use crate::progress::{Progress, ProgressCallback};

/// Outcome of [`export_archive`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportSummary {
    pub stats: ProcessingStats,
    /// Written files, in archive order.
    pub files: Vec<PathBuf>,
}

/// Writes every conversation of `archive` to its own CSV file.
///
/// Timestamps are formatted in the local time zone.
pub fn export_archive(
    archive: &Archive,
    config: &ExportConfig,
    progress: Option<&ProgressCallback>,
) -> Result<ExportSummary> {
    export_archive_in(archive, config, &Local, progress)
}

/// Same as [`export_archive`], formatting timestamps in `tz`.
pub fn export_archive_in<Tz>(
    archive: &Archive,
    config: &ExportConfig,
    tz: &Tz,
    progress: Option<&ProgressCallback>,
) -> Result<ExportSummary>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    fs::create_dir_all(&config.output_dir)?;

    let total = archive.conversations.len();
    let mut namer = FileNamer::new();
    let mut summary = ExportSummary::default();

    for (index, conversation) in archive.conversations.iter().enumerate() {
        let name = conversation_name(conversation);
        let path = config
            .output_dir
            .join(namer.file_name(conversation, &name));

        debug!(conversation = %name, path = %path.display(), "writing conversation");
        let rows = process_conversation_in(conversation, config.order, tz)?;
        write_csv(&rows, &path)?;

        summary.stats.record(rows.len());
        if let Some(callback) = progress {
            callback(Progress::new(index + 1, total, name, rows.len()).with_path(&path));
        }
        summary.files.push(path);
    }

    info!(
        conversations = summary.stats.conversations,
        events = summary.stats.events,
        order = %config.order,
        "archive exported"
    );
    Ok(summary)
}
