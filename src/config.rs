//! Export configuration.
//!
//! Library callers build an [`ExportConfig`] directly; the CLI maps its
//! `-a`/`-z` flags onto [`SortOrder`] and leaves the output directory at its
//! default.
//!
//! # Example
//!
//! ```rust
//! use hangpack::config::{ExportConfig, SortOrder};
//!
//! let config = ExportConfig::new()
//!     .with_order(SortOrder::Descending)
//!     .with_output_dir("exports");
//!
//! assert_eq!(config.order, SortOrder::Descending);
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Direction of the timestamp sort applied to each conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Oldest event first (default, `-a`)
    #[default]
    Ascending,

    /// Newest event first (`-z`)
    Descending,
}

impl SortOrder {
    pub fn is_descending(&self) -> bool {
        matches!(self, SortOrder::Descending)
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortOrder::Ascending => write!(f, "oldest first"),
            SortOrder::Descending => write!(f, "newest first"),
        }
    }
}

/// Settings for [`export_archive`](crate::export::export_archive).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Event order within each file (default: ascending)
    #[serde(default)]
    pub order: SortOrder,

    /// Directory the CSV files are written to (default: current directory)
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            order: SortOrder::default(),
            output_dir: default_output_dir(),
        }
    }
}

impl ExportConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the event order.
    #[must_use]
    pub fn with_order(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }

    /// Sets the output directory.
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }
}
