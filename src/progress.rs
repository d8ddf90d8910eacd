//! Progress reporting for archive exports.
//!
//! [`export_archive`](crate::export::export_archive) calls a
//! [`ProgressCallback`] once per written conversation. The counter is purely
//! observational; nothing in the pipeline reads it back.
//!
//! # Example
//!
//! ```rust
//! use hangpack::progress::{Progress, ProgressCallback};
//! use std::sync::Arc;
//!
//! let callback: ProgressCallback = Arc::new(|progress| {
//!     println!("{} ({}/{})", progress.conversation, progress.index, progress.total);
//! });
//!
//! callback(Progress::new(1, 3, "Alice, Bob", 42));
//! ```

use std::path::PathBuf;
use std::sync::Arc;

/// State after one conversation has been written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Progress {
    /// 1-based position of the conversation in the archive.
    pub index: usize,

    /// Number of conversations in the archive.
    pub total: usize,

    /// Conversation title.
    pub conversation: String,

    /// Rows written for this conversation.
    pub rows: usize,

    /// File the rows were written to, once known.
    pub path: Option<PathBuf>,
}

impl Progress {
    /// Creates a new progress instance.
    pub fn new(index: usize, total: usize, conversation: impl Into<String>, rows: usize) -> Self {
        Self {
            index,
            total,
            conversation: conversation.into(),
            rows,
            path: None,
        }
    }

    /// Attaches the output path.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Returns the progress as a percentage (0.0 - 100.0).
    ///
    /// # Example
    ///
    /// ```rust
    /// use hangpack::progress::Progress;
    ///
    /// assert_eq!(Progress::new(1, 4, "a", 0).percentage(), 25.0);
    /// assert_eq!(Progress::new(0, 0, "a", 0).percentage(), 100.0);
    /// ```
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            (self.index as f64 / self.total as f64) * 100.0
        }
    }
}

/// Callback type for receiving progress updates.
pub type ProgressCallback = Arc<dyn Fn(Progress) + Send + Sync>;
