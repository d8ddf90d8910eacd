//! Unified error types for hangpack.
//!
//! Every failure the library can report is a variant of [`HangpackError`].
//! Recoverable conditions in the archive (unknown participant ids, event or
//! attachment kinds outside the known set) never reach this type: they are
//! resolved in place to the `"Unknown"` sentinel or the `unknown`/`unk` tags.
//!
//! Everything here is fatal for the run. The loader converts the whole archive
//! before anything is written, so a structural problem aborts the export
//! before the first output file is created.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for hangpack operations.
///
/// # Example
///
/// ```rust
/// use hangpack::error::Result;
/// use hangpack::core::NormalizedRow;
///
/// fn my_function() -> Result<Vec<NormalizedRow>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, HangpackError>;

/// The error type for all hangpack operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HangpackError {
    /// An I/O error occurred while reading the archive or writing a CSV file.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The archive is not valid JSON or does not match the expected schema.
    #[error("Failed to parse Hangouts archive{}: {source}", path.as_ref().map(|p| format!(" (file: {})", p.display())).unwrap_or_default())]
    Parse {
        /// The underlying JSON error (carries line and column)
        #[source]
        source: serde_json::Error,
        /// The archive path, if available
        path: Option<PathBuf>,
    },

    /// The archive parsed as JSON but its content is inconsistent.
    #[error("Invalid Hangouts archive: {message}")]
    InvalidFormat {
        /// Description of what's wrong
        message: String,
    },

    /// A payload field required by the event kind is absent.
    #[error("Missing field '{field}' in {context}")]
    MissingField {
        /// Name of the missing JSON key
        field: &'static str,
        /// Where the key was expected
        context: String,
    },

    /// An event timestamp is not an integer or is outside the representable range.
    #[error("Invalid timestamp '{value}': expected integer microseconds since the Unix epoch")]
    InvalidTimestamp {
        /// The offending raw value
        value: String,
    },

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl From<serde_json::Error> for HangpackError {
    fn from(err: serde_json::Error) -> Self {
        HangpackError::Parse {
            source: err,
            path: None,
        }
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl HangpackError {
    /// Creates a parse error tagged with the archive path.
    pub fn parse(source: serde_json::Error, path: Option<PathBuf>) -> Self {
        HangpackError::Parse { source, path }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(message: impl Into<String>) -> Self {
        HangpackError::InvalidFormat {
            message: message.into(),
        }
    }

    /// Creates a missing field error.
    pub fn missing_field(field: &'static str, context: impl Into<String>) -> Self {
        HangpackError::MissingField {
            field,
            context: context.into(),
        }
    }

    /// Creates an invalid timestamp error.
    pub fn invalid_timestamp(value: impl Into<String>) -> Self {
        HangpackError::InvalidTimestamp {
            value: value.into(),
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, HangpackError::Io(_))
    }

    /// Returns `true` if this is a JSON parse error.
    pub fn is_parse(&self) -> bool {
        matches!(self, HangpackError::Parse { .. })
    }

    /// Returns `true` if this is an invalid format or missing field error.
    pub fn is_invalid_format(&self) -> bool {
        matches!(
            self,
            HangpackError::InvalidFormat { .. } | HangpackError::MissingField { .. }
        )
    }

    /// Returns `true` if this is a timestamp error.
    pub fn is_invalid_timestamp(&self) -> bool {
        matches!(self, HangpackError::InvalidTimestamp { .. })
    }
}
