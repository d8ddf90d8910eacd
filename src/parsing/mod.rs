//! Archive loading.
//!
//! Deserializes a Google Takeout `Hangouts.json` document and converts it into
//! the typed model in [`crate::core::models`].

pub mod hangouts;

pub use hangouts::{RawArchive, convert_archive, parse_archive, parse_archive_str};
