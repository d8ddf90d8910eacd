//! Output writers.
//!
//! - [`write_csv`] / [`to_csv`] - one CSV table per conversation with the
//!   header `Sender,Timestamp,Type,Content` (requires the `csv-output` feature)
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(feature = "csv-output")]
//! # fn main() -> hangpack::Result<()> {
//! use std::path::Path;
//! use hangpack::core::NormalizedRow;
//! use hangpack::core::output::write_csv;
//!
//! let rows = vec![
//!     NormalizedRow::new("Alice", "2024-01-15 10:30:00", "txt", "Hello!"),
//!     NormalizedRow::new("Bob", "2024-01-15 10:31:00", "call", "Started video call"),
//! ];
//!
//! write_csv(&rows, Path::new("Alice-Bob.csv"))?;
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "csv-output"))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{HEADER, to_csv, write_csv};
