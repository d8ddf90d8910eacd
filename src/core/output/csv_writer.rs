//! CSV output writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::core::models::NormalizedRow;
use crate::error::Result;

/// Column names, in record order.
pub const HEADER: [&str; 4] = ["Sender", "Timestamp", "Type", "Content"];

/// Writes rows to a CSV file.
///
/// # Format
/// - Delimiter: `,`
/// - Columns: `Sender`, `Timestamp`, `Type`, `Content`
/// - Quoting: only where needed (delimiter, quote, or line break in a field)
/// - Line terminator: `\r\n`
/// - Encoding: UTF-8
///
/// The file is flushed and closed before returning.
pub fn write_csv(rows: &[NormalizedRow], output_path: &Path) -> Result<()> {
    let file = File::create(output_path)?;
    write_rows(rows, file)
}

/// Renders rows as a CSV string.
///
/// # Example
///
/// ```rust
/// use hangpack::core::NormalizedRow;
/// use hangpack::core::output::to_csv;
///
/// let rows = vec![NormalizedRow::new("Alice", "2024-01-15 10:30:00", "txt", "Hi, Bob")];
/// let csv = to_csv(&rows)?;
/// assert_eq!(csv, "Sender,Timestamp,Type,Content\r\nAlice,2024-01-15 10:30:00,txt,\"Hi, Bob\"\r\n");
/// # Ok::<(), hangpack::HangpackError>(())
/// ```
pub fn to_csv(rows: &[NormalizedRow]) -> Result<String> {
    let mut buffer = Vec::new();
    write_rows(rows, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

fn write_rows<W: Write>(rows: &[NormalizedRow], sink: W) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b',')
        .terminator(csv::Terminator::CRLF)
        .from_writer(sink);

    writer.write_record(HEADER)?;
    for row in rows {
        writer.write_record(row.as_record())?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn rows() -> Vec<NormalizedRow> {
        vec![
            NormalizedRow::new("Alice", "2024-01-15 10:30:00", "txt", "Hello"),
            NormalizedRow::new("Bob", "2024-01-15 10:31:00", "txt+img", "Hi (sent photo: a.jpg)"),
        ]
    }

    #[test]
    fn test_write_csv_basic() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");

        write_csv(&rows(), &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("Sender,Timestamp,Type,Content\r\n"));
        assert!(content.contains("Alice,2024-01-15 10:30:00,txt,Hello"));
        assert!(content.contains("Bob,2024-01-15 10:31:00,txt+img,Hi (sent photo: a.jpg)"));
    }

    #[test]
    fn test_quoting() {
        let rows = vec![NormalizedRow::new(
            "A, B",
            "2024-01-15 10:30:00",
            "rename",
            "Renamed from \"x\" to \"y\"",
        )];
        let csv = to_csv(&rows).unwrap();
        assert!(csv.contains("\"A, B\""));
        assert!(csv.contains("\"Renamed from \"\"x\"\" to \"\"y\"\"\""));
    }

    #[test]
    fn test_roundtrip_through_reader() {
        let csv = to_csv(&rows()).unwrap();
        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.iter().collect::<Vec<_>>(), HEADER);
        assert_eq!(reader.records().count(), 2);
    }

    #[test]
    fn test_empty_rows_still_has_header() {
        assert_eq!(to_csv(&[]).unwrap(), "Sender,Timestamp,Type,Content\r\n");
    }
}
