//! CSV export of stored feedback

use crate::error::{FeedbackError, Result};
use crate::types::{FeedbackRecord, StoredFeedback};
use csv::WriterBuilder;
use serde::Serialize;
use std::io::Write;

/// Suggested download name for exports
pub const EXPORT_FILE_NAME: &str = "feedback.csv";

/// Rendered CSV document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CsvExport {
    /// UTF-8 CSV including the header row
    pub content: String,
    /// Number of data rows (header excluded)
    pub rows: usize,
}

impl CsvExport {
    /// Render records into an in-memory CSV document
    pub fn from_records(records: &[StoredFeedback]) -> Result<Self> {
        let mut buffer = Vec::new();
        let rows = write_csv(records, &mut buffer)?;
        let content = String::from_utf8(buffer)
            .map_err(|e| FeedbackError::Other(format!("CSV output is not UTF-8: {}", e)))?;
        Ok(Self { content, rows })
    }

    /// True when there are no data rows
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }
}

/// Write a header row plus one row per record, in the given order
///
/// The store identifier is not exported. Returns the number of data rows.
pub fn write_csv<W: Write>(records: &[StoredFeedback], writer: W) -> Result<usize> {
    let mut csv_writer = WriterBuilder::new().has_headers(false).from_writer(writer);

    csv_writer.write_record(FeedbackRecord::FIELD_NAMES)?;
    for stored in records {
        let record = &stored.record;
        csv_writer.write_record([
            record.user_name.as_str(),
            record.feedback_text.as_str(),
            record.sentiment.as_str(),
            record.timestamp.as_str(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(records.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FeedbackId, Sentiment};

    fn stored(name: &str, text: &str, sentiment: Sentiment) -> StoredFeedback {
        StoredFeedback {
            id: FeedbackId::new(),
            record: FeedbackRecord {
                user_name: name.to_string(),
                feedback_text: text.to_string(),
                sentiment,
                timestamp: "2024-06-01 12:00:00".to_string(),
            },
        }
    }

    #[test]
    fn test_header_and_rows() {
        let export = CsvExport::from_records(&[
            stored("Alice", "I love this!", Sentiment::Positive),
            stored("Bob", "meh", Sentiment::Neutral),
        ])
        .unwrap();

        let lines: Vec<&str> = export.content.lines().collect();
        assert_eq!(lines[0], "user_name,feedback_text,sentiment,timestamp");
        assert_eq!(lines[1], "Alice,I love this!,Positive,2024-06-01 12:00:00");
        assert_eq!(lines.len(), 3);
        assert_eq!(export.rows, 2);
    }

    #[test]
    fn test_quoting() {
        let export = CsvExport::from_records(&[stored(
            "Doe, Jane",
            "She said \"wow\"\nthen left",
            Sentiment::Neutral,
        )])
        .unwrap();

        let mut reader = csv::Reader::from_reader(export.content.as_bytes());
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.iter().collect::<Vec<_>>(), FeedbackRecord::FIELD_NAMES);

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "Doe, Jane");
        assert_eq!(&rows[0][1], "She said \"wow\"\nthen left");
    }

    #[test]
    fn test_empty_export_has_header_only() {
        let export = CsvExport::from_records(&[]).unwrap();
        assert!(export.is_empty());
        assert_eq!(export.content, "user_name,feedback_text,sentiment,timestamp\n");
    }
}
