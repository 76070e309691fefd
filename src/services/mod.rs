//! Services layer for the feedback sentiment service
//!
//! Composes the classifier and the store into the user-facing operations,
//! plus the trend aggregation and CSV export they rely on.

pub mod export;
pub mod feedback;
pub mod trend;

pub use export::{write_csv, CsvExport, EXPORT_FILE_NAME};
pub use feedback::FeedbackService;
pub use trend::aggregate_trend;
