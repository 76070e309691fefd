//! Feedback Sentiment - feedback collection with sentiment classification
//!
//! Accepts short text feedback, labels it Positive, Neutral or Negative from a
//! polarity score, persists it, and serves views over the stored feedback:
//! - Listing and case-insensitive keyword search
//! - Sentiment distribution (pie chart data)
//! - Daily submission trend (line chart data)
//! - CSV export and bulk delete
//!
//! # Architecture
//!
//! - **Types**: the feedback document and aggregate shapes
//! - **Sentiment**: polarity analyzer seam and the three-way classifier
//! - **Storage**: store trait and the libSQL backend
//! - **Services**: `FeedbackService`, trend aggregation, CSV export
//! - **API**: axum HTTP surface
//!
//! # Example
//!
//! ```ignore
//! use feedback_core::{FeedbackService, FeedbackSubmission, LibsqlStore, SentimentClassifier};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> feedback_core::Result<()> {
//!     let store = LibsqlStore::from_path("feedback.db", true).await?;
//!     let service = FeedbackService::new(Arc::new(store), SentimentClassifier::lexicon());
//!
//!     let stored = service
//!         .submit(FeedbackSubmission::new("Alice", "I love this!"))
//!         .await?;
//!     assert_eq!(stored.record.sentiment.as_str(), "Positive");
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod sentiment;
pub mod services;
pub mod storage;
pub mod types;

// Re-export commonly used types
pub use config::FeedbackConfig;
pub use error::{FeedbackError, Result};
pub use sentiment::{LexiconAnalyzer, PolarityAnalyzer, SentimentClassifier};
pub use services::{CsvExport, FeedbackService};
pub use storage::{
    libsql::{ConnectionMode, LibsqlStore},
    FeedbackStore,
};
pub use types::{
    DistributionSlice, FeedbackId, FeedbackRecord, FeedbackSubmission, Sentiment,
    SentimentDistribution, StoredFeedback, TrendPoint, TIMESTAMP_FORMAT,
};
