//! Feedback operations
//!
//! [`FeedbackService`] is built once at startup from an explicit store handle
//! and a classifier, and shared by every surface (HTTP API, CLI).

use crate::error::{FeedbackError, Result};
use crate::sentiment::SentimentClassifier;
use crate::services::export::CsvExport;
use crate::services::trend::aggregate_trend;
use crate::storage::FeedbackStore;
use crate::types::{
    FeedbackRecord, FeedbackSubmission, Sentiment, SentimentDistribution, StoredFeedback,
    TrendPoint, TIMESTAMP_FORMAT,
};
use chrono::{Local, NaiveDateTime};
use std::sync::Arc;
use tracing::{debug, info};

/// Message shown when a search is attempted without a keyword
pub const MISSING_KEYWORD_MESSAGE: &str = "Enter a keyword to search feedback.";

/// Feedback service composing the store and the classifier
#[derive(Clone)]
pub struct FeedbackService {
    store: Arc<dyn FeedbackStore>,
    classifier: SentimentClassifier,
}

impl FeedbackService {
    pub fn new(store: Arc<dyn FeedbackStore>, classifier: SentimentClassifier) -> Self {
        Self { store, classifier }
    }

    /// Underlying store
    pub fn store(&self) -> &Arc<dyn FeedbackStore> {
        &self.store
    }

    /// Classifier used for new submissions
    pub fn classifier(&self) -> &SentimentClassifier {
        &self.classifier
    }

    /// Classify and store a submission stamped with the current local time
    pub async fn submit(&self, submission: FeedbackSubmission) -> Result<StoredFeedback> {
        self.submit_at(submission, Local::now().naive_local()).await
    }

    /// Classify and store a submission with an explicit timestamp
    ///
    /// Empty name or text is rejected before anything is classified or stored.
    pub async fn submit_at(
        &self,
        submission: FeedbackSubmission,
        submitted_at: NaiveDateTime,
    ) -> Result<StoredFeedback> {
        submission.validate()?;

        let sentiment = self.classifier.classify(&submission.feedback_text);
        let record = FeedbackRecord {
            user_name: submission.user_name,
            feedback_text: submission.feedback_text,
            sentiment,
            timestamp: submitted_at.format(TIMESTAMP_FORMAT).to_string(),
        };

        let id = self.store.insert(&record).await?;
        info!("Feedback {} submitted (sentiment: {})", id, sentiment);

        Ok(StoredFeedback { id, record })
    }

    /// Every stored record
    pub async fn list(&self) -> Result<Vec<StoredFeedback>> {
        self.store.find_all().await
    }

    /// Total number of stored records
    pub async fn count(&self) -> Result<usize> {
        self.store.count().await
    }

    /// Per-sentiment counts for the pie chart
    pub async fn distribution(&self) -> Result<SentimentDistribution> {
        let mut counts = Vec::with_capacity(Sentiment::ALL.len());
        for sentiment in Sentiment::ALL {
            counts.push((sentiment, self.store.count_where(sentiment).await?));
        }

        let distribution = SentimentDistribution::from_counts(&counts);
        debug!("Sentiment distribution over {} records", distribution.total);
        Ok(distribution)
    }

    /// Case-insensitive keyword search over feedback text
    pub async fn search(&self, keyword: &str) -> Result<Vec<StoredFeedback>> {
        if keyword.is_empty() {
            return Err(FeedbackError::ValidationError(MISSING_KEYWORD_MESSAGE.to_string()));
        }
        self.store.search(keyword, true).await
    }

    /// Submissions per day, ascending
    pub async fn trend(&self) -> Result<Vec<TrendPoint>> {
        let records = self.store.find_all().await?;
        aggregate_trend(records.iter().map(|r| &r.record))
    }

    /// Render every record as CSV in store-return order
    pub async fn export_csv(&self) -> Result<CsvExport> {
        let records = self.store.find_all().await?;
        let export = CsvExport::from_records(&records)?;
        debug!("Exported {} records to CSV", export.rows);
        Ok(export)
    }

    /// Remove every record
    pub async fn delete_all(&self) -> Result<usize> {
        let deleted = self.store.delete_all().await?;
        info!("All feedback deleted ({} records)", deleted);
        Ok(deleted)
    }
}

impl std::fmt::Debug for FeedbackService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedbackService")
            .field("classifier", &self.classifier)
            .finish_non_exhaustive()
    }
}
