//! Storage layer for feedback documents
//!
//! Provides the store abstraction and its libSQL implementation.

pub mod libsql;

#[cfg(test)]
pub mod test_utils;

use crate::error::Result;
use crate::types::{FeedbackId, FeedbackRecord, Sentiment, StoredFeedback};
use async_trait::async_trait;

/// Store backend trait defining all required operations
#[async_trait]
pub trait FeedbackStore: Send + Sync {
    /// Validate and append a record; the store assigns its identifier
    async fn insert(&self, record: &FeedbackRecord) -> Result<FeedbackId>;

    /// Every stored record (order is not part of the contract)
    async fn find_all(&self) -> Result<Vec<StoredFeedback>>;

    /// Number of records carrying the given sentiment
    async fn count_where(&self, sentiment: Sentiment) -> Result<usize>;

    /// Total number of records
    async fn count(&self) -> Result<usize>;

    /// Records whose feedback text matches `query` as a regular expression
    ///
    /// A query that is not a valid pattern is matched as a literal substring.
    async fn search(&self, query: &str, case_insensitive: bool) -> Result<Vec<StoredFeedback>>;

    /// Remove every record, returning how many were removed
    async fn delete_all(&self) -> Result<usize>;
}
