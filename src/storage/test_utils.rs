//! Test utilities for storage initialization

use crate::storage::libsql::{ConnectionMode, LibsqlStore};
use crate::types::{FeedbackRecord, Sentiment};
use tempfile::TempDir;

/// Create a file-backed store inside a fresh temp directory
///
/// Keep the returned `TempDir` alive for the duration of the test.
pub async fn create_test_storage() -> (LibsqlStore, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("feedback_test.db");
    let storage = LibsqlStore::new_with_validation(
        ConnectionMode::Local(path.to_string_lossy().to_string()),
        true,
    )
    .await
    .expect("Failed to create test storage");

    (storage, dir)
}

/// Build a record with explicit fields
pub fn record(name: &str, text: &str, sentiment: Sentiment, timestamp: &str) -> FeedbackRecord {
    FeedbackRecord {
        user_name: name.to_string(),
        feedback_text: text.to_string(),
        sentiment,
        timestamp: timestamp.to_string(),
    }
}
