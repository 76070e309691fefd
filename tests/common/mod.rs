//! Common test utilities and helpers

use feedback_core::{ConnectionMode, FeedbackService, LibsqlStore, SentimentClassifier};
use std::sync::Arc;
use tempfile::TempDir;

/// Create a file-backed store in a fresh temp directory
///
/// The returned `TempDir` must outlive the store.
pub async fn create_test_storage() -> (LibsqlStore, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("feedback.db");
    let storage = LibsqlStore::new_with_validation(
        ConnectionMode::Local(path.to_string_lossy().to_string()),
        true, // create_if_missing - required for test databases
    )
    .await
    .expect("Failed to create test storage");

    (storage, dir)
}

/// Create a service over a fresh store with the default lexicon classifier
pub async fn create_test_service() -> (Arc<FeedbackService>, TempDir) {
    let (storage, dir) = create_test_storage().await;
    let service = FeedbackService::new(Arc::new(storage), SentimentClassifier::lexicon());
    (Arc::new(service), dir)
}
