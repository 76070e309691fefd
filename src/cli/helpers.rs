//! Shared helper functions for CLI commands

use feedback_core::{
    error::Result, FeedbackConfig, FeedbackService, LibsqlStore, StoredFeedback,
};
use std::sync::Arc;
use tracing::debug;

/// Settings every command needs
#[derive(Debug, Clone)]
pub struct CliContext {
    pub config: FeedbackConfig,
    pub db_path: Option<String>,
}

impl CliContext {
    /// Database location after applying CLI, environment and config precedence
    pub fn resolved_db_path(&self) -> String {
        self.config.db_path(self.db_path.clone())
    }

    /// Open the store and build the service
    pub async fn open_service(&self, create_if_missing: bool) -> Result<FeedbackService> {
        let db_path = self.resolved_db_path();
        debug!("Using database: {}", db_path);

        let store = LibsqlStore::from_path(&db_path, create_if_missing).await?;
        Ok(FeedbackService::new(
            Arc::new(store),
            self.config.classifier(),
        ))
    }
}

/// Output format for listing commands
pub fn is_json(format: &str) -> bool {
    format.eq_ignore_ascii_case("json")
}

/// Print feedback entries in the list-view layout
pub fn print_feedback(entries: &[StoredFeedback]) {
    for entry in entries {
        let record = &entry.record;
        println!("{}", record.user_name);
        println!("  Feedback: {}", record.feedback_text);
        println!("  Sentiment: {}", record.sentiment);
        println!("  Submitted on: {}", record.timestamp);
        println!("---");
    }
}

/// Horizontal bar scaled against `max`
pub fn bar(value: usize, max: usize, width: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let filled = (value * width + max - 1) / max;
    "█".repeat(filled.min(width))
}
