//! Error types for the feedback sentiment service
//!
//! Structured error definitions use thiserror; anyhow errors coming from the
//! binary edge are folded into [`FeedbackError::Other`].

use thiserror::Error;

/// Main error type for feedback operations
#[derive(Error, Debug)]
pub enum FeedbackError {
    /// Submission rejected before anything was stored
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(String),

    /// Schema migration failed
    #[error("Migration error: {0}")]
    Migration(String),

    /// Stored timestamp does not match `YYYY-MM-DD HH:MM:SS`
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// Stored sentiment is not one of Positive, Neutral, Negative
    #[error("Invalid sentiment: {0}")]
    InvalidSentiment(String),

    /// Invalid feedback ID format
    #[error("Invalid feedback ID: {0}")]
    InvalidFeedbackId(#[from] uuid::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// CSV encoding error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

/// Result type alias for feedback operations
pub type Result<T> = std::result::Result<T, FeedbackError>;

impl FeedbackError {
    /// True for errors caused by user input rather than the system
    pub fn is_validation(&self) -> bool {
        matches!(self, FeedbackError::ValidationError(_))
    }
}

impl From<libsql::Error> for FeedbackError {
    fn from(err: libsql::Error) -> Self {
        FeedbackError::Database(err.to_string())
    }
}

/// Convert anyhow::Error to FeedbackError
impl From<anyhow::Error> for FeedbackError {
    fn from(err: anyhow::Error) -> Self {
        FeedbackError::Other(err.to_string())
    }
}
