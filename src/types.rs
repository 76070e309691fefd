//! Core data types for the feedback sentiment service
//!
//! Defines the feedback document as it is stored, the sentiment labels the
//! classifier assigns, and the aggregate shapes the chart views consume.

use crate::error::{FeedbackError, Result};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fixed timestamp layout for stored feedback (`YYYY-MM-DD HH:MM:SS`)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Message shown when a submission is missing its name or text
pub const MISSING_FIELDS_MESSAGE: &str = "Please provide both name and feedback.";

/// Opaque identifier assigned by the store on insert
///
/// Wraps a UUID so feedback IDs cannot be mixed up with other identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeedbackId(pub Uuid);

impl FeedbackId {
    /// Create a new random feedback ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a feedback ID from a string
    pub fn from_string(s: &str) -> std::result::Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for FeedbackId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for FeedbackId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sentiment label derived from a polarity score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    /// Every label, in chart order
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Neutral, Sentiment::Negative];

    /// Map a polarity score onto a label
    ///
    /// Strictly positive scores are Positive, strictly negative scores are
    /// Negative, and everything else (zero, NaN) is Neutral.
    pub fn from_polarity(polarity: f64) -> Self {
        if polarity > 0.0 {
            Sentiment::Positive
        } else if polarity < 0.0 {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }

    /// Stored string form
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Neutral => "Neutral",
            Sentiment::Negative => "Negative",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Sentiment {
    type Err = FeedbackError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Positive" => Ok(Sentiment::Positive),
            "Neutral" => Ok(Sentiment::Neutral),
            "Negative" => Ok(Sentiment::Negative),
            other => Err(FeedbackError::InvalidSentiment(other.to_string())),
        }
    }
}

/// A feedback document
///
/// Field order here is the CSV column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    /// Name the submitter typed in
    pub user_name: String,

    /// Free-form feedback text
    pub feedback_text: String,

    /// Label assigned by the classifier at creation time
    pub sentiment: Sentiment,

    /// Local submission time formatted with [`TIMESTAMP_FORMAT`]
    pub timestamp: String,
}

impl FeedbackRecord {
    /// Column names as they appear in the CSV header
    pub const FIELD_NAMES: [&'static str; 4] = ["user_name", "feedback_text", "sentiment", "timestamp"];

    /// Check the record against the document schema
    ///
    /// Name and text must be non-empty and the timestamp must parse with the
    /// fixed layout.
    pub fn validate(&self) -> Result<()> {
        if self.user_name.is_empty() || self.feedback_text.is_empty() {
            return Err(FeedbackError::ValidationError(MISSING_FIELDS_MESSAGE.to_string()));
        }
        self.parsed_timestamp()?;
        Ok(())
    }

    /// Parse the stored timestamp
    pub fn parsed_timestamp(&self) -> Result<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.timestamp, TIMESTAMP_FORMAT)
            .map_err(|e| FeedbackError::InvalidTimestamp(format!("'{}': {}", self.timestamp, e)))
    }

    /// Calendar date portion of the timestamp
    pub fn date(&self) -> Result<NaiveDate> {
        Ok(self.parsed_timestamp()?.date())
    }
}

/// A feedback document together with its store-assigned identifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredFeedback {
    pub id: FeedbackId,

    #[serde(flatten)]
    pub record: FeedbackRecord,
}

/// Submission as it arrives from a form or request body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedbackSubmission {
    #[serde(default)]
    pub user_name: String,

    #[serde(default)]
    pub feedback_text: String,
}

impl FeedbackSubmission {
    pub fn new(user_name: impl Into<String>, feedback_text: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
            feedback_text: feedback_text.into(),
        }
    }

    /// Reject an empty name or text
    pub fn validate(&self) -> Result<()> {
        if self.user_name.is_empty() || self.feedback_text.is_empty() {
            return Err(FeedbackError::ValidationError(MISSING_FIELDS_MESSAGE.to_string()));
        }
        Ok(())
    }
}

/// One slice of the sentiment pie chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionSlice {
    pub sentiment: Sentiment,
    pub count: usize,
    /// Share of the total, rounded to one decimal place
    pub percentage: f64,
}

/// Sentiment counts across the whole store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentDistribution {
    pub slices: Vec<DistributionSlice>,
    pub total: usize,
}

impl SentimentDistribution {
    /// Build from (sentiment, count) pairs
    pub fn from_counts(counts: &[(Sentiment, usize)]) -> Self {
        let total: usize = counts.iter().map(|(_, c)| c).sum();
        let slices = counts
            .iter()
            .map(|&(sentiment, count)| {
                let percentage = if total == 0 {
                    0.0
                } else {
                    (count as f64 * 1000.0 / total as f64).round() / 10.0
                };
                DistributionSlice {
                    sentiment,
                    count,
                    percentage,
                }
            })
            .collect();

        Self { slices, total }
    }

    /// No feedback of any sentiment
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Count for one sentiment
    pub fn count(&self, sentiment: Sentiment) -> usize {
        self.slices
            .iter()
            .find(|s| s.sentiment == sentiment)
            .map(|s| s.count)
            .unwrap_or(0)
    }
}

/// Number of submissions on one calendar date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub count: usize,
}
