//! Configuration for the feedback service
//!
//! Layered with the `config` crate: built-in defaults, then an optional TOML
//! file, then `FEEDBACK__*` environment variables.
//!
//! ```toml
//! [database]
//! path = "/var/lib/feedback/feedback.db"
//!
//! [server]
//! addr = "0.0.0.0:8080"
//!
//! [sentiment.extra_words]
//! snappy = 0.6
//! laggy = -0.5
//! ```

use crate::error::Result;
use crate::sentiment::{LexiconAnalyzer, SentimentClassifier};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "feedback.toml";

/// Environment variable overriding the database path
pub const DB_PATH_ENV: &str = "FEEDBACK_DB_PATH";

/// Complete service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedbackConfig {
    #[serde(default)]
    pub database: DatabaseSettings,

    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub sentiment: SentimentSettings,
}

/// Database settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// Local path, ":memory:" or a libsql:// URL
    #[serde(default)]
    pub path: Option<String>,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_addr")]
    pub addr: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            addr: default_addr(),
        }
    }
}

fn default_addr() -> String {
    "127.0.0.1:3000".to_string()
}

/// Classifier settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SentimentSettings {
    /// Opinion words merged into the built-in lexicon
    #[serde(default)]
    pub extra_words: HashMap<String, f64>,
}

impl FeedbackConfig {
    /// Load configuration
    ///
    /// An explicitly named file must exist; the default file is optional.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let file_source = match config_path {
            Some(path) => File::from(path.to_path_buf()).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let config: FeedbackConfig = Config::builder()
            .add_source(file_source)
            .add_source(Environment::with_prefix("FEEDBACK").separator("__"))
            .build()?
            .try_deserialize()?;

        debug!("Loaded configuration: {:?}", config);
        Ok(config)
    }

    /// Resolve the database path
    ///
    /// Precedence: CLI flag, `FEEDBACK_DB_PATH`, config file, platform default.
    pub fn db_path(&self, cli_path: Option<String>) -> String {
        cli_path
            .or_else(|| std::env::var(DB_PATH_ENV).ok().filter(|p| !p.is_empty()))
            .or_else(|| self.database.path.clone())
            .unwrap_or_else(|| default_db_path().to_string_lossy().to_string())
    }

    /// Build the classifier described by this configuration
    pub fn classifier(&self) -> SentimentClassifier {
        let analyzer = LexiconAnalyzer::new().with_words(
            self.sentiment
                .extra_words
                .iter()
                .map(|(word, score)| (word.as_str(), *score)),
        );
        SentimentClassifier::new(Arc::new(analyzer))
    }
}

/// Default database path under the platform data directory
pub fn default_db_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("feedback-sentiment")
        .join("feedback.db")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Sentiment;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = FeedbackConfig::default();
        assert_eq!(config.server.addr, "127.0.0.1:3000");
        assert!(config.database.path.is_none());
        assert!(config.sentiment.extra_words.is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[database]\npath = \"/tmp/fb.db\"\n\n[server]\naddr = \"0.0.0.0:9000\"\n\n[sentiment.extra_words]\nsnappy = 0.6"
        )
        .unwrap();

        let config = FeedbackConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.database.path.as_deref(), Some("/tmp/fb.db"));
        assert_eq!(config.server.addr, "0.0.0.0:9000");
        assert_eq!(config.sentiment.extra_words.get("snappy"), Some(&0.6));
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let result = FeedbackConfig::load(Some(Path::new("/nonexistent/feedback.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_path_wins() {
        let config = FeedbackConfig {
            database: DatabaseSettings {
                path: Some("from-config.db".to_string()),
            },
            ..Default::default()
        };
        assert_eq!(config.db_path(Some("cli.db".to_string())), "cli.db");
    }

    #[test]
    fn test_extra_words_reach_classifier() {
        let mut config = FeedbackConfig::default();
        config
            .sentiment
            .extra_words
            .insert("snappy".to_string(), 0.6);

        assert_eq!(config.classifier().classify("so snappy"), Sentiment::Positive);
        assert_eq!(
            FeedbackConfig::default().classifier().classify("so snappy"),
            Sentiment::Neutral
        );
    }
}
