//! LibSQL storage backend implementation
//!
//! Persists feedback documents in a single `feedback` table of a libSQL
//! database (local file, in-memory, or remote).

use crate::error::{FeedbackError, Result};
use crate::storage::FeedbackStore;
use crate::types::{FeedbackId, FeedbackRecord, Sentiment, StoredFeedback};
use async_trait::async_trait;
use chrono::Utc;
use libsql::{params, params::IntoParams, Builder, Connection, Database};
use regex::{Regex, RegexBuilder};
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

/// Embedded schema migrations, applied in order
const MIGRATIONS: &[(&str, &str)] = &[
    (
        "001_feedback_schema.sql",
        include_str!("../../migrations/libsql/001_feedback_schema.sql"),
    ),
    (
        "002_add_indexes.sql",
        include_str!("../../migrations/libsql/002_add_indexes.sql"),
    ),
];

const SQLITE_HEADER: &[u8; 16] = b"SQLite format 3\0";

const SELECT_COLUMNS: &str = "SELECT id, user_name, feedback_text, sentiment, timestamp FROM feedback";

/// Split a migration file into individual statements
fn parse_sql_statements(sql: &str) -> Vec<String> {
    let mut statements = Vec::new();
    let mut current = String::new();

    for line in sql.lines() {
        let trimmed = line.trim();

        // Skip comment-only and empty lines when not building a statement
        if current.is_empty() && (trimmed.is_empty() || trimmed.starts_with("--")) {
            continue;
        }

        if !current.is_empty() {
            current.push('\n');
        }
        current.push_str(line);

        if trimmed.ends_with(';') {
            statements.push(std::mem::take(&mut current));
        }
    }

    if !current.trim().is_empty() {
        statements.push(current);
    }

    statements
}

/// Compile a search query, falling back to a literal match for invalid patterns
fn build_matcher(query: &str, case_insensitive: bool) -> Result<Regex> {
    match RegexBuilder::new(query)
        .case_insensitive(case_insensitive)
        .build()
    {
        Ok(re) => Ok(re),
        Err(e) => {
            debug!("Query '{}' is not a valid pattern ({}), matching literally", query, e);
            RegexBuilder::new(&regex::escape(query))
                .case_insensitive(case_insensitive)
                .build()
                .map_err(|e| FeedbackError::Other(format!("Cannot build search pattern: {}", e)))
        }
    }
}

/// Database connection mode
#[derive(Debug, Clone)]
pub enum ConnectionMode {
    /// Local file-based database
    Local(String),
    /// In-memory database (for testing)
    InMemory,
    /// Remote database
    Remote { url: String, token: String },
}

/// LibSQL storage backend
pub struct LibsqlStore {
    _db: Database,
    // libSQL gives every connection to ":memory:" its own database, so one
    // connection is opened up front and shared.
    conn: Connection,
}

impl LibsqlStore {
    /// Validate database file before opening
    ///
    /// Returns `Ok(false)` when the file is absent and `must_exist` is false.
    fn validate_database_file(db_path: &str, must_exist: bool) -> Result<bool> {
        let path = Path::new(db_path);

        if !path.exists() {
            if must_exist {
                return Err(FeedbackError::Database(format!(
                    "Database file not found at '{}'. Run 'feedback init' first or check FEEDBACK_DB_PATH.",
                    db_path
                )));
            }
            return Ok(false);
        }

        // SQLite files start with "SQLite format 3\0"; an empty file is a fresh database
        let mut file = std::fs::File::open(path).map_err(|e| {
            FeedbackError::Database(format!("Cannot read database file at '{}': {}", db_path, e))
        })?;
        let len = file
            .metadata()
            .map_err(|e| {
                FeedbackError::Database(format!("Cannot read database file at '{}': {}", db_path, e))
            })?
            .len();

        if len > 0 {
            let mut header = [0u8; 16];
            if len < 16 || file.read_exact(&mut header).is_err() || &header != SQLITE_HEADER {
                return Err(FeedbackError::Database(format!(
                    "Database file at '{}' is corrupted or not a valid SQLite database.",
                    db_path
                )));
            }
        }

        debug!("Database file validation passed: {}", db_path);
        Ok(true)
    }

    /// Open a store, optionally creating a missing local database
    pub async fn new_with_validation(mode: ConnectionMode, create_if_missing: bool) -> Result<Self> {
        info!(
            "Connecting to LibSQL database: {} (create_if_missing: {})",
            describe_mode(&mode),
            create_if_missing
        );

        let db = match mode {
            ConnectionMode::Local(ref path) => {
                let exists = Self::validate_database_file(path, !create_if_missing)?;

                if create_if_missing && !exists {
                    if let Some(parent) = Path::new(path).parent() {
                        if !parent.as_os_str().is_empty() {
                            std::fs::create_dir_all(parent).map_err(|e| {
                                FeedbackError::Database(format!(
                                    "Failed to create database directory {}: {}",
                                    parent.display(),
                                    e
                                ))
                            })?;
                        }
                    }
                }

                Builder::new_local(path).build().await.map_err(|e| {
                    FeedbackError::Database(format!("Failed to create local database: {}", e))
                })?
            }
            ConnectionMode::InMemory => Builder::new_local(":memory:").build().await.map_err(|e| {
                FeedbackError::Database(format!("Failed to create in-memory database: {}", e))
            })?,
            ConnectionMode::Remote { ref url, ref token } => {
                Builder::new_remote(url.clone(), token.clone())
                    .build()
                    .await
                    .map_err(|e| {
                        FeedbackError::Database(format!("Failed to create remote database: {}", e))
                    })?
            }
        };

        let conn = db
            .connect()
            .map_err(|e| FeedbackError::Database(format!("Failed to get connection: {}", e)))?;

        info!("LibSQL database connection established");

        let store = Self { _db: db, conn };
        store.check_database_health().await?;
        store.run_migrations().await?;

        Ok(store)
    }

    /// Open an existing database; errors if a local file is missing
    pub async fn new(mode: ConnectionMode) -> Result<Self> {
        Self::new_with_validation(mode, false).await
    }

    /// Create from a path or URL string
    ///
    /// - ":memory:" -> InMemory
    /// - "libsql://..." -> Remote (token from `LIBSQL_AUTH_TOKEN`)
    /// - anything else -> Local file path
    pub async fn from_path(database_url: &str, create_if_missing: bool) -> Result<Self> {
        let mode = if database_url == ":memory:" {
            ConnectionMode::InMemory
        } else if database_url.starts_with("libsql://") {
            let token = std::env::var("LIBSQL_AUTH_TOKEN")
                .map_err(|_| FeedbackError::Other("LIBSQL_AUTH_TOKEN not found".into()))?;
            ConnectionMode::Remote {
                url: database_url.to_string(),
                token,
            }
        } else {
            ConnectionMode::Local(database_url.to_string())
        };

        Self::new_with_validation(mode, create_if_missing).await
    }

    /// Check that the database answers a trivial query
    pub async fn check_database_health(&self) -> Result<()> {
        match self.conn.query("SELECT 1", ()).await {
            Ok(_) => {
                debug!("Database health check passed");
                Ok(())
            }
            Err(e) => {
                let error_msg = e.to_string();
                if error_msg.contains("readonly") || error_msg.contains("permission") {
                    Err(FeedbackError::Database(
                        "Database is read-only or permission denied. Check file permissions."
                            .to_string(),
                    ))
                } else if error_msg.contains("corrupt") || error_msg.contains("malformed") {
                    Err(FeedbackError::Database(
                        "Database appears to be corrupted.".to_string(),
                    ))
                } else {
                    Err(FeedbackError::Database(format!("Health check failed: {}", error_msg)))
                }
            }
        }
    }

    /// Apply embedded migrations that have not run yet
    pub async fn run_migrations(&self) -> Result<()> {
        debug!("Running database migrations...");

        self.conn
            .execute(
                "CREATE TABLE IF NOT EXISTS _migrations_applied (
                    migration_name TEXT PRIMARY KEY,
                    applied_at INTEGER NOT NULL
                )",
                params![],
            )
            .await
            .map_err(|e| {
                FeedbackError::Migration(format!("Failed to create migrations table: {}", e))
            })?;

        for (name, sql) in MIGRATIONS {
            let mut rows = self
                .conn
                .query(
                    "SELECT COUNT(*) FROM _migrations_applied WHERE migration_name = ?",
                    params![*name],
                )
                .await?;

            let already_applied = match rows.next().await? {
                Some(row) => row.get::<i64>(0)?,
                None => 0,
            };

            if already_applied > 0 {
                debug!("Skipping already applied migration: {}", name);
                continue;
            }

            let statements = parse_sql_statements(sql);
            debug!("Parsed {} statements from {}", statements.len(), name);
            for (i, statement) in statements.iter().enumerate() {
                let statement = statement.trim();
                if statement.is_empty() {
                    continue;
                }
                self.conn.execute(statement, params![]).await.map_err(|e| {
                    FeedbackError::Migration(format!(
                        "Failed to execute statement #{} in {}: {}",
                        i + 1,
                        name,
                        e
                    ))
                })?;
            }

            self.conn
                .execute(
                    "INSERT INTO _migrations_applied (migration_name, applied_at) VALUES (?, ?)",
                    params![*name, Utc::now().timestamp()],
                )
                .await
                .map_err(|e| FeedbackError::Migration(format!("Failed to record migration: {}", e)))?;

            info!("Executed migration: {}", name);
        }

        debug!("Database migrations completed");
        Ok(())
    }

    /// Convert a libsql row to a stored record
    fn row_to_feedback(row: &libsql::Row) -> Result<StoredFeedback> {
        let id_str: String = row.get(0)?;
        let id = FeedbackId::from_string(&id_str)?;

        let sentiment_str: String = row.get(3)?;

        Ok(StoredFeedback {
            id,
            record: FeedbackRecord {
                user_name: row.get(1)?,
                feedback_text: row.get(2)?,
                sentiment: sentiment_str.parse()?,
                timestamp: row.get(4)?,
            },
        })
    }

    async fn query_all(&self) -> Result<Vec<StoredFeedback>> {
        let sql = format!("{} ORDER BY rowid", SELECT_COLUMNS);
        let mut rows = self.conn.query(&sql, params![]).await?;

        let mut records = Vec::new();
        while let Some(row) = rows.next().await? {
            records.push(Self::row_to_feedback(&row)?);
        }
        Ok(records)
    }

    async fn count_with(&self, sql: &str, params: impl IntoParams) -> Result<usize> {
        let mut rows = self.conn.query(sql, params).await?;

        match rows.next().await? {
            Some(row) => {
                let count: i64 = row.get(0)?;
                Ok(count as usize)
            }
            None => Ok(0),
        }
    }
}

fn describe_mode(mode: &ConnectionMode) -> String {
    match mode {
        ConnectionMode::Local(path) => format!("local:{}", path),
        ConnectionMode::InMemory => "in-memory".to_string(),
        ConnectionMode::Remote { url, .. } => format!("remote:{}", url),
    }
}

#[async_trait]
impl FeedbackStore for LibsqlStore {
    async fn insert(&self, record: &FeedbackRecord) -> Result<FeedbackId> {
        record.validate()?;

        let id = FeedbackId::new();
        debug!("Storing feedback {} from '{}'", id, record.user_name);

        self.conn
            .execute(
                "INSERT INTO feedback (id, user_name, feedback_text, sentiment, timestamp) VALUES (?, ?, ?, ?, ?)",
                params![
                    id.to_string(),
                    record.user_name.clone(),
                    record.feedback_text.clone(),
                    record.sentiment.as_str(),
                    record.timestamp.clone(),
                ],
            )
            .await
            .map_err(|e| {
                let error_msg = e.to_string();
                if error_msg.contains("readonly") || error_msg.contains("permission") {
                    FeedbackError::Database(
                        "Cannot write to database: read-only or permission denied.".to_string(),
                    )
                } else {
                    FeedbackError::Database(format!("Insert failed: {}", error_msg))
                }
            })?;

        Ok(id)
    }

    async fn find_all(&self) -> Result<Vec<StoredFeedback>> {
        let records = self.query_all().await?;
        debug!("Loaded {} feedback records", records.len());
        Ok(records)
    }

    async fn count_where(&self, sentiment: Sentiment) -> Result<usize> {
        self.count_with(
            "SELECT COUNT(*) FROM feedback WHERE sentiment = ?",
            params![sentiment.as_str()],
        )
        .await
    }

    async fn count(&self) -> Result<usize> {
        self.count_with("SELECT COUNT(*) FROM feedback", params![]).await
    }

    async fn search(&self, query: &str, case_insensitive: bool) -> Result<Vec<StoredFeedback>> {
        debug!("Searching feedback for '{}' (case_insensitive: {})", query, case_insensitive);

        let matcher = build_matcher(query, case_insensitive)?;
        let results: Vec<StoredFeedback> = self
            .query_all()
            .await?
            .into_iter()
            .filter(|f| matcher.is_match(&f.record.feedback_text))
            .collect();

        debug!("Search found {} results", results.len());
        Ok(results)
    }

    async fn delete_all(&self) -> Result<usize> {
        let deleted = self.conn.execute("DELETE FROM feedback", params![]).await?;
        if deleted > 0 {
            warn!("Deleted all feedback ({} records)", deleted);
        }
        Ok(deleted as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_utils::{create_test_storage, record};

    #[test]
    fn test_parse_sql_statements() {
        let sql = "-- header\nCREATE TABLE a (x INT);\n\nCREATE INDEX i\n  ON a(x);\n";
        let statements = parse_sql_statements(sql);
        assert_eq!(statements.len(), 2);
        assert!(statements[1].contains("ON a(x);"));
    }

    #[test]
    fn test_build_matcher_falls_back_to_literal() {
        let re = build_matcher("c++ (beta", true).unwrap();
        assert!(re.is_match("I tried the C++ (BETA build"));
        assert!(!re.is_match("cpp beta"));
    }

    #[tokio::test]
    async fn test_insert_and_find_all() {
        let (storage, _dir) = create_test_storage().await;

        let id = storage
            .insert(&record("Alice", "I love this!", Sentiment::Positive, "2024-05-01 09:30:00"))
            .await
            .unwrap();

        let all = storage.find_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, id);
        assert_eq!(all[0].record.user_name, "Alice");
        assert_eq!(all[0].record.sentiment, Sentiment::Positive);
        assert_eq!(all[0].record.timestamp, "2024-05-01 09:30:00");
    }

    #[tokio::test]
    async fn test_insert_rejects_invalid_record() {
        let (storage, _dir) = create_test_storage().await;

        let err = storage
            .insert(&record("", "text", Sentiment::Neutral, "2024-05-01 09:30:00"))
            .await
            .unwrap_err();
        assert!(err.is_validation());

        let err = storage
            .insert(&record("Bob", "text", Sentiment::Neutral, "yesterday"))
            .await
            .unwrap_err();
        assert!(matches!(err, FeedbackError::InvalidTimestamp(_)));

        assert_eq!(storage.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_duplicates_are_kept() {
        let (storage, _dir) = create_test_storage().await;
        let r = record("Dup", "same text", Sentiment::Neutral, "2024-05-01 09:30:00");

        let first = storage.insert(&r).await.unwrap();
        let second = storage.insert(&r).await.unwrap();

        assert_ne!(first, second);
        assert_eq!(storage.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_count_where_sums_to_total() {
        let (storage, _dir) = create_test_storage().await;
        let samples = [
            Sentiment::Positive,
            Sentiment::Positive,
            Sentiment::Negative,
            Sentiment::Neutral,
            Sentiment::Positive,
        ];
        for (i, sentiment) in samples.iter().enumerate() {
            storage
                .insert(&record(&format!("user{}", i), "text", *sentiment, "2024-05-01 09:30:00"))
                .await
                .unwrap();
        }

        assert_eq!(storage.count_where(Sentiment::Positive).await.unwrap(), 3);
        assert_eq!(storage.count_where(Sentiment::Neutral).await.unwrap(), 1);
        assert_eq!(storage.count_where(Sentiment::Negative).await.unwrap(), 1);

        let mut sum = 0;
        for sentiment in Sentiment::ALL {
            sum += storage.count_where(sentiment).await.unwrap();
        }
        assert_eq!(sum, storage.find_all().await.unwrap().len());
    }

    #[tokio::test]
    async fn test_search_case_insensitive_and_regex() {
        let (storage, _dir) = create_test_storage().await;
        storage
            .insert(&record("A", "The Checkout flow is great", Sentiment::Positive, "2024-05-01 09:30:00"))
            .await
            .unwrap();
        storage
            .insert(&record("B", "checkout crashed twice", Sentiment::Negative, "2024-05-02 09:30:00"))
            .await
            .unwrap();
        storage
            .insert(&record("C", "Shipping was fine", Sentiment::Neutral, "2024-05-03 09:30:00"))
            .await
            .unwrap();

        assert_eq!(storage.search("CHECKOUT", true).await.unwrap().len(), 2);
        assert_eq!(storage.search("CHECKOUT", false).await.unwrap().len(), 0);
        assert_eq!(storage.search("^ship", true).await.unwrap().len(), 1);
        assert!(storage.search("refund", true).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_all_empties_store() {
        let (storage, _dir) = create_test_storage().await;
        for i in 0..3 {
            storage
                .insert(&record(&format!("u{}", i), "text", Sentiment::Neutral, "2024-05-01 09:30:00"))
                .await
                .unwrap();
        }

        assert_eq!(storage.delete_all().await.unwrap(), 3);
        assert!(storage.find_all().await.unwrap().is_empty());
        assert_eq!(storage.delete_all().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_in_memory_mode_keeps_schema() {
        let storage = LibsqlStore::new_with_validation(ConnectionMode::InMemory, true)
            .await
            .unwrap();
        storage
            .insert(&record("Mem", "works", Sentiment::Neutral, "2024-05-01 09:30:00"))
            .await
            .unwrap();
        assert_eq!(storage.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_missing_database_requires_init() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.db");
        let result = LibsqlStore::new(ConnectionMode::Local(path.to_string_lossy().to_string())).await;
        assert!(matches!(result, Err(FeedbackError::Database(_))));
    }

    #[tokio::test]
    async fn test_count_with_binds_every_parameter() {
        let (storage, _dir) = create_test_storage().await;
        for (name, sentiment) in [
            ("Alice", Sentiment::Positive),
            ("Alice", Sentiment::Negative),
            ("Bob", Sentiment::Positive),
        ] {
            storage
                .insert(&record(name, "text", sentiment, "2024-05-01 09:30:00"))
                .await
                .unwrap();
        }

        let count = storage
            .count_with(
                "SELECT COUNT(*) FROM feedback WHERE sentiment = ? AND user_name = ?",
                params!["Positive", "Alice"],
            )
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_validate_database_file_header() {
        let dir = tempfile::tempdir().unwrap();

        let empty = dir.path().join("empty.db");
        std::fs::write(&empty, b"").unwrap();
        assert!(LibsqlStore::validate_database_file(empty.to_str().unwrap(), true).unwrap());

        let short = dir.path().join("short.db");
        std::fs::write(&short, b"SQLite").unwrap();
        assert!(LibsqlStore::validate_database_file(short.to_str().unwrap(), true).is_err());

        let garbage = dir.path().join("garbage.db");
        std::fs::write(&garbage, vec![b'x'; 4096]).unwrap();
        assert!(LibsqlStore::validate_database_file(garbage.to_str().unwrap(), true).is_err());

        let mut valid = SQLITE_HEADER.to_vec();
        valid.extend(std::iter::repeat(0u8).take(8192));
        let valid_path = dir.path().join("valid.db");
        std::fs::write(&valid_path, &valid).unwrap();
        assert!(LibsqlStore::validate_database_file(valid_path.to_str().unwrap(), true).unwrap());

        let absent = dir.path().join("absent.db");
        assert!(!LibsqlStore::validate_database_file(absent.to_str().unwrap(), false).unwrap());
    }

    #[tokio::test]
    async fn test_reopen_skips_applied_migrations() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reopen.db").to_string_lossy().to_string();

        {
            let storage = LibsqlStore::new_with_validation(ConnectionMode::Local(path.clone()), true)
                .await
                .unwrap();
            storage
                .insert(&record("Keep", "persisted", Sentiment::Neutral, "2024-05-01 09:30:00"))
                .await
                .unwrap();
        }

        let reopened = LibsqlStore::new(ConnectionMode::Local(path)).await.unwrap();
        assert_eq!(reopened.count().await.unwrap(), 1);
    }
}
