//! SQLite backend for the regulation collection.
//!
//! Uses a single table `regulations`; language tags and keywords are stored
//! as JSON arrays. Keyword and language matching run in Rust through
//! `Regulation`, so both backends share one definition of a match. SQLite's
//! `lower()` only folds ASCII, which would miss keywords such as "Überholen".

use async_trait::async_trait;
use chrono::Utc;
use driversfriend_core::error::StoreError;
use driversfriend_core::regulation::Regulation;
use driversfriend_core::store::KnowledgeStore;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::{Row, SqlitePool};
use std::collections::BTreeSet;
use std::str::FromStr;
use tracing::{debug, info};

/// A SQLite-backed regulation store.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (or create) a SQLite database at `path`.
    ///
    /// Pass `":memory:"` for an in-process ephemeral database (useful for tests).
    pub async fn new(path: &str) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(path)
            .map_err(|e| StoreError::Storage(format!("Invalid SQLite path: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        // Every connection to ":memory:" is a separate database.
        let max_connections = if path.contains(":memory:") { 1 } else { 4 };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(|e| StoreError::Unavailable(format!("Failed to open SQLite: {e}")))?;

        let store = Self { pool };
        store.run_migrations().await?;
        info!("SQLite knowledge store initialized at {path}");
        Ok(store)
    }

    /// Create from an existing pool (useful for testing).
    pub async fn from_pool(pool: SqlitePool) -> Result<Self, StoreError> {
        let store = Self { pool };
        store.run_migrations().await?;
        Ok(store)
    }

    async fn run_migrations(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS regulations (
                iid          INTEGER PRIMARY KEY AUTOINCREMENT,
                category     TEXT NOT NULL,
                country      TEXT NOT NULL,
                content      TEXT NOT NULL,
                languages    TEXT NOT NULL DEFAULT '[]',
                keywords     TEXT NOT NULL DEFAULT '[]',
                source       TEXT NOT NULL,
                fine_amount  REAL,
                last_updated TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::MigrationFailed(format!("regulations table: {e}")))?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_regulations_category ON regulations(category)")
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::MigrationFailed(format!("category index: {e}")))?;

        debug!("SQLite migrations complete");
        Ok(())
    }

    /// Parse a `Regulation` from a SQLite row.
    fn row_to_regulation(row: &sqlx::sqlite::SqliteRow) -> Result<Regulation, StoreError> {
        let column = |name: &str, e: sqlx::Error| StoreError::QueryFailed(format!("{name} column: {e}"));

        let category: String = row.try_get("category").map_err(|e| column("category", e))?;
        let country: String = row.try_get("country").map_err(|e| column("country", e))?;
        let content: String = row.try_get("content").map_err(|e| column("content", e))?;
        let languages_json: String = row.try_get("languages").map_err(|e| column("languages", e))?;
        let keywords_json: String = row.try_get("keywords").map_err(|e| column("keywords", e))?;
        let source: String = row.try_get("source").map_err(|e| column("source", e))?;
        let fine_amount: Option<f64> = row.try_get("fine_amount").map_err(|e| column("fine_amount", e))?;
        let last_updated_str: String = row
            .try_get("last_updated")
            .map_err(|e| column("last_updated", e))?;

        let languages: Vec<String> = serde_json::from_str(&languages_json)
            .map_err(|e| StoreError::QueryFailed(format!("languages JSON: {e}")))?;
        let keywords: Vec<String> = serde_json::from_str(&keywords_json)
            .map_err(|e| StoreError::QueryFailed(format!("keywords JSON: {e}")))?;

        let last_updated = chrono::DateTime::parse_from_rfc3339(&last_updated_str)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now());

        Ok(Regulation {
            category,
            country,
            content,
            languages,
            keywords,
            source,
            fine_amount,
            last_updated,
        })
    }

    fn rows_matching(
        rows: &[sqlx::sqlite::SqliteRow],
        keep: impl Fn(&Regulation) -> bool,
    ) -> Result<Vec<Regulation>, StoreError> {
        let mut out = Vec::new();
        for row in rows {
            let regulation = Self::row_to_regulation(row)?;
            if keep(&regulation) {
                out.push(regulation);
            }
        }
        Ok(out)
    }

    fn rows_matching_language(
        rows: &[sqlx::sqlite::SqliteRow],
        language: &str,
    ) -> Result<Vec<Regulation>, StoreError> {
        Self::rows_matching(rows, |r| r.matches_language(language))
    }
}

#[async_trait]
impl KnowledgeStore for SqliteStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    async fn search(
        &self,
        keywords: &[String],
        language: &str,
    ) -> Result<Vec<Regulation>, StoreError> {
        if keywords.is_empty() {
            return Ok(vec![]);
        }
        let rows = sqlx::query("SELECT * FROM regulations ORDER BY iid")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::QueryFailed(format!("keyword search: {e}")))?;

        let results = Self::rows_matching(&rows, |r| {
            r.matches_any_keyword(keywords) && r.matches_language(language)
        })?;
        debug!(results = results.len(), "SQLite keyword search");
        Ok(results)
    }

    async fn by_category_and_language(
        &self,
        category: &str,
        language: &str,
    ) -> Result<Vec<Regulation>, StoreError> {
        let rows = sqlx::query("SELECT * FROM regulations WHERE category = ?1 ORDER BY iid")
            .bind(category)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::QueryFailed(format!("category lookup: {e}")))?;

        Self::rows_matching_language(&rows, language)
    }

    async fn insert(&self, regulation: Regulation) -> Result<(), StoreError> {
        regulation.validate()?;
        let languages_json = serde_json::to_string(&regulation.languages)
            .map_err(|e| StoreError::Storage(format!("languages serialization: {e}")))?;
        let keywords_json = serde_json::to_string(&regulation.keywords)
            .map_err(|e| StoreError::Storage(format!("keywords serialization: {e}")))?;

        sqlx::query(
            r#"
            INSERT INTO regulations
                (category, country, content, languages, keywords, source, fine_amount, last_updated)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&regulation.category)
        .bind(&regulation.country)
        .bind(&regulation.content)
        .bind(&languages_json)
        .bind(&keywords_json)
        .bind(&regulation.source)
        .bind(regulation.fine_amount)
        .bind(regulation.last_updated.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Storage(format!("INSERT failed: {e}")))?;

        debug!(category = %regulation.category, "Stored regulation");
        Ok(())
    }

    async fn insert_many(&self, regulations: Vec<Regulation>) -> Result<usize, StoreError> {
        for regulation in &regulations {
            regulation.validate()?;
        }
        let count = regulations.len();
        for regulation in regulations {
            self.insert(regulation).await?;
        }
        info!(count, "Inserted regulations");
        Ok(count)
    }

    async fn list_categories(&self, language: &str) -> Result<Vec<String>, StoreError> {
        let rows = sqlx::query("SELECT * FROM regulations")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::QueryFailed(format!("category listing: {e}")))?;

        let categories: BTreeSet<String> = Self::rows_matching_language(&rows, language)?
            .into_iter()
            .map(|r| r.category)
            .collect();
        Ok(categories.into_iter().collect())
    }
}
