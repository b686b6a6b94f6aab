//! SQLite-backed prompt store.
//!
//! One connection behind a mutex; every statement runs on the blocking pool.
//! Timestamps are stored as fixed-width RFC 3339 (microseconds, `Z`) so that
//! text ordering matches time ordering.

use super::{NewPromptRecord, PromptStore, SavedPrompt};
use crate::error::{EnhancerError, Result};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{Connection, params};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS prompts (
    seq                INTEGER PRIMARY KEY AUTOINCREMENT,
    id                 TEXT NOT NULL UNIQUE,
    user_id            TEXT NOT NULL,
    original_input     TEXT NOT NULL,
    transformed_prompt TEXT NOT NULL,
    frameworks         TEXT NOT NULL,
    parameters         TEXT NOT NULL,
    use_case           TEXT NOT NULL,
    fingerprint        TEXT NOT NULL,
    created_at         TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_prompts_user_created ON prompts (user_id, created_at DESC);
";

const SELECT_COLUMNS: &str = "id, user_id, original_input, transformed_prompt, frameworks, parameters, use_case, fingerprint, created_at";

pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
    path: Option<PathBuf>,
}

/// Columns as read, before JSON and timestamp decoding.
struct PromptRow {
    id: String,
    user_id: String,
    original_input: String,
    transformed_prompt: String,
    frameworks: String,
    parameters: String,
    use_case: String,
    fingerprint: String,
    created_at: String,
}

impl PromptRow {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            user_id: row.get(1)?,
            original_input: row.get(2)?,
            transformed_prompt: row.get(3)?,
            frameworks: row.get(4)?,
            parameters: row.get(5)?,
            use_case: row.get(6)?,
            fingerprint: row.get(7)?,
            created_at: row.get(8)?,
        })
    }

    fn decode(self) -> Result<SavedPrompt> {
        Ok(SavedPrompt {
            id: self.id,
            user_id: self.user_id,
            original_input: self.original_input,
            transformed_prompt: self.transformed_prompt,
            frameworks: serde_json::from_str(&self.frameworks)?,
            parameters: serde_json::from_str(&self.parameters)?,
            use_case: self.use_case,
            fingerprint: self.fingerprint,
            created_at: DateTime::parse_from_rfc3339(&self.created_at)?.with_timezone(&Utc),
        })
    }
}

impl SqliteStore {
    /// Open (creating if needed) the database file at `path`.
    pub async fn open(path: &Path) -> Result<Self> {
        let owned = path.to_path_buf();
        let conn = tokio::task::spawn_blocking(move || -> Result<Connection> {
            if let Some(parent) = owned.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent).map_err(|e| EnhancerError::Storage {
                    message: format!("cannot create {}: {}", parent.display(), e),
                })?;
            }
            let conn = Connection::open(&owned)?;
            conn.execute_batch(SCHEMA)?;
            Ok(conn)
        })
        .await??;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            path: Some(path.to_path_buf()),
        })
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            path: None,
        })
    }

    /// Database file path (None for in-memory).
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    async fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let guard = conn.lock().map_err(|_| EnhancerError::Storage {
                message: "connection mutex poisoned".to_string(),
            })?;
            f(&guard)
        })
        .await?
    }
}

fn query_prompts(conn: &Connection, sql: &str, args: &[&dyn rusqlite::ToSql]) -> Result<Vec<SavedPrompt>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(args, PromptRow::from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    rows.into_iter().map(PromptRow::decode).collect()
}

#[async_trait]
impl PromptStore for SqliteStore {
    async fn save(&self, record: NewPromptRecord) -> Result<String> {
        record.validate()?;
        let saved = record.into_saved();
        let frameworks = serde_json::to_string(&saved.frameworks)?;
        let parameters = serde_json::to_string(&saved.parameters)?;
        let created_at = saved.created_at.to_rfc3339_opts(SecondsFormat::Micros, true);

        let id = self
            .with_conn(move |conn| {
                conn.execute(
                    "INSERT INTO prompts (id, user_id, original_input, transformed_prompt, frameworks, parameters, use_case, fingerprint, created_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                    params![
                        saved.id,
                        saved.user_id,
                        saved.original_input,
                        saved.transformed_prompt,
                        frameworks,
                        parameters,
                        saved.use_case,
                        saved.fingerprint,
                        created_at,
                    ],
                )?;
                Ok(saved.id)
            })
            .await?;
        tracing::debug!(prompt_id = %id, "saved prompt");
        Ok(id)
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<SavedPrompt>> {
        let user_id = user_id.to_string();
        self.with_conn(move |conn| {
            query_prompts(
                conn,
                &format!(
                    "SELECT {} FROM prompts WHERE user_id = ?1 ORDER BY created_at DESC, seq DESC",
                    SELECT_COLUMNS
                ),
                &[&user_id],
            )
        })
        .await
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<SavedPrompt>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        self.with_conn(move |conn| {
            query_prompts(
                conn,
                &format!(
                    "SELECT {} FROM prompts ORDER BY created_at DESC, seq DESC LIMIT ?1",
                    SELECT_COLUMNS
                ),
                &[&limit],
            )
        })
        .await
    }
}
