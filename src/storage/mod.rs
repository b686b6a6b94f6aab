//! Persistence of saved prompts.
//!
//! The enhancement core never touches storage; the service and HTTP layers
//! hand finished records to a [`PromptStore`]. `user_id` is an opaque caller
//! supplied identifier.

pub mod sqlite;

use crate::config::StorageConfig;
use crate::error::{EnhancerError, Result};
use crate::parameters::PromptParameters;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;

pub use sqlite::SqliteStore;

/// A prompt as handed to the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPromptRecord {
    pub original_input: String,
    pub transformed_prompt: String,
    pub frameworks: Vec<String>,
    pub parameters: PromptParameters,
    pub use_case: String,
    pub user_id: String,
}

/// A stored prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedPrompt {
    pub id: String,
    pub original_input: String,
    pub transformed_prompt: String,
    pub frameworks: Vec<String>,
    pub parameters: PromptParameters,
    pub use_case: String,
    pub user_id: String,
    /// blake3 hex digest of `transformed_prompt`
    pub fingerprint: String,
    pub created_at: DateTime<Utc>,
}

impl NewPromptRecord {
    pub fn validate(&self) -> Result<()> {
        if self.user_id.trim().is_empty() {
            return Err(EnhancerError::validation("userId must not be blank"));
        }
        if self.original_input.trim().is_empty() {
            return Err(EnhancerError::validation("originalInput must not be blank"));
        }
        if self.transformed_prompt.trim().is_empty() {
            return Err(EnhancerError::validation(
                "transformedPrompt must not be blank",
            ));
        }
        self.parameters.validate()
    }

    /// Stamp the record with an id, fingerprint and creation time.
    pub(crate) fn into_saved(self) -> SavedPrompt {
        SavedPrompt {
            id: uuid::Uuid::new_v4().to_string(),
            fingerprint: fingerprint(&self.transformed_prompt),
            created_at: Utc::now(),
            original_input: self.original_input,
            transformed_prompt: self.transformed_prompt,
            frameworks: self.frameworks,
            parameters: self.parameters,
            use_case: self.use_case,
            user_id: self.user_id,
        }
    }
}

pub fn fingerprint(text: &str) -> String {
    blake3::hash(text.as_bytes()).to_hex().to_string()
}

#[async_trait]
pub trait PromptStore: Send + Sync {
    /// Persist a record and return its identifier.
    async fn save(&self, record: NewPromptRecord) -> Result<String>;

    /// All records for `user_id`, newest first.
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<SavedPrompt>>;

    /// Latest records across all users, newest first.
    async fn list_recent(&self, limit: usize) -> Result<Vec<SavedPrompt>>;
}

/// In-process store; contents vanish with the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<Vec<SavedPrompt>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn newest_first<'a>(records: impl DoubleEndedIterator<Item = &'a SavedPrompt>) -> Vec<SavedPrompt> {
        // Reverse insertion order first so the stable sort keeps later saves ahead on ties.
        let mut out: Vec<SavedPrompt> = records.rev().cloned().collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        out
    }
}

#[async_trait]
impl PromptStore for MemoryStore {
    async fn save(&self, record: NewPromptRecord) -> Result<String> {
        record.validate()?;
        let saved = record.into_saved();
        let id = saved.id.clone();
        self.records.write().await.push(saved);
        Ok(id)
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<SavedPrompt>> {
        let records = self.records.read().await;
        Ok(Self::newest_first(
            records.iter().filter(|r| r.user_id == user_id),
        ))
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<SavedPrompt>> {
        let records = self.records.read().await;
        let mut out = Self::newest_first(records.iter());
        out.truncate(limit);
        Ok(out)
    }
}

/// Open the store selected by configuration.
pub async fn open_store(config: &StorageConfig) -> Result<Arc<dyn PromptStore>> {
    match config.backend.as_str() {
        "memory" => {
            tracing::info!("Using in-memory prompt store");
            Ok(Arc::new(MemoryStore::new()))
        }
        "sqlite" => {
            let store = SqliteStore::open(&config.sqlite_path).await?;
            tracing::info!("Using SQLite prompt store at {}", config.sqlite_path.display());
            Ok(Arc::new(store))
        }
        other => Err(EnhancerError::Config {
            message: format!("unknown storage backend '{}'", other),
        }),
    }
}
