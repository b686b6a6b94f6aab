//! Enhancement pipeline: detect, classify, transform, then optionally save.
//!
//! The three core steps are pure functions; this layer adds logging and the
//! hand-off to a [`PromptStore`].

use crate::error::Result;
use crate::frameworks::{FrameworkCandidate, detect_frameworks};
use crate::parameters::PromptParameters;
use crate::storage::{NewPromptRecord, PromptStore};
use crate::transformer::{EnhancedPrompt, transform};
use crate::use_case::classify_use_case;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, instrument};

/// Everything one enhancement run produced.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Enhancement {
    pub enhanced: EnhancedPrompt,
    pub candidates: Vec<FrameworkCandidate>,
    /// Identifier of the saved record, when a store and a user id were present.
    pub saved_id: Option<String>,
}

#[derive(Clone, Default)]
pub struct PromptService {
    store: Option<Arc<dyn PromptStore>>,
}

impl PromptService {
    /// A service that never persists.
    pub fn new() -> Self {
        Self { store: None }
    }

    pub fn with_store(store: Arc<dyn PromptStore>) -> Self {
        Self { store: Some(store) }
    }

    pub fn store(&self) -> Option<&Arc<dyn PromptStore>> {
        self.store.as_ref()
    }

    /// Run the pure pipeline without touching storage.
    pub fn enhance(&self, input: &str, params: &PromptParameters) -> Result<Enhancement> {
        let started = Instant::now();
        let candidates = detect_frameworks(input);
        let use_case = classify_use_case(input);
        let enhanced = transform(input, &candidates, params, use_case)?;
        debug!(
            use_case = %use_case,
            frameworks = ?enhanced.frameworks_applied,
            prompt_len = enhanced.final_prompt.len(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "prompt enhanced"
        );
        Ok(Enhancement {
            enhanced,
            candidates,
            saved_id: None,
        })
    }

    /// Run the pipeline and, when both a store and `user_id` are present, save the result.
    #[instrument(skip(self, input, params), fields(input_len = input.len()))]
    pub async fn enhance_and_save(
        &self,
        input: &str,
        params: &PromptParameters,
        user_id: Option<&str>,
    ) -> Result<Enhancement> {
        let mut outcome = self.enhance(input, params)?;
        if let (Some(store), Some(user_id)) = (self.store.as_ref(), user_id) {
            let record = NewPromptRecord {
                original_input: input.to_string(),
                transformed_prompt: outcome.enhanced.final_prompt.clone(),
                frameworks: outcome
                    .enhanced
                    .frameworks_applied
                    .iter()
                    .map(|f| f.to_string())
                    .collect(),
                parameters: *params,
                use_case: outcome.enhanced.use_case.to_string(),
                user_id: user_id.to_string(),
            };
            let id = store.save(record).await?;
            info!(prompt_id = %id, "enhanced prompt saved");
            outcome.saved_id = Some(id);
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frameworks::FrameworkId;
    use crate::storage::MemoryStore;
    use crate::use_case::UseCase;

    #[test]
    fn test_enhance_without_store() {
        let service = PromptService::new();
        let out = service
            .enhance("Help me write a blog post about coffee", &PromptParameters::default())
            .unwrap();
        assert_eq!(out.enhanced.use_case, UseCase::General);
        assert_eq!(out.candidates.len(), FrameworkId::ALL.len());
        assert!(out.saved_id.is_none());
    }

    #[tokio::test]
    async fn test_enhance_and_save_persists_applicable_frameworks() {
        let store = Arc::new(MemoryStore::new());
        let service = PromptService::with_store(store.clone());
        let out = service
            .enhance_and_save(
                "Write technical API documentation for our REST endpoints",
                &PromptParameters::default(),
                Some("user-1"),
            )
            .await
            .unwrap();
        let id = out.saved_id.clone().unwrap();

        let saved = store.list_by_user("user-1").await.unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].id, id);
        assert_eq!(saved[0].use_case, "technical");
        let expected: Vec<String> = out
            .enhanced
            .frameworks_applied
            .iter()
            .map(|f| f.to_string())
            .collect();
        assert_eq!(saved[0].frameworks, expected);
        assert_eq!(saved[0].transformed_prompt, out.enhanced.final_prompt);
    }

    #[tokio::test]
    async fn test_anonymous_request_is_not_saved() {
        let store = Arc::new(MemoryStore::new());
        let service = PromptService::with_store(store.clone());
        let out = service
            .enhance_and_save("Summarize this", &PromptParameters::default(), None)
            .await
            .unwrap();
        assert!(out.saved_id.is_none());
        assert!(store.list_recent(10).await.unwrap().is_empty());
    }
}
