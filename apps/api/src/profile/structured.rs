//! Structured extraction: an external, schema-constrained classification of résumé text.
//!
//! The builder prefers this path; any `StructuredError` sends the caller to the
//! heuristic path instead.

use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

use crate::llm_client::{LlmClient, LlmError};
use crate::profile::models::StructuredResume;
use crate::profile::prompts::{build_resume_extract_prompt, RESUME_EXTRACT_SYSTEM};

#[derive(Debug, Error)]
pub enum StructuredError {
    #[error("structured extraction is unavailable")]
    Unavailable,

    #[error("structured extraction failed: {0}")]
    Llm(#[from] LlmError),

    #[error("structured extraction returned an empty record")]
    Empty,
}

#[async_trait]
pub trait StructuredExtractor: Send + Sync {
    async fn extract(&self, text: &str) -> Result<StructuredResume, StructuredError>;
}

pub struct LlmStructuredExtractor {
    llm: LlmClient,
}

impl LlmStructuredExtractor {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

fn is_empty_record(record: &StructuredResume) -> bool {
    record.full_name.trim().is_empty()
        && record.skills.is_empty()
        && record.experience.is_empty()
        && record.education.is_empty()
}

#[async_trait]
impl StructuredExtractor for LlmStructuredExtractor {
    async fn extract(&self, text: &str) -> Result<StructuredResume, StructuredError> {
        let prompt = build_resume_extract_prompt(text);
        let record: StructuredResume = self.llm.call_json(&prompt, RESUME_EXTRACT_SYSTEM).await?;
        if is_empty_record(&record) {
            return Err(StructuredError::Empty);
        }
        info!(
            "Structured extraction via {}: {} skills, {} experience entries",
            self.llm.model(),
            record.skills.len(),
            record.experience.len()
        );
        Ok(record)
    }
}

/// Used when no LLM key is configured.
pub struct DisabledStructuredExtractor;

#[async_trait]
impl StructuredExtractor for DisabledStructuredExtractor {
    async fn extract(&self, _text: &str) -> Result<StructuredResume, StructuredError> {
        Err(StructuredError::Unavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_disabled_extractor_is_unavailable() {
        let result = DisabledStructuredExtractor.extract("Jane Doe").await;
        assert!(matches!(result, Err(StructuredError::Unavailable)));
    }

    #[test]
    fn test_record_without_identity_or_content_is_empty() {
        assert!(is_empty_record(&StructuredResume::default()));
        let named = StructuredResume {
            full_name: "Jane".into(),
            ..Default::default()
        };
        assert!(!is_empty_record(&named));
    }
}
