use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::extract::models::{ExtractRequest, ExtractionResult};
use crate::extract::validate::ResponseValidationError;
use crate::llm::{Provider, TransportError};

pub mod models;
pub mod prompt;
pub mod validate;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Validation(#[from] ResponseValidationError),
}

/// Runs a single extraction: build the prompt, query the model once,
/// validate the reply. Stateless; no retries.
pub struct EntitiesExtractor {
    provider: Arc<Provider>,
}

impl EntitiesExtractor {
    pub fn new(provider: Arc<Provider>) -> Self {
        Self { provider }
    }

    pub async fn extract(&self, request: &ExtractRequest) -> Result<ExtractionResult, ExtractError> {
        let system_prompt = prompt::build(&request.current_time, &request.known_locations);
        let user_message = format!("Command: {}", request.user_text);

        let raw = self.provider.complete(&system_prompt, &user_message).await?;
        debug!("Model output: {}", raw);

        Ok(validate::validate(&raw, &request.known_locations)?)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;

    use super::*;
    use crate::extract::models::{Status, TriggerType};
    use crate::llm::CompletionProvider;

    struct StubProvider {
        reply: &'static str,
    }

    #[async_trait]
    impl CompletionProvider for StubProvider {
        async fn complete(
            &self,
            system_prompt: &str,
            user_message: &str,
        ) -> Result<String, TransportError> {
            assert!(system_prompt.contains("2025-06-16 15:00"));
            assert!(user_message.starts_with("Command: "));
            Ok(self.reply.to_string())
        }
    }

    struct FailingProvider;

    #[async_trait]
    impl CompletionProvider for FailingProvider {
        async fn complete(&self, _: &str, _: &str) -> Result<String, TransportError> {
            Err(TransportError::EmptyCompletion)
        }
    }

    fn request(known_locations: &[&str]) -> ExtractRequest {
        ExtractRequest {
            user_text: "Remind me to walk the dog in 3 hours".to_string(),
            current_time: "2025-06-16 15:00".to_string(),
            known_locations: known_locations.iter().map(|name| name.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn extracts_from_fenced_model_output() {
        let extractor = EntitiesExtractor::new(Arc::new(StubProvider {
            reply: "```json\n{\"text\":\"Walk the dog\",\"categoryType\":\"Routine\",\"triggers\":[{\"triggerType\":\"Time\",\"triggerValue\":\"2025-06-16 18:00\"}]}\n```",
        }));

        let result = extractor.extract(&request(&[])).await.unwrap();
        assert_eq!(result.status, Status::Success);
        assert_eq!(result.triggers[0].trigger_type, TriggerType::Time);
    }

    #[tokio::test]
    async fn malformed_model_output_surfaces_as_validation_error() {
        let extractor = EntitiesExtractor::new(Arc::new(StubProvider {
            reply: "The dog should be walked at six.",
        }));

        let err = extractor.extract(&request(&[])).await.unwrap_err();
        assert!(matches!(
            err,
            ExtractError::Validation(ResponseValidationError::Malformed(_))
        ));
    }

    #[tokio::test]
    async fn transport_errors_propagate_unretried() {
        let extractor = EntitiesExtractor::new(Arc::new(FailingProvider));

        let err = extractor.extract(&request(&[])).await.unwrap_err();
        assert!(matches!(err, ExtractError::Transport(_)));
    }
}
