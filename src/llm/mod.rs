pub mod ygpt;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request to the model API failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("model API returned {status}: {detail}")]
    Status {
        status: reqwest::StatusCode,
        detail: String,
    },
    #[error("failed to decode model API response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("model API returned no completion alternatives")]
    EmptyCompletion,
}

pub type Provider = dyn CompletionProvider + Send + Sync;

/// A single-shot completion against an LLM backend.
#[async_trait]
pub trait CompletionProvider {
    async fn complete(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<String, TransportError>;
}
