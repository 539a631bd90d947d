use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use thiserror::Error;
use tracing::debug;

use crate::llm::ygpt::models::{
    CompletionOptions, CompletionRequest, CompletionResponse, InputMessage,
};
use crate::llm::{CompletionProvider, TransportError};

pub mod models;

const YGPT_API_BASE_URL: &str = "https://llm.api.cloud.yandex.net/foundationModels/v1";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IAM token for the model API is not configured")]
    MissingIamToken,
    #[error("folder id for the model API is not configured")]
    MissingFolderId,
    #[error("model API credential is not usable in an HTTP header")]
    InvalidCredential,
    #[error("failed to construct the model API client: {0}")]
    Client(#[from] reqwest::Error),
}

pub struct YgptHttpClient {
    client: reqwest::Client,
    folder_id: String,
    pub model: String,
}

impl YgptHttpClient {
    pub fn try_new(iam_token: &str, folder_id: &str, model: &str) -> Result<Self, ConfigError> {
        if iam_token.is_empty() {
            return Err(ConfigError::MissingIamToken);
        }
        if folder_id.is_empty() {
            return Err(ConfigError::MissingFolderId);
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            "Authorization",
            HeaderValue::from_str(&format!("Bearer {}", iam_token))
                .map_err(|_| ConfigError::InvalidCredential)?,
        );
        headers.insert(
            "x-folder-id",
            HeaderValue::from_str(folder_id).map_err(|_| ConfigError::InvalidCredential)?,
        );

        let client = reqwest::Client::builder()
            .user_agent("reminder-extract/0.1")
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            folder_id: folder_id.to_string(),
            model: model.to_string(),
        })
    }

    pub fn post(&self, endpoint: &str) -> reqwest::RequestBuilder {
        self.client.post(self.make_url(endpoint))
    }

    fn make_url(&self, endpoint: &str) -> String {
        if !endpoint.starts_with('/') {
            format!("{}/{}", YGPT_API_BASE_URL, endpoint)
        } else {
            format!("{}{}", YGPT_API_BASE_URL, endpoint)
        }
    }

    fn model_uri(&self) -> String {
        format!("gpt://{}/{}", self.folder_id, self.model)
    }
}

pub async fn completion_create(
    client: &YgptHttpClient,
    request: CompletionRequest,
) -> Result<CompletionResponse, TransportError> {
    debug!("Sending completion request: {:#?}", request);
    let response = client.post("/completion").json(&request).send().await?;
    let status = response.status();
    let text = response.text().await?;
    debug!("Model API response: {}", text);

    if !status.is_success() {
        return Err(TransportError::Status {
            status,
            detail: text,
        });
    }

    Ok(serde_json::from_str(&text)?)
}

#[async_trait]
impl CompletionProvider for YgptHttpClient {
    async fn complete(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<String, TransportError> {
        let request = CompletionRequest {
            model_uri: self.model_uri(),
            completion_options: CompletionOptions {
                stream: false,
                temperature: 0.1,
                max_tokens: 1000,
            },
            messages: vec![
                InputMessage {
                    role: "system".to_string(),
                    text: system_prompt.to_string(),
                },
                InputMessage {
                    role: "user".to_string(),
                    text: user_message.to_string(),
                },
            ],
        };

        let response = completion_create(self, request).await?;
        let alternative = response
            .result
            .alternatives
            .into_iter()
            .next()
            .ok_or(TransportError::EmptyCompletion)?;

        Ok(alternative.message.text)
    }
}
