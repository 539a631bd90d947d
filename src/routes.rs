use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::debug;

use crate::AppState;
use crate::extract::ExtractError;
use crate::extract::models::{ExtractRequest, ExtractionResult};
use crate::llm::TransportError;

pub async fn health() -> &'static str {
    "OK"
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid time format. Use 'YYYY-MM-DD HH:MM'")]
    InvalidCurrentTime,
    #[error(transparent)]
    Extract(#[from] ExtractError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            ApiError::InvalidCurrentTime => (StatusCode::UNPROCESSABLE_ENTITY, self.to_string()),
            ApiError::Extract(ExtractError::Validation(e)) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("Invalid LLM response format: {}", e),
            ),
            ApiError::Extract(ExtractError::Transport(TransportError::Status {
                status,
                detail,
            })) => (*status, format!("Model API error: {}", detail)),
            ApiError::Extract(ExtractError::Transport(e)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Text processing failed: {}", e),
            ),
        };
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

#[axum::debug_handler]
pub async fn extract_entities(
    State(state): State<AppState>,
    Json(request): Json<ExtractRequest>,
) -> Result<Json<ExtractionResult>, ApiError> {
    debug!("Received extraction request: {:?}", request);

    if request.parsed_current_time().is_err() {
        return Err(ApiError::InvalidCurrentTime);
    }

    let result = state.extractor.extract(&request).await?;
    Ok(Json(result))
}
