use std::{env, sync::Arc};

use anyhow::Result;
use axum::Router;
use axum::routing::{get, post};
use dotenv::dotenv;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::info;

use reminder_extract::extract::EntitiesExtractor;
use reminder_extract::llm::ygpt::YgptHttpClient;
use reminder_extract::{AppState, routes};

#[derive(Debug, Error)]
enum MissingEnvironmentVariable {
    #[error("YGPT_IAM_TOKEN environment variable must be set")]
    IamToken,
    #[error("YGPT_FOLDER_ID environment variable must be set")]
    FolderId,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let iam_token =
        env::var("YGPT_IAM_TOKEN").map_err(|_| MissingEnvironmentVariable::IamToken)?;
    let folder_id =
        env::var("YGPT_FOLDER_ID").map_err(|_| MissingEnvironmentVariable::FolderId)?;
    let model = env::var("YGPT_MODEL").unwrap_or("yandexgpt-lite".to_string());

    let ygpt_client = Arc::new(YgptHttpClient::try_new(&iam_token, &folder_id, &model)?);
    info!("Using model: {}", ygpt_client.model);

    let extractor = Arc::new(EntitiesExtractor::new(ygpt_client));
    let state = AppState { extractor };

    let app = Router::new()
        .route("/_health", get(routes::health))
        .route("/entities/get_from_text", post(routes::extract_entities))
        .with_state(state);

    let listener = TcpListener::bind("0.0.0.0:3000").await?;
    axum::serve(listener, app).await?;

    Ok(())
}
