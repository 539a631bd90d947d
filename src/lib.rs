use std::sync::Arc;

use crate::extract::EntitiesExtractor;

pub mod extract;
pub mod llm;
pub mod routes;

#[derive(Clone)]
pub struct AppState {
    pub extractor: Arc<EntitiesExtractor>,
}
