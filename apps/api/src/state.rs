use std::sync::Arc;

use sqlx::PgPool;

use crate::llm_client::AiClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Pluggable AI transport. Production wires `GeminiClient`; tests inject stubs.
    pub ai: Arc<dyn AiClient>,
}
