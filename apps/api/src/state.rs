use std::sync::Arc;

use crate::config::Config;
use crate::emotion::feed::EmotionFeed;
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmClient,
    /// Session-wide emotion sample source with its Live/Simulated mode.
    pub emotion: Arc<EmotionFeed>,
    pub config: Config,
}
