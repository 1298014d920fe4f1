pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::emotion::handlers as emotion;
use crate::extraction::handlers as extraction;
use crate::interview::handlers as interview;
use crate::state::AppState;

/// Uploads are capped at 10 MiB by the extractor. The request body limit
/// sits just above that so an oversize file reaches the size check and
/// gets a 400 with a message, not a bare 413.
const UPLOAD_BODY_LIMIT: usize = 12 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resume ingestion
        .route("/api/parse-resume", post(extraction::handle_parse_resume))
        .route("/api/v1/resume/analyze", post(analysis::handle_analyze_resume))
        // Interview questions and evaluation
        .route(
            "/api/v1/questions/generate",
            post(interview::handle_generate_questions),
        )
        .route(
            "/api/v1/questions/follow-up",
            post(interview::handle_follow_up),
        )
        .route(
            "/api/v1/answers/evaluate",
            post(interview::handle_evaluate_answer),
        )
        // Emotion analysis
        .route("/analyze-emotion", post(emotion::handle_analyze_emotion))
        .route("/api/v1/emotion/sample", post(emotion::handle_emotion_sample))
        .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT))
        .with_state(state)
}
