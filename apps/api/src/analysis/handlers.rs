use axum::Json;
use serde::Deserialize;

use crate::analysis::analyzer::{analyze_resume_text, ResumeProfile};

#[derive(Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
}

/// POST /api/v1/resume/analyze
/// Pure heuristic analysis; never fails, worst case returns defaults.
pub async fn handle_analyze_resume(Json(req): Json<AnalyzeRequest>) -> Json<ResumeProfile> {
    Json(analyze_resume_text(&req.text))
}
