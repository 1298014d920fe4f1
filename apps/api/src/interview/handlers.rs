use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::emotion::models::{mean_confidence, EmotionSample};
use crate::errors::AppError;
use crate::interview::evaluator::{evaluate, EvaluationInput, ParseFailurePolicy};
use crate::interview::generator::{generate_follow_up, generate_initial};
use crate::interview::models::{EvaluationResult, InterviewQuestion};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct GenerateRequest {
    pub resume_text: String,
    pub count: Option<u32>,
}

#[derive(Serialize)]
pub struct QuestionBatchResponse {
    pub questions: Vec<InterviewQuestion>,
}

/// POST /api/v1/questions/generate
pub async fn handle_generate_questions(
    State(state): State<AppState>,
    Json(req): Json<GenerateRequest>,
) -> Result<Json<QuestionBatchResponse>, AppError> {
    if req.resume_text.trim().is_empty() {
        return Err(AppError::Validation(
            "resume_text must not be empty".to_string(),
        ));
    }
    let count = req.count.unwrap_or(state.config.question_count);
    let questions = generate_initial(&state.llm, &req.resume_text, count).await?;
    Ok(Json(QuestionBatchResponse { questions }))
}

#[derive(Deserialize)]
pub struct FollowUpRequest {
    pub answer_text: String,
    pub count: Option<u32>,
}

/// POST /api/v1/questions/follow-up
pub async fn handle_follow_up(
    State(state): State<AppState>,
    Json(req): Json<FollowUpRequest>,
) -> Result<Json<QuestionBatchResponse>, AppError> {
    if req.answer_text.trim().is_empty() {
        return Err(AppError::Validation(
            "answer_text must not be empty".to_string(),
        ));
    }
    let count = req.count.unwrap_or(1);
    let questions = generate_follow_up(&state.llm, &req.answer_text, count).await?;
    Ok(Json(QuestionBatchResponse { questions }))
}

#[derive(Deserialize)]
pub struct EvaluateRequest {
    pub question: String,
    pub user_answer: String,
    #[serde(default)]
    pub reference_answer: Option<String>,
    #[serde(default)]
    pub resume_context: Option<String>,
    /// Per-call-site failure policy. Defaults to propagate.
    #[serde(default)]
    pub on_parse_failure: ParseFailurePolicy,
    /// Webcam-derived samples the client accumulated for this question.
    #[serde(default)]
    pub emotion_samples: Vec<EmotionSample>,
}

#[derive(Serialize)]
pub struct EvaluateResponse {
    #[serde(flatten)]
    pub evaluation: EvaluationResult,
    /// Arithmetic mean of the supplied samples' confidence scores.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence_score: Option<f64>,
}

/// POST /api/v1/answers/evaluate
pub async fn handle_evaluate_answer(
    State(state): State<AppState>,
    Json(req): Json<EvaluateRequest>,
) -> Result<Json<EvaluateResponse>, AppError> {
    if req.user_answer.trim().is_empty() {
        return Err(AppError::Validation(
            "user_answer must not be empty".to_string(),
        ));
    }

    let input = EvaluationInput {
        question: &req.question,
        user_answer: &req.user_answer,
        reference_answer: req.reference_answer.as_deref(),
        resume_context: req.resume_context.as_deref(),
    };
    let evaluation = evaluate(&state.llm, &input, req.on_parse_failure).await?;

    let confidence_score = if req.emotion_samples.is_empty() {
        None
    } else {
        Some(mean_confidence(&req.emotion_samples))
    };

    Ok(Json(EvaluateResponse {
        evaluation,
        confidence_score,
    }))
}
