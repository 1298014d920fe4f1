use axum::{
    extract::{FromRequest, Multipart, Request, State},
    http::header::CONTENT_TYPE,
    Json,
};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::Deserialize;
use tracing::error;

use crate::emotion::classifier;
use crate::emotion::feed::FeedSample;
use crate::emotion::models::EmotionSample;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Deserialize)]
struct AnalyzeEmotionRequest {
    #[serde(rename = "imageData")]
    image_data: String,
}

/// POST /analyze-emotion
/// Accepts either a multipart upload (field `image`) or a JSON body with
/// a base64 `imageData` string, possibly carrying a data-URL prefix.
/// The 200 body is the sample itself: `{timestamp, expressions,
/// confidenceMetrics}`, the same shape the feed reads back.
pub async fn handle_analyze_emotion(request: Request) -> Result<Json<EmotionSample>, AppError> {
    let image_base64 = extract_image(request).await?;

    let sample = classifier::classify(&image_base64).await.map_err(|e| {
        error!("emotion classification failed: {e}");
        AppError::Emotion {
            message: e.to_string(),
        }
    })?;

    Ok(Json(sample))
}

async fn extract_image(request: Request) -> Result<String, AppError> {
    let is_multipart = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.starts_with("multipart/form-data"))
        .unwrap_or(false);

    if is_multipart {
        let mut multipart = Multipart::from_request(request, &())
            .await
            .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?;
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read multipart field: {e}")))?
        {
            if field.name() == Some("image") {
                let bytes = field.bytes().await.map_err(|e| {
                    AppError::Validation(format!("Failed to read image field: {e}"))
                })?;
                if bytes.is_empty() {
                    return Err(AppError::Validation("Image field is empty".to_string()));
                }
                return Ok(BASE64.encode(&bytes));
            }
        }
        return Err(AppError::Validation(
            "No 'image' field in multipart body".to_string(),
        ));
    }

    let Json(body): Json<AnalyzeEmotionRequest> = Json::from_request(request, &())
        .await
        .map_err(|e| AppError::Validation(format!("Invalid JSON body: {e}")))?;
    let image = strip_data_url_prefix(&body.image_data);
    if image.is_empty() {
        return Err(AppError::Validation("imageData is empty".to_string()));
    }
    Ok(image.to_string())
}

/// Browsers send canvas captures as `data:image/jpeg;base64,<payload>`.
fn strip_data_url_prefix(image_data: &str) -> &str {
    match image_data.split_once(";base64,") {
        Some((prefix, payload)) if prefix.starts_with("data:") => payload,
        _ => image_data,
    }
}

#[derive(Deserialize, Default)]
pub struct SampleRequest {
    #[serde(rename = "imageData", default)]
    pub image_data: Option<String>,
}

/// POST /api/v1/emotion/sample
/// Pulls the next sample from the feed. With no image (or a degraded
/// feed) the sample is synthetic; the response says which.
pub async fn handle_emotion_sample(
    State(state): State<AppState>,
    body: Option<Json<SampleRequest>>,
) -> Json<FeedSample> {
    let request = body.map(|Json(r)| r).unwrap_or_default();
    let image = request
        .image_data
        .as_deref()
        .map(strip_data_url_prefix)
        .filter(|s| !s.is_empty());
    Json(state.emotion.next_sample(image).await)
}
