use axum::{
    extract::{multipart::MultipartError, Multipart},
    http::{header, HeaderName, StatusCode},
    Json,
};
use serde_json::{json, Value};
use tracing::info;

use crate::errors::AppError;
use crate::extraction::text::{extract_text, UploadedFile};

type NoStore = [(HeaderName, &'static str); 1];

const NO_STORE: NoStore = [(header::CACHE_CONTROL, "no-store, no-cache, must-revalidate")];

/// POST /api/parse-resume
/// Multipart form with a `file` field. Responses are never cached.
pub async fn handle_parse_resume(
    mut multipart: Multipart,
) -> Result<(NoStore, Json<Value>), AppError> {
    let mut file: Option<UploadedFile> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() == Some("file") {
            let name = field.file_name().unwrap_or_default().to_string();
            let mime_type = field.content_type().unwrap_or_default().to_string();
            let bytes = field.bytes().await.map_err(multipart_error)?;
            file = Some(UploadedFile {
                name,
                mime_type,
                bytes,
            });
        }
    }

    let file = file.ok_or_else(|| AppError::Validation("No file provided".to_string()))?;
    info!(
        name = %file.name,
        mime = %file.mime_type,
        size = file.bytes.len(),
        "processing uploaded resume"
    );

    let extracted = extract_text(&file)?;

    Ok((
        NO_STORE,
        Json(json!({
            "success": true,
            "text": extracted.text,
            "fileInfo": extracted.file_info,
        })),
    ))
}

/// A body over the request limit surfaces as a 413-class stream error
/// mid-read; it gets the same size message as a file that passed the
/// stream but failed the extractor's own cap.
fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::Validation("File too large. Maximum size is 10MB".to_string())
    } else {
        AppError::Validation(format!("Invalid form data: {}", e.body_text()))
    }
}
