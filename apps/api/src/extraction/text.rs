use bytes::Bytes;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::errors::AppError;

/// Uploads larger than this are rejected before any parsing is attempted.
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

static BLANK_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").expect("valid regex"));

/// An uploaded document as received from the multipart form.
#[derive(Debug)]
pub struct UploadedFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Bytes,
}

#[derive(Debug, Serialize)]
pub struct FileInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    pub size: usize,
}

#[derive(Debug)]
pub struct ExtractedText {
    pub text: String,
    pub file_info: FileInfo,
}

enum FileKind {
    Pdf,
    Text,
}

/// A file counts as PDF or plain text if either the extension or the
/// declared MIME type says so.
fn classify(name: &str, mime_type: &str) -> Option<FileKind> {
    let name = name.to_lowercase();
    let mime_type = mime_type.to_lowercase();
    if name.ends_with(".pdf") || mime_type == "application/pdf" {
        Some(FileKind::Pdf)
    } else if name.ends_with(".txt") || mime_type == "text/plain" {
        Some(FileKind::Text)
    } else {
        None
    }
}

/// Validates an uploaded resume and extracts its plain text.
///
/// Validation order: file type first, then the size cap. Both rejections
/// are client errors, not faults. The returned text is never empty: an
/// upload that yields only whitespace is an extraction error.
pub fn extract_text(file: &UploadedFile) -> Result<ExtractedText, AppError> {
    let kind = classify(&file.name, &file.mime_type).ok_or_else(|| {
        AppError::Validation(
            "Invalid file type. Only PDF and TXT files are supported".to_string(),
        )
    })?;

    if file.bytes.len() > MAX_FILE_SIZE {
        return Err(AppError::Validation(
            "File too large. Maximum size is 10MB".to_string(),
        ));
    }

    let raw = match kind {
        FileKind::Text => {
            String::from_utf8(file.bytes.to_vec()).map_err(|e| AppError::Extraction {
                message: "Failed to decode text file as UTF-8".to_string(),
                details: Some(e.to_string()),
            })?
        }
        FileKind::Pdf => {
            pdf_extract::extract_text_from_mem(&file.bytes).map_err(|e| AppError::Extraction {
                message: "Failed to parse PDF file. Please ensure the file is not corrupted or password protected.".to_string(),
                details: Some(e.to_string()),
            })?
        }
    };

    let text = normalize_text(&raw);
    if text.is_empty() {
        return Err(AppError::Extraction {
            message: "No text could be extracted from the file".to_string(),
            details: None,
        });
    }

    Ok(ExtractedText {
        text,
        file_info: FileInfo {
            name: file.name.clone(),
            mime_type: file.mime_type.clone(),
            size: file.bytes.len(),
        },
    })
}

/// CRLF to LF, runs of 3+ newlines collapsed to exactly 2, ends trimmed.
pub fn normalize_text(raw: &str) -> String {
    let unix = raw.replace("\r\n", "\n");
    let collapsed = BLANK_RUN.replace_all(&unix, "\n\n");
    collapsed.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn txt_file(name: &str, mime: &str, content: &[u8]) -> UploadedFile {
        UploadedFile {
            name: name.to_string(),
            mime_type: mime.to_string(),
            bytes: Bytes::copy_from_slice(content),
        }
    }

    #[test]
    fn test_normalize_crlf_to_lf() {
        assert_eq!(normalize_text("line one\r\nline two"), "line one\nline two");
    }

    #[test]
    fn test_normalize_collapses_blank_runs() {
        assert_eq!(normalize_text("a\n\n\n\n\nb"), "a\n\nb");
    }

    #[test]
    fn test_normalize_keeps_double_newline() {
        assert_eq!(normalize_text("a\n\nb"), "a\n\nb");
    }

    #[test]
    fn test_normalize_trims_ends() {
        assert_eq!(normalize_text("  \n text \n  "), "text");
    }

    #[test]
    fn test_plain_text_roundtrip() {
        let file = txt_file("resume.txt", "text/plain", b"Skills: Rust\r\n\r\n\r\n\r\nDone");
        let extracted = extract_text(&file).unwrap();
        assert_eq!(extracted.text, "Skills: Rust\n\nDone");
        assert_eq!(extracted.file_info.size, file.bytes.len());
    }

    #[test]
    fn test_extension_alone_is_enough() {
        let file = txt_file("resume.txt", "application/octet-stream", b"content");
        assert!(extract_text(&file).is_ok());
    }

    #[test]
    fn test_mime_alone_is_enough() {
        let file = txt_file("resume", "text/plain", b"content");
        assert!(extract_text(&file).is_ok());
    }

    #[test]
    fn test_invalid_type_rejected_before_parsing() {
        let file = txt_file("resume.docx", "application/msword", b"whatever");
        let err = extract_text(&file).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(err.to_string().contains("Invalid file type"));
    }

    #[test]
    fn test_oversize_rejected() {
        let big = vec![b'a'; MAX_FILE_SIZE + 1];
        let file = txt_file("resume.txt", "text/plain", &big);
        let err = extract_text(&file).unwrap_err();
        assert!(err.to_string().contains("File too large"));
    }

    #[test]
    fn test_type_check_runs_before_size_check() {
        let big = vec![b'a'; MAX_FILE_SIZE + 1];
        let file = txt_file("resume.docx", "application/msword", &big);
        let err = extract_text(&file).unwrap_err();
        assert!(err.to_string().contains("Invalid file type"));
    }

    #[test]
    fn test_whitespace_only_is_extraction_error() {
        let file = txt_file("resume.txt", "text/plain", b"   \n\n   \n");
        let err = extract_text(&file).unwrap_err();
        assert!(matches!(err, AppError::Extraction { .. }));
        assert!(err.to_string().contains("No text could be extracted"));
    }

    #[test]
    fn test_corrupt_pdf_is_distinguishable_extraction_error() {
        let file = txt_file("resume.pdf", "application/pdf", b"not a real pdf");
        let err = extract_text(&file).unwrap_err();
        match err {
            AppError::Extraction { message, details } => {
                assert!(message.contains("corrupted or password protected"));
                assert!(details.is_some());
            }
            other => panic!("expected extraction error, got {other:?}"),
        }
    }
}
