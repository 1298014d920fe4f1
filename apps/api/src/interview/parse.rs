//! Decoding of best-effort structured model replies: a strict JSON pass
//! followed by an explicit regex salvage pass, with a tagged outcome so
//! callers never mix the two silently.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;

use crate::interview::models::InterviewQuestion;

static QUESTION_FIELD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)"question"\s*:\s*"((?:[^"\\]|\\.)*)""#).expect("valid regex")
});
static ANSWER_FIELD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)"answer"\s*:\s*"((?:[^"\\]|\\.)*)""#).expect("valid regex")
});

/// Outcome of decoding a model reply.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelJson<T> {
    /// Strict serde decode succeeded.
    Parsed(T),
    /// Strict decode failed but the regex salvage pass recovered a value.
    Salvaged(T),
    /// Neither pass produced a usable value.
    Failed,
}

impl<T> ModelJson<T> {
    pub fn into_option(self) -> Option<T> {
        match self {
            ModelJson::Parsed(value) | ModelJson::Salvaged(value) => Some(value),
            ModelJson::Failed => None,
        }
    }

    pub fn is_salvaged(&self) -> bool {
        matches!(self, ModelJson::Salvaged(_))
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

/// Strict decode of a fenced-or-bare JSON payload.
pub fn parse_strict<T: DeserializeOwned>(raw: &str) -> Option<T> {
    serde_json::from_str(strip_json_fences(raw)).ok()
}

/// Decodes a model reply expected to be a JSON array of question/answer
/// pairs. Strict parse first; on failure, salvage by matching `"question"`
/// and `"answer"` string fields positionally. A count mismatch fails the
/// whole reply: the caller must not substitute fabricated questions.
pub fn parse_question_array(raw: &str) -> ModelJson<Vec<InterviewQuestion>> {
    if let Some(items) = parse_strict::<Vec<InterviewQuestion>>(raw) {
        return ModelJson::Parsed(items);
    }

    let body = strip_json_fences(raw);
    let questions: Vec<String> = QUESTION_FIELD
        .captures_iter(body)
        .map(|c| unescape(&c[1]))
        .collect();
    let answers: Vec<String> = ANSWER_FIELD
        .captures_iter(body)
        .map(|c| unescape(&c[1]))
        .collect();

    if questions.is_empty() || questions.len() != answers.len() {
        return ModelJson::Failed;
    }

    ModelJson::Salvaged(
        questions
            .into_iter()
            .zip(answers)
            .map(|(question, reference_answer)| InterviewQuestion {
                question,
                reference_answer,
                is_generated: false,
            })
            .collect(),
    )
}

/// Undoes the JSON string escapes the salvage regex leaves in place.
fn unescape(s: &str) -> String {
    s.replace("\\\"", "\"")
        .replace("\\n", "\n")
        .replace("\\\\", "\\")
}
