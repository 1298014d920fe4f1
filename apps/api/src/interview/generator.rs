//! Question Generator — builds prompts from resume text or a prior answer
//! and decodes the model reply into interview questions.

use tracing::warn;

use crate::errors::AppError;
use crate::interview::models::InterviewQuestion;
use crate::interview::parse::{parse_question_array, ModelJson};
use crate::interview::prompts::{FOLLOW_UP_PROMPT, INITIAL_QUESTIONS_PROMPT};
use crate::llm_client::LlmClient;

/// Generates the initial resume-derived question batch. Items carry
/// `is_generated = false` and their reference answers are authoritative.
pub async fn generate_initial(
    llm: &LlmClient,
    resume_text: &str,
    count: u32,
) -> Result<Vec<InterviewQuestion>, AppError> {
    let prompt = INITIAL_QUESTIONS_PROMPT
        .replace("{resume_text}", resume_text)
        .replace("{count}", &count.to_string());
    let raw = llm
        .generate(&prompt)
        .await
        .map_err(|e| AppError::Llm(format!("Question generation failed: {e}")))?;
    decode_batch(&raw, false)
}

/// Generates follow-up questions from a prior answer. Items carry
/// `is_generated = true` so evaluation knows there is no authoritative
/// reference answer.
pub async fn generate_follow_up(
    llm: &LlmClient,
    prior_answer: &str,
    count: u32,
) -> Result<Vec<InterviewQuestion>, AppError> {
    let prompt = FOLLOW_UP_PROMPT
        .replace("{prior_answer}", prior_answer)
        .replace("{count}", &count.to_string());
    let raw = llm
        .generate(&prompt)
        .await
        .map_err(|e| AppError::Llm(format!("Follow-up generation failed: {e}")))?;
    decode_batch(&raw, true)
}

/// On `Failed` the whole operation fails and no questions are added —
/// never substitute fabricated questions for an unparsable reply.
fn decode_batch(raw: &str, is_generated: bool) -> Result<Vec<InterviewQuestion>, AppError> {
    match parse_question_array(raw) {
        ModelJson::Parsed(items) => Ok(mark(items, is_generated)),
        ModelJson::Salvaged(items) => {
            warn!(
                "model reply required salvage parsing ({} items)",
                items.len()
            );
            Ok(mark(items, is_generated))
        }
        ModelJson::Failed => Err(AppError::Llm(
            "Model reply was not a parsable question array".to_string(),
        )),
    }
}

fn mark(mut items: Vec<InterviewQuestion>, is_generated: bool) -> Vec<InterviewQuestion> {
    for item in &mut items {
        item.is_generated = is_generated;
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_batch_marks_follow_ups() {
        let raw = r#"[{"question": "Q", "answer": "A"}]"#;
        let items = decode_batch(raw, true).unwrap();
        assert!(items[0].is_generated);
    }

    #[test]
    fn test_decode_batch_initial_not_marked() {
        let raw = r#"[{"question": "Q", "answer": "A", "isGenerated": true}]"#;
        // The flag is owned by the call site, not the model.
        let items = decode_batch(raw, false).unwrap();
        assert!(!items[0].is_generated);
    }

    #[test]
    fn test_decode_batch_failure_adds_nothing() {
        let err = decode_batch("no questions here", false).unwrap_err();
        assert!(matches!(err, AppError::Llm(_)));
    }

    #[test]
    fn test_prompt_embeds_count_and_resume() {
        let prompt = INITIAL_QUESTIONS_PROMPT
            .replace("{resume_text}", "RESUME BODY")
            .replace("{count}", "5");
        assert!(prompt.contains("RESUME BODY"));
        assert!(prompt.contains("provide 5 interview questions"));
    }
}
