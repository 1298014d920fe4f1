//! Answer Evaluator — scores a transcribed answer against the question,
//! an optional reference answer, and optional resume context.

use serde::Deserialize;
use tracing::warn;

use crate::errors::AppError;
use crate::interview::models::EvaluationResult;
use crate::interview::parse::parse_strict;
use crate::interview::prompts::EVALUATION_PROMPT;
use crate::llm_client::LlmClient;

/// Fixed neutral feedback used under the `NeutralDefault` policy.
pub const NEUTRAL_FEEDBACK: &str =
    "Unable to properly evaluate the answer due to a technical issue. Please try again.";

/// What to do when the model's evaluation reply cannot be obtained or
/// parsed. The two behaviors are deliberate per call site and must not be
/// unified: callers pick one explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseFailurePolicy {
    /// Fail the call. Used where a reference answer is mandatory and the
    /// caller has no sensible default.
    #[default]
    Propagate,
    /// Return a fixed neutral result so the interview flow is never
    /// blocked by a malformed model reply.
    NeutralDefault,
}

pub fn neutral_result() -> EvaluationResult {
    EvaluationResult {
        rating: 5.0,
        feedback: NEUTRAL_FEEDBACK.to_string(),
    }
}

pub struct EvaluationInput<'a> {
    pub question: &'a str,
    pub user_answer: &'a str,
    pub reference_answer: Option<&'a str>,
    pub resume_context: Option<&'a str>,
}

/// Builds the evaluation prompt, sends it, and decodes the strict
/// `{rating, feedback}` reply. Rating is clamped to [0, 10].
pub async fn evaluate(
    llm: &LlmClient,
    input: &EvaluationInput<'_>,
    policy: ParseFailurePolicy,
) -> Result<EvaluationResult, AppError> {
    let prompt = build_prompt(input);

    let raw = match llm.generate(&prompt).await {
        Ok(raw) => raw,
        Err(e) => {
            return fallback(policy, AppError::Llm(format!("Answer evaluation failed: {e}")))
        }
    };

    match parse_strict::<EvaluationResult>(&raw) {
        Some(mut result) => {
            result.rating = result.rating.clamp(0.0, 10.0);
            Ok(result)
        }
        None => fallback(
            policy,
            AppError::Llm("Model reply was not a parsable evaluation".to_string()),
        ),
    }
}

fn build_prompt(input: &EvaluationInput<'_>) -> String {
    let reference_block = match input.reference_answer {
        Some(reference) => format!("Reference Answer (expected): {reference}\n"),
        None => String::new(),
    };
    let resume_block = match input.resume_context {
        Some(resume) => format!("Candidate's Resume:\n{resume}\n"),
        None => String::new(),
    };
    EVALUATION_PROMPT
        .replace("{question}", input.question)
        .replace("{user_answer}", input.user_answer)
        .replace("{reference_block}", &reference_block)
        .replace("{resume_block}", &resume_block)
}

fn fallback(
    policy: ParseFailurePolicy,
    err: AppError,
) -> Result<EvaluationResult, AppError> {
    match policy {
        ParseFailurePolicy::Propagate => Err(err),
        ParseFailurePolicy::NeutralDefault => {
            warn!("returning neutral evaluation: {err}");
            Ok(neutral_result())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interview::parse::parse_strict;

    #[test]
    fn test_fenced_evaluation_parses_exactly() {
        let raw = "```json\n{\"rating\": 7, \"feedback\": \"Good but vague\"}\n```";
        let result: EvaluationResult = parse_strict(raw).unwrap();
        assert_eq!(result.rating, 7.0);
        assert_eq!(result.feedback, "Good but vague");
    }

    #[test]
    fn test_neutral_result_exact_value() {
        let result = neutral_result();
        assert_eq!(result.rating, 5.0);
        assert_eq!(
            result.feedback,
            "Unable to properly evaluate the answer due to a technical issue. Please try again."
        );
    }

    #[test]
    fn test_fallback_propagate_is_error() {
        let outcome = fallback(
            ParseFailurePolicy::Propagate,
            AppError::Llm("boom".to_string()),
        );
        assert!(outcome.is_err());
    }

    #[test]
    fn test_fallback_neutral_default_is_neutral() {
        let outcome = fallback(
            ParseFailurePolicy::NeutralDefault,
            AppError::Llm("boom".to_string()),
        )
        .unwrap();
        assert_eq!(outcome, neutral_result());
    }

    #[test]
    fn test_prompt_includes_optional_blocks() {
        let input = EvaluationInput {
            question: "Q1",
            user_answer: "A1",
            reference_answer: Some("REF"),
            resume_context: Some("RESUME"),
        };
        let prompt = build_prompt(&input);
        assert!(prompt.contains("Reference Answer (expected): REF"));
        assert!(prompt.contains("Candidate's Resume:\nRESUME"));
    }

    #[test]
    fn test_prompt_omits_absent_blocks() {
        let input = EvaluationInput {
            question: "Q1",
            user_answer: "A1",
            reference_answer: None,
            resume_context: None,
        };
        let prompt = build_prompt(&input);
        assert!(!prompt.contains("Reference Answer"));
        assert!(!prompt.contains("Candidate's Resume"));
    }

    #[test]
    fn test_policy_deserializes_from_snake_case() {
        let policy: ParseFailurePolicy = serde_json::from_str("\"neutral_default\"").unwrap();
        assert_eq!(policy, ParseFailurePolicy::NeutralDefault);
        assert_eq!(ParseFailurePolicy::default(), ParseFailurePolicy::Propagate);
    }
}
