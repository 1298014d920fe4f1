use serde::{Deserialize, Serialize};

/// A single interview question owned by the interview session. The
/// question list is append-only and never reordered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InterviewQuestion {
    #[serde(alias = "Question")]
    pub question: String,
    /// Authoritative for evaluation of the initial resume-derived batch.
    /// For follow-ups it is only the model's own suggested answer.
    #[serde(rename = "answer", alias = "Answer")]
    pub reference_answer: String,
    /// false for the resume-derived batch, true for follow-ups generated
    /// from a prior answer.
    #[serde(rename = "isGenerated", default)]
    pub is_generated: bool,
}

/// Immutable per-answer evaluation. Rating is kept within [0, 10].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EvaluationResult {
    pub rating: f64,
    pub feedback: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_deserializes_capitalized_fields() {
        let json = r#"{"Question": "What is ownership?", "Answer": "Move semantics."}"#;
        let q: InterviewQuestion = serde_json::from_str(json).unwrap();
        assert_eq!(q.question, "What is ownership?");
        assert_eq!(q.reference_answer, "Move semantics.");
        assert!(!q.is_generated);
    }

    #[test]
    fn test_question_deserializes_lowercase_fields() {
        let json = r#"{"question": "Explain lifetimes", "answer": "Borrow scopes."}"#;
        let q: InterviewQuestion = serde_json::from_str(json).unwrap();
        assert_eq!(q.question, "Explain lifetimes");
        assert_eq!(q.reference_answer, "Borrow scopes.");
    }

    #[test]
    fn test_question_serializes_wire_names() {
        let q = InterviewQuestion {
            question: "Q".to_string(),
            reference_answer: "A".to_string(),
            is_generated: true,
        };
        let value = serde_json::to_value(&q).unwrap();
        assert_eq!(value["answer"], "A");
        assert_eq!(value["isGenerated"], true);
    }

    #[test]
    fn test_evaluation_result_roundtrip() {
        let json = r#"{"rating": 7, "feedback": "Good but vague"}"#;
        let result: EvaluationResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.rating, 7.0);
        assert_eq!(result.feedback, "Good but vague");
    }
}
