//! Best-effort heuristic resume analysis: keyword and regex extraction,
//! not NLP. No ranking or classification-confidence guarantees.

pub mod analyzer;
pub mod handlers;
pub mod vocab;
