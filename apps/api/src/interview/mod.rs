//! Interview question generation and answer evaluation against the
//! external generative model.

pub mod evaluator;
pub mod generator;
pub mod handlers;
pub mod models;
pub mod parse;
pub mod prompts;
