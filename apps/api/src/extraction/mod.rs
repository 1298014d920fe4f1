//! Resume upload ingestion: file validation, text extraction, normalization.

pub mod handlers;
pub mod text;
