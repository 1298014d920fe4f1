use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Errors at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    /// How many questions the initial resume-derived batch asks for.
    pub question_count: u32,
    /// Base URL of the emotion-analysis collaborator service.
    pub emotion_service_url: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            question_count: std::env::var("QUESTION_COUNT")
                .unwrap_or_else(|_| "5".to_string())
                .parse::<u32>()
                .context("QUESTION_COUNT must be a positive integer")?,
            emotion_service_url: std::env::var("EMOTION_SERVICE_URL")
                .unwrap_or_else(|_| "http://localhost:3001".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
