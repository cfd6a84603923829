use thiserror::Error;

#[derive(Error, Debug)]
pub enum RockAiError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("GEMINI_API_KEY is not set. Export it, put it in .env, or add \"api_key\" to ~/.config/rock-ai/config.json")]
    MissingApiKey,

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Could not decode image: {0}")]
    ImageDecode(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Model response does not match the schema: {0}")]
    SchemaViolation(String),

    // Inner error is formatted inline, not exposed as `source()`
    #[error("JSON error: {0}")]
    Json(serde_json::Error),

    #[error("IO error: {0}")]
    Io(std::io::Error),
}

impl From<serde_json::Error> for RockAiError {
    fn from(err: serde_json::Error) -> Self {
        RockAiError::Json(err)
    }
}

impl From<std::io::Error> for RockAiError {
    fn from(err: std::io::Error) -> Self {
        RockAiError::Io(err)
    }
}

/// Parse and validation failures from the shared crate all mean the model
/// answered outside the contract.
impl From<rock_ai_common::Error> for RockAiError {
    fn from(err: rock_ai_common::Error) -> Self {
        RockAiError::SchemaViolation(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RockAiError>;
