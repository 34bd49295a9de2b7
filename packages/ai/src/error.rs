// ABOUTME: Error taxonomy for generation calls
// ABOUTME: Maps transport, provider, parsing, and polling failures into domain errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("failed to parse response: {0}")]
    Parse(String),

    #[error("empty result: {0}")]
    EmptyResult(String),

    #[error("operation timed out after {waited_secs}s")]
    Timeout { waited_secs: u64 },

    #[error("no API key configured")]
    MissingApiKey,
}

impl GenerationError {
    /// Whether retrying the same request could plausibly succeed.
    /// Parse failures need a different prompt, not another attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            GenerationError::Transport(_) => true,
            GenerationError::Api { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }
}

pub type GenerationResult<T> = Result<T, GenerationError>;
