// ABOUTME: Error types for the interview engine
// ABOUTME: Validation errors re-prompt locally; generation errors propagate to the caller

use blueprint_ai::GenerationError;
use blueprint_core::FinalizeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InterviewError {
    /// User input failed local validation; the open question stands
    #[error("Validation error: {0}")]
    Validation(String),

    /// The operation is not legal in the session's current state
    #[error("Invalid interview state: {0}")]
    InvalidState(String),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Incomplete(#[from] FinalizeError),
}

pub type InterviewResult<T> = Result<T, InterviewError>;
