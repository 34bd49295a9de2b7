// ABOUTME: Shared API response types and error handling
// ABOUTME: Provides consistent response format across all API endpoints

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json as ResponseJson},
};
use serde::Serialize;
use thiserror::Error;

use blueprint_ai::GenerationError;
use blueprint_interview::InterviewError;
use blueprint_pipeline::PipelineError;
use blueprint_storage::StorageError;

/// Standard API response wrapper
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        ApiResponse {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: String) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(message),
        }
    }
}

/// Request-level failure from any domain package, carried to one envelope
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("no interview is in progress")]
    NoInterview,

    #[error("the interview has not produced a finalized project yet")]
    InterviewIncomplete,

    #[error(transparent)]
    Interview(#[from] InterviewError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Generation(#[from] GenerationError),
}

/// Upstream model failures surface as gateway errors; everything else
/// (parse, empty result) is on us.
fn generation_status(error: &GenerationError) -> StatusCode {
    match error {
        GenerationError::Transport(_)
        | GenerationError::Api { .. }
        | GenerationError::Timeout { .. } => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Convert domain errors to HTTP responses
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            ApiError::NoInterview => StatusCode::NOT_FOUND,
            ApiError::InterviewIncomplete => StatusCode::BAD_REQUEST,
            ApiError::Interview(InterviewError::Validation(_)) => StatusCode::BAD_REQUEST,
            ApiError::Interview(InterviewError::InvalidState(_)) => StatusCode::CONFLICT,
            ApiError::Interview(InterviewError::Incomplete(_)) => StatusCode::BAD_REQUEST,
            ApiError::Interview(InterviewError::Generation(e)) => generation_status(e),
            ApiError::Pipeline(PipelineError::RunActive(_)) => StatusCode::CONFLICT,
            ApiError::Pipeline(PipelineError::NoProject) => StatusCode::NOT_FOUND,
            ApiError::Pipeline(PipelineError::Superseded) => StatusCode::CONFLICT,
            ApiError::Pipeline(PipelineError::Generation(e)) => generation_status(e),
            ApiError::Storage(StorageError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Generation(e) => generation_status(e),
        };

        (
            status,
            ResponseJson(ApiResponse::<()>::error(self.to_string())),
        )
            .into_response()
    }
}
