// ABOUTME: HTTP request handlers for the saved-projects gallery
// ABOUTME: Read and delete only; runs are recorded by the pipeline itself

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json as ResponseJson},
};
use tracing::{error, info};

use crate::response::{ApiError, ApiResponse};
use crate::AppState;

/// List saved runs, newest first
pub async fn list_projects(State(state): State<AppState>) -> impl IntoResponse {
    let projects = state.repository.list().await;
    info!("Retrieved {} saved projects", projects.len());
    (StatusCode::OK, ResponseJson(ApiResponse::success(projects))).into_response()
}

/// Get a specific saved run by ID
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    info!("Getting saved project with ID: {}", id);

    match state.repository.get(&id).await {
        Some(project) => {
            info!("Found saved project: {}", project.data.title);
            (StatusCode::OK, ResponseJson(ApiResponse::success(project))).into_response()
        }
        None => {
            info!("Saved project not found: {}", id);
            (
                StatusCode::NOT_FOUND,
                ResponseJson(ApiResponse::<()>::error("Project not found".to_string())),
            )
                .into_response()
        }
    }
}

/// Delete a saved run
pub async fn delete_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    info!("Deleting saved project: {}", id);

    match state.repository.delete(&id).await {
        Ok(()) => {
            info!("Deleted saved project: {}", id);
            (
                StatusCode::OK,
                ResponseJson(ApiResponse::success("Project deleted successfully")),
            )
                .into_response()
        }
        Err(e) => {
            error!("Failed to delete saved project {}: {}", id, e);
            ApiError::from(e).into_response()
        }
    }
}
