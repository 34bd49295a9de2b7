// ABOUTME: HTTP request handlers for the top-level view register
// ABOUTME: Every transition goes through the single navigate dispatcher

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json as ResponseJson},
    Json,
};
use serde::Deserialize;
use tracing::info;

use blueprint_core::{navigate, ViewState};

use crate::response::ApiResponse;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct NavigateRequest {
    pub target: ViewState,
}

/// The screen the client should currently show
pub async fn current_view(State(state): State<AppState>) -> impl IntoResponse {
    let view = *state.view.read().await;
    (StatusCode::OK, ResponseJson(ApiResponse::success(view))).into_response()
}

/// Move the register to the requested screen
pub async fn navigate_to(
    State(state): State<AppState>,
    Json(request): Json<NavigateRequest>,
) -> impl IntoResponse {
    let mut view = state.view.write().await;
    let next = navigate(*view, request.target);
    *view = next;
    info!("View changed to {}", next);

    (StatusCode::OK, ResponseJson(ApiResponse::success(next))).into_response()
}
