// ABOUTME: HTTP request handlers for the scoping interview
// ABOUTME: One session slot behind a mutex; every transition goes through the engine

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json as ResponseJson},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use blueprint_core::ProjectData;
use blueprint_interview::{InterviewProgress, InterviewSession, InterviewTurn};

use crate::response::{ApiError, ApiResponse};
use crate::AppState;

/// One turn of the interview as the client sees it. `project` is only
/// present on the completing turn.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnReply {
    pub turn: InterviewTurn,
    pub progress: InterviewProgress,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<ProjectData>,
}

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub answer: String,
}

#[derive(Debug, Deserialize)]
pub struct AcceptSuggestionRequest {
    pub index: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeSuggestionRequest {
    pub index: usize,
    #[serde(default)]
    pub current_input: String,
}

#[derive(Debug, Serialize)]
pub struct MergedAnswer {
    pub merged: String,
}

#[derive(Debug, Deserialize)]
pub struct VoiceUpdateRequest {
    pub field: String,
    pub value: String,
}

fn turn_reply(session: &InterviewSession, turn: InterviewTurn) -> TurnReply {
    let project = match &turn {
        InterviewTurn::Complete => session.completed_data(),
        InterviewTurn::Question(_) => None,
    };
    TurnReply {
        turn,
        progress: session.progress(),
        project,
    }
}

/// Start a fresh interview, discarding any previous session
pub async fn start_interview(State(state): State<AppState>) -> impl IntoResponse {
    info!("Starting a new scoping interview");

    let mut guard = state.interview.lock().await;
    let session = guard.insert(InterviewSession::new(Arc::clone(&state.client)));

    match session.next_question().await {
        Ok(turn) => {
            let reply = turn_reply(session, turn);
            (StatusCode::OK, ResponseJson(ApiResponse::success(reply))).into_response()
        }
        Err(e) => {
            error!("Failed to fetch the opening question: {}", e);
            *guard = None;
            ApiError::from(e).into_response()
        }
    }
}

/// Submit an answer for the open question and advance to the next turn
pub async fn submit_answer(
    State(state): State<AppState>,
    Json(request): Json<AnswerRequest>,
) -> impl IntoResponse {
    let mut guard = state.interview.lock().await;
    let Some(session) = guard.as_mut() else {
        return ApiError::NoInterview.into_response();
    };

    if let Err(e) = session.submit(&request.answer).await {
        return ApiError::from(e).into_response();
    }

    match session.next_question().await {
        Ok(turn) => {
            let reply = turn_reply(session, turn);
            (StatusCode::OK, ResponseJson(ApiResponse::success(reply))).into_response()
        }
        Err(e) => {
            error!("Failed to fetch the next question: {}", e);
            ApiError::from(e).into_response()
        }
    }
}

/// Skip the open question if the field is optional
pub async fn skip_question(State(state): State<AppState>) -> impl IntoResponse {
    let mut guard = state.interview.lock().await;
    let Some(session) = guard.as_mut() else {
        return ApiError::NoInterview.into_response();
    };

    if let Err(e) = session.skip() {
        return ApiError::from(e).into_response();
    }

    match session.next_question().await {
        Ok(turn) => {
            let reply = turn_reply(session, turn);
            (StatusCode::OK, ResponseJson(ApiResponse::success(reply))).into_response()
        }
        Err(e) => {
            error!("Failed to fetch the next question: {}", e);
            ApiError::from(e).into_response()
        }
    }
}

/// Accept one of the open question's suggestions as the full answer
pub async fn accept_suggestion(
    State(state): State<AppState>,
    Json(request): Json<AcceptSuggestionRequest>,
) -> impl IntoResponse {
    let mut guard = state.interview.lock().await;
    let Some(session) = guard.as_mut() else {
        return ApiError::NoInterview.into_response();
    };

    if let Err(e) = session.accept_suggestion(request.index).await {
        return ApiError::from(e).into_response();
    }

    match session.next_question().await {
        Ok(turn) => {
            let reply = turn_reply(session, turn);
            (StatusCode::OK, ResponseJson(ApiResponse::success(reply))).into_response()
        }
        Err(e) => {
            error!("Failed to fetch the next question: {}", e);
            ApiError::from(e).into_response()
        }
    }
}

/// Combine a suggestion with whatever the user already typed. Pure helper,
/// no session state changes.
pub async fn merge_suggestion(
    State(state): State<AppState>,
    Json(request): Json<MergeSuggestionRequest>,
) -> impl IntoResponse {
    let guard = state.interview.lock().await;
    let Some(session) = guard.as_ref() else {
        return ApiError::NoInterview.into_response();
    };

    match session.merge_suggestion(&request.current_input, request.index) {
        Ok(merged) => (
            StatusCode::OK,
            ResponseJson(ApiResponse::success(MergedAnswer { merged })),
        )
            .into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// Hand the draft to the live audio channel
pub async fn enter_voice_mode(State(state): State<AppState>) -> impl IntoResponse {
    let mut guard = state.interview.lock().await;
    let Some(session) = guard.as_mut() else {
        return ApiError::NoInterview.into_response();
    };

    match session.enter_voice_mode() {
        Ok(config) => {
            info!("Voice scoping session opened");
            (StatusCode::OK, ResponseJson(ApiResponse::success(config))).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// Apply one tool-call field update coming from the voice channel
pub async fn apply_voice_update(
    State(state): State<AppState>,
    Json(request): Json<VoiceUpdateRequest>,
) -> impl IntoResponse {
    let mut guard = state.interview.lock().await;
    let Some(session) = guard.as_mut() else {
        return ApiError::NoInterview.into_response();
    };

    match session.apply_voice_update(&request.field, &request.value).await {
        Ok(()) => {
            let snapshot = session.snapshot();
            (StatusCode::OK, ResponseJson(ApiResponse::success(snapshot))).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// Close the voice channel and resume turn-based questioning
pub async fn exit_voice_mode(State(state): State<AppState>) -> impl IntoResponse {
    let mut guard = state.interview.lock().await;
    let Some(session) = guard.as_mut() else {
        return ApiError::NoInterview.into_response();
    };

    if let Err(e) = session.exit_voice_mode() {
        return ApiError::from(e).into_response();
    }

    info!("Voice scoping session closed, resuming turn-based flow");
    match session.next_question().await {
        Ok(turn) => {
            let reply = turn_reply(session, turn);
            (StatusCode::OK, ResponseJson(ApiResponse::success(reply))).into_response()
        }
        Err(e) => {
            error!("Failed to fetch the next question: {}", e);
            ApiError::from(e).into_response()
        }
    }
}

/// Full question-and-answer history of the session
pub async fn get_transcript(State(state): State<AppState>) -> impl IntoResponse {
    let guard = state.interview.lock().await;
    let Some(session) = guard.as_ref() else {
        return ApiError::NoInterview.into_response();
    };

    let transcript = session.transcript().to_vec();
    (
        StatusCode::OK,
        ResponseJson(ApiResponse::success(transcript)),
    )
        .into_response()
}

/// Read-only snapshot of the session for polling clients
pub async fn interview_status(State(state): State<AppState>) -> impl IntoResponse {
    let guard = state.interview.lock().await;
    let Some(session) = guard.as_ref() else {
        return ApiError::NoInterview.into_response();
    };

    let snapshot = session.snapshot();
    (StatusCode::OK, ResponseJson(ApiResponse::success(snapshot))).into_response()
}
