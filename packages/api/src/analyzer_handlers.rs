// ABOUTME: HTTP request handlers for the on-demand analyzers
// ABOUTME: Estimation, brainstorm, refinement, architect chat, and visual synthesis

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json as ResponseJson},
    Json,
};
use serde::Deserialize;
use tracing::{error, info};

use blueprint_ai::ImageArtifact;
use blueprint_analyzers as analyzers;
use blueprint_pipeline::PipelineError;

use crate::response::{ApiError, ApiResponse};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct RefinementRequest {
    pub target: String,
}

#[derive(Debug, Deserialize)]
pub struct ArchitectRequest {
    pub question: String,
}

fn default_aspect_ratio() -> String {
    "16:9".to_string()
}

fn default_image_size() -> String {
    "1K".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagePromptRequest {
    pub prompt: String,
    #[serde(default = "default_aspect_ratio")]
    pub aspect_ratio: String,
    #[serde(default = "default_image_size")]
    pub size: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoPromptRequest {
    pub prompt: String,
    #[serde(default = "default_aspect_ratio")]
    pub aspect_ratio: String,
    #[serde(default)]
    pub seed_image: Option<ImageArtifact>,
}

/// Estimate effort for the project loaded in the pipeline register
pub async fn run_estimation(State(state): State<AppState>) -> impl IntoResponse {
    let Some(project) = state.orchestrator.snapshot().await.project else {
        return ApiError::from(PipelineError::NoProject).into_response();
    };

    match analyzers::estimate_effort(&state.client, &project).await {
        Ok(estimation) => {
            (StatusCode::OK, ResponseJson(ApiResponse::success(estimation))).into_response()
        }
        Err(e) => {
            error!("Estimation failed: {}", e);
            ApiError::from(e).into_response()
        }
    }
}

/// Suggest features that complement the live interview draft
pub async fn brainstorm(State(state): State<AppState>) -> impl IntoResponse {
    let draft = {
        let guard = state.interview.lock().await;
        match guard.as_ref() {
            Some(session) => session.draft().clone(),
            None => return ApiError::NoInterview.into_response(),
        }
    };

    match analyzers::brainstorm_features(&state.client, &draft).await {
        Ok(features) => {
            (StatusCode::OK, ResponseJson(ApiResponse::success(features))).into_response()
        }
        Err(e) => {
            error!("Feature brainstorm failed: {}", e);
            ApiError::from(e).into_response()
        }
    }
}

/// Suggest focused improvements for one artifact of the loaded run
pub async fn refine(
    State(state): State<AppState>,
    Json(request): Json<RefinementRequest>,
) -> impl IntoResponse {
    let Some(project) = state.orchestrator.snapshot().await.project else {
        return ApiError::from(PipelineError::NoProject).into_response();
    };

    match analyzers::refine_component(&state.client, &request.target, &project).await {
        Ok(suggestions) => (
            StatusCode::OK,
            ResponseJson(ApiResponse::success(suggestions)),
        )
            .into_response(),
        Err(e) => {
            error!("Refinement failed for '{}': {}", request.target, e);
            ApiError::from(e).into_response()
        }
    }
}

/// Answer a free-form architecture question with web grounding
pub async fn ask_architect(
    State(state): State<AppState>,
    Json(request): Json<ArchitectRequest>,
) -> impl IntoResponse {
    match analyzers::ask_architect(&state.client, &request.question).await {
        Ok(answer) => {
            (StatusCode::OK, ResponseJson(ApiResponse::success(answer))).into_response()
        }
        Err(e) => {
            error!("Architect chat failed: {}", e);
            ApiError::from(e).into_response()
        }
    }
}

/// Synthesize a single mockup image
pub async fn generate_image(
    State(state): State<AppState>,
    Json(request): Json<ImagePromptRequest>,
) -> impl IntoResponse {
    info!(
        "Generating image ({} at {})",
        request.aspect_ratio, request.size
    );

    match state
        .client
        .generate_image(request.prompt, &request.aspect_ratio, &request.size)
        .await
    {
        Ok(artifact) => {
            (StatusCode::OK, ResponseJson(ApiResponse::success(artifact))).into_response()
        }
        Err(e) => {
            error!("Image generation failed: {}", e);
            ApiError::from(e).into_response()
        }
    }
}

/// Animate a motion clip, optionally seeded with a generated image
pub async fn generate_video(
    State(state): State<AppState>,
    Json(request): Json<VideoPromptRequest>,
) -> impl IntoResponse {
    info!("Generating video ({})", request.aspect_ratio);

    match state
        .client
        .generate_video(request.prompt, request.seed_image, &request.aspect_ratio)
        .await
    {
        Ok(artifact) => {
            (StatusCode::OK, ResponseJson(ApiResponse::success(artifact))).into_response()
        }
        Err(e) => {
            error!("Video generation failed: {}", e);
            ApiError::from(e).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use blueprint_ai::testing::MockBackend;
    use blueprint_ai::{BinaryPart, GenerationResponse};
    use blueprint_core::GroundingSource;
    use serde_json::json;
    use tower::ServiceExt;

    use crate::test_support::{post, post_empty, read_json, saved_fixture, state_over};

    #[tokio::test]
    async fn test_estimation_needs_a_loaded_project() {
        let backend = Arc::new(MockBackend::new());
        let app = crate::create_analyzers_router().with_state(state_over(&backend));

        let response = app.oneshot(post_empty("/estimation")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(backend.call_count(), 0);
    }

    #[tokio::test]
    async fn test_estimation_returns_the_complete_numeric_block() {
        let backend = Arc::new(MockBackend::new());
        backend.push_json(json!({
            "devHoursMin": 120,
            "devHoursMax": 200,
            "estimatedTokens": 1_500_000,
            "apiCostUsd": 42.5,
            "assumptions": ["One developer with agent support"]
        }));
        let state = state_over(&backend);
        state.orchestrator.load_saved(saved_fixture("bp-1")).await.unwrap();
        let app = crate::create_analyzers_router().with_state(state);

        let response = app.oneshot(post_empty("/estimation")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = read_json(response).await;
        assert_eq!(json["data"]["devHoursMin"], 120);
        assert_eq!(json["data"]["apiCostUsd"], 42.5);

        let recorded = backend.recorded();
        assert!(recorded[0].prompt.contains("TaskFlow"));
    }

    #[tokio::test]
    async fn test_brainstorm_reads_the_live_draft() {
        let backend = Arc::new(MockBackend::new());
        backend.push_json(json!({
            "currentField": "title",
            "question": "What is the project called?"
        }));
        backend.push_json(json!(["Reminders", "Calendar sync"]));
        let app = crate::create_interview_router()
            .merge(crate::create_analyzers_router())
            .with_state(state_over(&backend));

        app.clone().oneshot(post_empty("/start")).await.unwrap();

        let response = app.oneshot(post_empty("/brainstorm")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = read_json(response).await;
        assert_eq!(json["data"], json!(["Reminders", "Calendar sync"]));
    }

    #[tokio::test]
    async fn test_architect_chat_carries_cited_sources() {
        let backend = Arc::new(MockBackend::new());
        backend.push_response(GenerationResponse {
            text: Some("Use row-level security for tenant isolation.".to_string()),
            grounding: vec![GroundingSource {
                title: "Postgres RLS docs".to_string(),
                uri: "https://example.com/rls".to_string(),
            }],
            ..Default::default()
        });
        let app = crate::create_analyzers_router().with_state(state_over(&backend));

        let response = app
            .oneshot(post(
                "/architect",
                json!({ "question": "How should I isolate tenants?" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = read_json(response).await;
        assert!(json["data"]["text"]
            .as_str()
            .unwrap()
            .contains("row-level security"));
        assert_eq!(json["data"]["sources"][0]["title"], "Postgres RLS docs");
    }

    #[tokio::test]
    async fn test_image_synthesis_round_trip() {
        let backend = Arc::new(MockBackend::new());
        backend.push_image_batch(vec![BinaryPart {
            mime_type: "image/png".to_string(),
            data: "aGVsbG8=".to_string(),
        }]);
        let app = crate::create_analyzers_router().with_state(state_over(&backend));

        let response = app
            .oneshot(post("/image", json!({ "prompt": "A calm kanban board UI" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = read_json(response).await;
        assert_eq!(json["data"]["mimeType"], "image/png");
        assert_eq!(json["data"]["base64Data"], "aGVsbG8=");
    }

    #[tokio::test]
    async fn test_upstream_failures_surface_as_gateway_errors() {
        let backend = Arc::new(MockBackend::new());
        backend.push_error(blueprint_ai::GenerationError::Api {
            status: 503,
            message: "model overloaded".to_string(),
        });
        let app = crate::create_analyzers_router().with_state(state_over(&backend));

        let response = app
            .oneshot(post("/architect", json!({ "question": "Anything?" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let json = read_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "API error (503): model overloaded");
    }
}
