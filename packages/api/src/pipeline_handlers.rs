// ABOUTME: HTTP request handlers for the three-stage generation pipeline
// ABOUTME: Start/reset/replay plus the embedded workspace console

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json as ResponseJson},
    Json,
};
use serde::Deserialize;
use tracing::{error, info};

use blueprint_storage::StorageError;

use crate::response::{ApiError, ApiResponse};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ConsoleRequest {
    pub command: String,
}

/// Run all three stages for the finalized interview data
pub async fn start_pipeline(State(state): State<AppState>) -> impl IntoResponse {
    let project = {
        let guard = state.interview.lock().await;
        match guard.as_ref().and_then(|session| session.completed_data()) {
            Some(data) => data,
            None => return ApiError::InterviewIncomplete.into_response(),
        }
    };

    info!("Starting the generation pipeline for '{}'", project.title);
    match state.orchestrator.execute(project).await {
        Ok(result) => {
            (StatusCode::OK, ResponseJson(ApiResponse::success(result))).into_response()
        }
        Err(e) => {
            error!("Pipeline run failed: {}", e);
            ApiError::from(e).into_response()
        }
    }
}

/// Current stage, loaded project, and partial results
pub async fn pipeline_status(State(state): State<AppState>) -> impl IntoResponse {
    let snapshot = state.orchestrator.snapshot().await;
    (StatusCode::OK, ResponseJson(ApiResponse::success(snapshot))).into_response()
}

/// Clear the register and discard the interview; the next run starts from scratch
pub async fn reset_pipeline(State(state): State<AppState>) -> impl IntoResponse {
    info!("Resetting the pipeline and discarding the interview");
    state.orchestrator.reset().await;
    *state.interview.lock().await = None;

    let snapshot = state.orchestrator.snapshot().await;
    (StatusCode::OK, ResponseJson(ApiResponse::success(snapshot))).into_response()
}

/// Load a saved run into the register for display, without any model calls
pub async fn replay_saved_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    info!("Replaying saved project {}", id);

    let Some(saved) = state.repository.get(&id).await else {
        return ApiError::from(StorageError::NotFound(id)).into_response();
    };

    match state.orchestrator.load_saved(saved).await {
        Ok(()) => {
            let snapshot = state.orchestrator.snapshot().await;
            (StatusCode::OK, ResponseJson(ApiResponse::success(snapshot))).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// Execute one console command against the loaded run
pub async fn run_console_command(
    State(state): State<AppState>,
    Json(request): Json<ConsoleRequest>,
) -> impl IntoResponse {
    match state.orchestrator.console(&request.command).await {
        Ok(output) => {
            (StatusCode::OK, ResponseJson(ApiResponse::success(output))).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use blueprint_ai::testing::MockBackend;
    use blueprint_storage::test_utils::test_helpers::with_temp_home;
    use serde_json::json;
    use tower::ServiceExt;

    use crate::test_support::{
        get, post, post_empty, read_json, saved_fixture, state_over, workspace_reply,
    };

    #[tokio::test]
    async fn test_start_requires_a_completed_interview() {
        let backend = Arc::new(MockBackend::new());
        let app = crate::create_pipeline_router().with_state(state_over(&backend));

        let response = app.oneshot(post_empty("/start")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = read_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(
            json["error"],
            "the interview has not produced a finalized project yet"
        );
        assert_eq!(backend.call_count(), 0);
    }

    #[tokio::test]
    async fn test_voice_scoped_interview_feeds_a_full_run() {
        with_temp_home(|| async {
            let backend = Arc::new(MockBackend::new());
            backend.push_json(json!({
                "currentField": "title",
                "question": "What is the project called?"
            }));
            backend.push_json(json!({
                "positioning": "The calm board",
                "swot": {
                    "strengths": ["focus"],
                    "weaknesses": ["reach"],
                    "opportunities": ["niche"],
                    "threats": ["giants"]
                },
                "channels": ["dev newsletters"],
                "monetizationIdeas": ["pro tier"]
            }));
            backend.push_json(json!({
                "entities": [
                    {
                        "name": "Task",
                        "description": "A unit of work on the board",
                        "properties": ["id", "title", "column"]
                    }
                ],
                "relationships": ["Board has many Tasks"],
                "userFlows": ["Create a task"],
                "coreLogic": "Kanban state machine"
            }));
            backend.push_json(json!({
                "techStack": {
                    "frontend": [{"name": "React", "justification": "Board UI"}],
                    "backend": [{"name": "Axum", "justification": "Typed handlers"}],
                    "database": [{"name": "Postgres", "justification": "Relational fit"}],
                    "additional": []
                },
                "folderStructure": "src/",
                "apiEndpoints": [],
                "securityRequirements": ["Session auth"],
                "guardrails": {
                    "security": ["Rate limit writes"],
                    "performance": ["Paginate lists"],
                    "reliability": ["Retry saves"]
                }
            }));
            backend.push_json(workspace_reply());

            let state = state_over(&backend);
            let app = crate::create_router(state);

            let response = app
                .clone()
                .oneshot(post_empty("/api/interview/start"))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);

            app.clone()
                .oneshot(post_empty("/api/interview/voice/enter"))
                .await
                .unwrap();

            let updates = [
                ("title", "TaskFlow"),
                ("description", "Kanban board for freelancers"),
                ("targetAudience", "Freelancers and solo founders"),
                ("keyFeatures", "auth, kanban, reminders"),
                ("isRebuild", "no"),
                ("projectScope", "MVP"),
                ("complexity", "Interactive"),
                ("ide", "Cursor"),
                ("preferredModel", "Claude 3.5 Sonnet"),
                ("githubRepo", "Create New"),
                ("hostingDeployment", "Vercel"),
                ("testStrategy", "Integration-Focus"),
                ("securityLevel", "Standard"),
                ("ecosystemPreference", "Open"),
            ];
            for (field, value) in updates {
                let response = app
                    .clone()
                    .oneshot(post(
                        "/api/interview/voice/update",
                        json!({ "field": field, "value": value }),
                    ))
                    .await
                    .unwrap();
                assert_eq!(response.status(), StatusCode::OK);
            }

            let response = app
                .clone()
                .oneshot(post_empty("/api/interview/voice/exit"))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            let json = read_json(response).await;
            assert_eq!(json["data"]["turn"]["kind"], "complete");
            assert_eq!(json["data"]["project"]["title"], "TaskFlow");

            let response = app
                .clone()
                .oneshot(post_empty("/api/pipeline/start"))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            let json = read_json(response).await;
            assert_eq!(
                json["data"]["stage3"]["masterPrompt"],
                "# Build TaskFlow\nStart with the domain model."
            );

            let response = app
                .clone()
                .oneshot(get("/api/pipeline/status"))
                .await
                .unwrap();
            let json = read_json(response).await;
            assert_eq!(json["data"]["stage"], "COMPLETED");

            let response = app.clone().oneshot(get("/api/projects/")).await.unwrap();
            let json = read_json(response).await;
            assert_eq!(json["data"].as_array().unwrap().len(), 1);

            // Reset clears both the register and the interview slot
            let response = app
                .clone()
                .oneshot(post_empty("/api/pipeline/reset"))
                .await
                .unwrap();
            let json = read_json(response).await;
            assert_eq!(json["data"]["stage"], "IDLE");

            let response = app
                .oneshot(get("/api/interview/status"))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::NOT_FOUND);
        })
        .await;
    }

    #[tokio::test]
    async fn test_replay_loads_a_saved_run_without_model_calls() {
        with_temp_home(|| async {
            let backend = Arc::new(MockBackend::new());
            let state = state_over(&backend);
            state.repository.record(saved_fixture("bp-1")).await.unwrap();
            let app = crate::create_pipeline_router().with_state(state);

            let response = app
                .clone()
                .oneshot(post_empty("/replay/bp-1"))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            let json = read_json(response).await;
            assert_eq!(json["data"]["stage"], "COMPLETED");
            assert_eq!(json["data"]["project"]["title"], "TaskFlow");
            assert_eq!(backend.call_count(), 0);

            let response = app.oneshot(post_empty("/replay/no-such-id")).await.unwrap();
            assert_eq!(response.status(), StatusCode::NOT_FOUND);
        })
        .await;
    }

    #[tokio::test]
    async fn test_console_answers_against_the_loaded_run() {
        let backend = Arc::new(MockBackend::new());
        let state = state_over(&backend);
        let app = crate::create_pipeline_router().with_state(state.clone());

        let response = app
            .clone()
            .oneshot(post("/console", json!({ "command": "ls" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        state.orchestrator.load_saved(saved_fixture("bp-2")).await.unwrap();

        let response = app
            .oneshot(post("/console", json!({ "command": "ls" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = read_json(response).await;
        let lines = json["data"]["lines"].as_array().unwrap();
        assert!(lines.iter().any(|l| l.as_str().unwrap().contains(".cursorrules")));
    }
}
