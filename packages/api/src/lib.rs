// ABOUTME: HTTP API layer for Blueprint providing REST endpoints and routing
// ABOUTME: Integration layer that depends on all domain packages

use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};
use tokio::sync::{Mutex, RwLock};

use blueprint_ai::GenerationClient;
use blueprint_core::ViewState;
use blueprint_interview::InterviewSession;
use blueprint_pipeline::PipelineOrchestrator;
use blueprint_storage::ProjectRepository;

pub mod analyzer_handlers;
pub mod health;
pub mod interview_handlers;
pub mod pipeline_handlers;
pub mod project_handlers;
pub mod response;
pub mod view_handlers;

/// Shared state behind every handler. Cloning is cheap; every member is an Arc.
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<GenerationClient>,
    pub repository: Arc<ProjectRepository>,
    pub orchestrator: Arc<PipelineOrchestrator>,
    pub interview: Arc<Mutex<Option<InterviewSession>>>,
    pub view: Arc<RwLock<ViewState>>,
}

impl AppState {
    pub fn new(client: GenerationClient, repository: ProjectRepository) -> Self {
        let client = Arc::new(client);
        let repository = Arc::new(repository);
        let orchestrator = Arc::new(PipelineOrchestrator::new(
            Arc::clone(&client),
            Arc::clone(&repository),
        ));

        AppState {
            client,
            repository,
            orchestrator,
            interview: Arc::new(Mutex::new(None)),
            view: Arc::new(RwLock::new(ViewState::default())),
        }
    }
}

/// Creates the interview API router
pub fn create_interview_router() -> Router<AppState> {
    Router::new()
        .route("/start", post(interview_handlers::start_interview))
        .route("/answer", post(interview_handlers::submit_answer))
        .route("/skip", post(interview_handlers::skip_question))
        .route(
            "/suggestion/accept",
            post(interview_handlers::accept_suggestion),
        )
        .route(
            "/suggestion/merge",
            post(interview_handlers::merge_suggestion),
        )
        .route("/voice/enter", post(interview_handlers::enter_voice_mode))
        .route("/voice/update", post(interview_handlers::apply_voice_update))
        .route("/voice/exit", post(interview_handlers::exit_voice_mode))
        .route("/transcript", get(interview_handlers::get_transcript))
        .route("/status", get(interview_handlers::interview_status))
}

/// Creates the pipeline API router
pub fn create_pipeline_router() -> Router<AppState> {
    Router::new()
        .route("/start", post(pipeline_handlers::start_pipeline))
        .route("/status", get(pipeline_handlers::pipeline_status))
        .route("/reset", post(pipeline_handlers::reset_pipeline))
        .route("/replay/{id}", post(pipeline_handlers::replay_saved_project))
        .route("/console", post(pipeline_handlers::run_console_command))
}

/// Creates the analyzers API router
pub fn create_analyzers_router() -> Router<AppState> {
    Router::new()
        .route("/estimation", post(analyzer_handlers::run_estimation))
        .route("/brainstorm", post(analyzer_handlers::brainstorm))
        .route("/refinement", post(analyzer_handlers::refine))
        .route("/architect", post(analyzer_handlers::ask_architect))
        .route("/image", post(analyzer_handlers::generate_image))
        .route("/video", post(analyzer_handlers::generate_video))
}

/// Creates the saved projects API router
pub fn create_projects_router() -> Router<AppState> {
    Router::new()
        .route("/", get(project_handlers::list_projects))
        .route("/{id}", get(project_handlers::get_project))
        .route("/{id}", delete(project_handlers::delete_project))
}

/// Creates the view register API router
pub fn create_view_router() -> Router<AppState> {
    Router::new()
        .route("/", get(view_handlers::current_view))
        .route("/navigate", post(view_handlers::navigate_to))
}

/// Assembles the full API under /api with the shared state applied
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health::health_check))
        .nest("/api/interview", create_interview_router())
        .nest("/api/pipeline", create_pipeline_router())
        .nest("/api/analyzers", create_analyzers_router())
        .nest("/api/projects", create_projects_router())
        .nest("/api/view", create_view_router())
        .with_state(state)
}
