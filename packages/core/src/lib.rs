// ABOUTME: Core schema types and constants for Blueprint
// ABOUTME: Foundational package providing shared contracts across all Blueprint packages

pub mod constants;
pub mod types;
pub mod view;

// Re-export main types
pub use types::{
    ApiEndpoint, Complexity, EcosystemPreference, EndpointParameter, EntityModel, Estimation,
    FinalizeError, GroundingSource, Guardrails, HostingTarget, IdePreference, InterviewPrompt,
    MarketingStrategy, ModelPreference, PipelineResult, PipelineStage, ProjectData, ProjectDraft,
    ProjectScope, RebuildAnalysis, RefinementKind, RefinementSuggestion, RepoPlan, SavedProject,
    SavedProjectsFile, SecurityLevel, SwotAnalysis, SystemModel, TechOption, TechStack,
    TechnicalArchitecture, TestStrategy, WorkspaceBundle, WorkspaceFile, COMPLETE_SENTINEL,
};

// Re-export constants
pub use constants::{blueprint_dir, projects_file, MAX_SAVED_PROJECTS, PROJECTS_VERSION};

// Re-export view state
pub use view::{navigate, ViewState};
