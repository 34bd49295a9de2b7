// ABOUTME: Error taxonomy for pipeline runs
// ABOUTME: Distinguishes register contention from stage generation failures

use blueprint_ai::GenerationError;
use blueprint_core::PipelineStage;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("a pipeline run is already active (stage: {0})")]
    RunActive(PipelineStage),

    #[error("no project loaded in the pipeline register")]
    NoProject,

    #[error("the run was reset while a stage was in flight")]
    Superseded,

    #[error(transparent)]
    Generation(#[from] GenerationError),
}

pub type OrchestratorResult<T> = std::result::Result<T, PipelineError>;
