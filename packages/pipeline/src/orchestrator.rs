// ABOUTME: Single-slot pipeline run register and the strict stage sequencer
// ABOUTME: Owns run transitions, persistence on success, replay, and the console

use std::sync::Arc;

use blueprint_ai::{GenerationClient, GenerationError};
use blueprint_core::{PipelineResult, PipelineStage, ProjectData, SavedProject};
use blueprint_storage::ProjectRepository;
use chrono::Utc;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::console::{run_command, ConsoleOutput};
use crate::error::{OrchestratorResult, PipelineError};
use crate::stages;

/// Contents of the single-slot run register. The epoch increments on every
/// claim and reset, so a stage finishing after a reset cannot write stale
/// output into a newer run.
struct PipelineRun {
    stage: PipelineStage,
    project: Option<ProjectData>,
    result: PipelineResult,
    error: Option<String>,
    epoch: u64,
}

impl Default for PipelineRun {
    fn default() -> Self {
        Self {
            stage: PipelineStage::Idle,
            project: None,
            result: PipelineResult::default(),
            error: None,
            epoch: 0,
        }
    }
}

/// Read-only view of the run register
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineSnapshot {
    pub stage: PipelineStage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<ProjectData>,
    pub result: PipelineResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Runs the three mandatory stages in strict sequence over the single run
/// register. Only orchestrator methods advance the register; the stages
/// themselves are pure and produce fresh immutable objects.
pub struct PipelineOrchestrator {
    client: Arc<GenerationClient>,
    repository: Arc<ProjectRepository>,
    run: RwLock<PipelineRun>,
}

impl PipelineOrchestrator {
    pub fn new(client: Arc<GenerationClient>, repository: Arc<ProjectRepository>) -> Self {
        Self {
            client,
            repository,
            run: RwLock::new(PipelineRun::default()),
        }
    }

    /// Run stages 1-3 for the scoped project. Stage N+1 never starts before
    /// stage N resolves; a second call while a run is active is rejected.
    /// On success the completed run is recorded through the repository.
    pub async fn execute(&self, project: ProjectData) -> OrchestratorResult<PipelineResult> {
        let epoch = {
            let mut run = self.run.write().await;
            if run.stage.is_active() {
                return Err(PipelineError::RunActive(run.stage));
            }
            run.stage = PipelineStage::Structure;
            run.project = Some(project.clone());
            run.result = PipelineResult::default();
            run.error = None;
            run.epoch += 1;
            run.epoch
        };
        info!("Pipeline run started for '{}'", project.title);

        let model = match stages::derive_system_model(&self.client, &project).await {
            Ok(model) => model,
            Err(e) => return Err(self.fail(epoch, e).await),
        };
        self.advance(epoch, |run| {
            run.result.stage1 = Some(model.clone());
            run.stage = PipelineStage::Architecture;
        })
        .await?;

        let architecture = match stages::derive_architecture(&self.client, &model, &project).await {
            Ok(architecture) => architecture,
            Err(e) => return Err(self.fail(epoch, e).await),
        };
        self.advance(epoch, |run| {
            run.result.stage2 = Some(architecture.clone());
            run.stage = PipelineStage::Workspace;
        })
        .await?;

        let bundle =
            match stages::derive_workspace(&self.client, &project, &model, &architecture).await {
                Ok(bundle) => bundle,
                Err(e) => return Err(self.fail(epoch, e).await),
            };

        let result = PipelineResult {
            stage1: Some(model),
            stage2: Some(architecture),
            stage3: Some(bundle),
        };
        self.advance(epoch, |run| {
            run.result = result.clone();
            run.stage = PipelineStage::Completed;
        })
        .await?;
        info!("Pipeline run completed for '{}'", project.title);

        self.persist(&project, &result).await;
        Ok(result)
    }

    /// Discard all run state and return to idle
    pub async fn reset(&self) {
        let mut run = self.run.write().await;
        run.stage = PipelineStage::Idle;
        run.project = None;
        run.result = PipelineResult::default();
        run.error = None;
        run.epoch += 1;
        info!("Pipeline register reset to idle");
    }

    /// Replay a stored run into the register without any generation calls
    pub async fn load_saved(&self, saved: SavedProject) -> OrchestratorResult<()> {
        let mut run = self.run.write().await;
        if run.stage.is_active() {
            return Err(PipelineError::RunActive(run.stage));
        }
        info!("Replaying saved run '{}' ({})", saved.data.title, saved.id);
        run.stage = PipelineStage::Completed;
        run.project = Some(saved.data);
        run.result = saved.result;
        run.error = None;
        run.epoch += 1;
        Ok(())
    }

    pub async fn snapshot(&self) -> PipelineSnapshot {
        let run = self.run.read().await;
        PipelineSnapshot {
            stage: run.stage,
            project: run.project.clone(),
            result: run.result.clone(),
            error: run.error.clone(),
        }
    }

    /// Execute one console command against the current run
    pub async fn console(&self, input: &str) -> OrchestratorResult<ConsoleOutput> {
        let run = self.run.read().await;
        let project = run.project.as_ref().ok_or(PipelineError::NoProject)?;
        Ok(run_command(input, project, &run.result))
    }

    /// Apply a stage result unless the register was reset mid-flight
    async fn advance(
        &self,
        epoch: u64,
        apply: impl FnOnce(&mut PipelineRun),
    ) -> OrchestratorResult<()> {
        let mut run = self.run.write().await;
        if run.epoch != epoch {
            warn!("Pipeline register was reset mid-run, discarding stage output");
            return Err(PipelineError::Superseded);
        }
        apply(&mut run);
        Ok(())
    }

    async fn fail(&self, epoch: u64, error: GenerationError) -> PipelineError {
        error!("Pipeline stage failed: {}", error);
        let mut run = self.run.write().await;
        if run.epoch == epoch {
            run.stage = PipelineStage::Failed;
            run.error = Some(error.to_string());
        }
        PipelineError::Generation(error)
    }

    /// Record the completed run. A persistence failure is logged but never
    /// fails the run itself.
    async fn persist(&self, project: &ProjectData, result: &PipelineResult) {
        let saved = SavedProject {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            data: project.clone(),
            result: result.clone(),
        };
        match self.repository.record(saved).await {
            Ok(()) => info!("Saved completed run for '{}'", project.title),
            Err(e) => warn!("Could not persist completed run: {}", e),
        }
    }
}
