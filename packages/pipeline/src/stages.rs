// ABOUTME: The three mandatory generation stages as pure client calls
// ABOUTME: Each stage is a function of immutable inputs producing a fresh output

use blueprint_ai::{GenerationClient, GenerationResult, ModelProfile};
use blueprint_core::{ProjectData, SystemModel, TechnicalArchitecture, WorkspaceBundle};
use blueprint_prompts::{
    stage1_structure_prompt, stage1_structure_schema, stage2_architecture_prompt,
    stage2_architecture_schema, stage3_workspace_prompt, stage3_workspace_schema,
};
use tracing::info;

/// Stage 1: extract the logical system model from the scoped project
pub async fn derive_system_model(
    client: &GenerationClient,
    project: &ProjectData,
) -> GenerationResult<SystemModel> {
    info!("Stage 1: deriving system model for '{}'", project.title);
    let generated = client
        .generate_structured::<SystemModel>(
            ModelProfile::FastStructured,
            stage1_structure_prompt(project),
            None,
            stage1_structure_schema(),
        )
        .await?;
    Ok(generated.data)
}

/// Stage 2: synthesize the technical architecture. Takes the original project
/// data alongside the system model so late-bound preferences (ecosystem,
/// hosting, security level) stay visible to the stack choice.
pub async fn derive_architecture(
    client: &GenerationClient,
    model: &SystemModel,
    project: &ProjectData,
) -> GenerationResult<TechnicalArchitecture> {
    info!(
        "Stage 2: deriving architecture over {} entities",
        model.entities.len()
    );
    let generated = client
        .generate_structured::<TechnicalArchitecture>(
            ModelProfile::FastStructured,
            stage2_architecture_prompt(model, project),
            None,
            stage2_architecture_schema(),
        )
        .await?;
    Ok(generated.data)
}

/// Stage 3: compile the master prompt and workspace files. Runs under the
/// deep-reasoning profile; this is the slowest call of a run.
pub async fn derive_workspace(
    client: &GenerationClient,
    project: &ProjectData,
    model: &SystemModel,
    architecture: &TechnicalArchitecture,
) -> GenerationResult<WorkspaceBundle> {
    info!("Stage 3: compiling agent workspace for '{}'", project.title);
    let generated = client
        .generate_structured::<WorkspaceBundle>(
            ModelProfile::DeepReasoning,
            stage3_workspace_prompt(project, model, architecture),
            None,
            stage3_workspace_schema(),
        )
        .await?;
    Ok(generated.data)
}
