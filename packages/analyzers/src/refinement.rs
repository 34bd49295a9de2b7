// ABOUTME: Interactive refinement suggestions for a selected artifact
// ABOUTME: Targets a file, endpoint, or tech choice from the generated plan

use blueprint_ai::{GenerationClient, GenerationResult, ModelProfile};
use blueprint_core::{ProjectData, RefinementSuggestion};
use blueprint_prompts::{refinement_prompt, refinement_schema};
use tracing::info;

/// Suggest focused improvements for one artifact of the generated plan
pub async fn refine_component(
    client: &GenerationClient,
    target: &str,
    project: &ProjectData,
) -> GenerationResult<Vec<RefinementSuggestion>> {
    info!("Generating refinement suggestions for '{}'", target);

    let generated = client
        .generate_structured::<Vec<RefinementSuggestion>>(
            ModelProfile::DeepReasoning,
            refinement_prompt(target, project),
            None,
            refinement_schema(),
        )
        .await?;

    Ok(generated.data)
}
