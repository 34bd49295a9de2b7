// ABOUTME: Commercial effort estimation for a scoped project
// ABOUTME: Returns a complete estimate or fails; numeric fields are never partial

use blueprint_ai::{GenerationClient, GenerationResult, ModelProfile};
use blueprint_core::{Estimation, ProjectData};
use blueprint_prompts::{estimation_prompt, estimation_schema};
use tracing::info;

/// Estimate development hours, token usage, and API cost for the project.
/// The response schema requires every numeric field, so a conforming reply
/// is always a complete object.
pub async fn estimate_effort(
    client: &GenerationClient,
    project: &ProjectData,
) -> GenerationResult<Estimation> {
    info!("Estimating effort for '{}'", project.title);

    let generated = client
        .generate_structured::<Estimation>(
            ModelProfile::FastStructured,
            estimation_prompt(project),
            None,
            estimation_schema(),
        )
        .await?;

    Ok(generated.data)
}
