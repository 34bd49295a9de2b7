// ABOUTME: Feature brainstorming against the current draft
// ABOUTME: Pure suggestion list; nothing is stored

use blueprint_ai::{GenerationClient, GenerationResult, ModelProfile};
use blueprint_core::ProjectDraft;
use blueprint_prompts::{feature_brainstorm_prompt, feature_brainstorm_schema};

/// Propose feature names that complement whatever the draft already plans
pub async fn brainstorm_features(
    client: &GenerationClient,
    draft: &ProjectDraft,
) -> GenerationResult<Vec<String>> {
    let generated = client
        .generate_structured::<Vec<String>>(
            ModelProfile::FastStructured,
            feature_brainstorm_prompt(draft),
            None,
            feature_brainstorm_schema(),
        )
        .await?;

    Ok(generated.data)
}
