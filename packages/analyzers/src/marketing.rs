// ABOUTME: Go-to-market strategy generation with SWOT analysis
// ABOUTME: Works on the partial draft because the trigger fires mid-interview

use blueprint_ai::{GenerationClient, GenerationResult, ModelProfile};
use blueprint_core::{MarketingStrategy, ProjectDraft};
use blueprint_prompts::{marketing_strategy_prompt, marketing_strategy_schema};
use tracing::info;

/// Generate a marketing strategy from whatever concept fields the draft
/// holds. Callers gate on description and target audience being present;
/// a missing title falls back to a placeholder.
pub async fn marketing_strategy(
    client: &GenerationClient,
    draft: &ProjectDraft,
) -> GenerationResult<MarketingStrategy> {
    let title = draft.title.as_deref().unwrap_or("(untitled project)");
    let description = draft.description.as_deref().unwrap_or_default();
    let audience = draft.target_audience.as_deref().unwrap_or_default();

    info!("Generating marketing strategy for '{}'", title);

    let generated = client
        .generate_structured::<MarketingStrategy>(
            ModelProfile::FastStructured,
            marketing_strategy_prompt(title, description, audience),
            None,
            marketing_strategy_schema(),
        )
        .await?;

    Ok(generated.data)
}
