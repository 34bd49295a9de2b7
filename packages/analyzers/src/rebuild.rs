// ABOUTME: Existing-product research for rebuild projects
// ABOUTME: Two-step: search-grounded free-text research, then a structuring pass

use blueprint_ai::{GenerationClient, GenerationResult, ModelProfile};
use blueprint_core::RebuildAnalysis;
use blueprint_prompts::{
    rebuild_research_prompt, rebuild_structuring_prompt, rebuild_structuring_schema,
};
use tracing::{debug, info};

/// Research a named existing product and structure the findings.
/// The grounded step returns free text, so a second call re-parses it into
/// the shared shape; grounding sources from step one are carried over.
pub async fn analyze_existing_product(
    client: &GenerationClient,
    source_description: &str,
) -> GenerationResult<RebuildAnalysis> {
    info!("Researching existing product: {}", source_description);

    let research = client
        .generate_grounded(rebuild_research_prompt(source_description), None)
        .await?;
    debug!(
        "Research summary: {} chars, {} sources",
        research.data.text.len(),
        research.data.sources.len()
    );

    let structured = client
        .generate_structured::<RebuildAnalysis>(
            ModelProfile::FastStructured,
            rebuild_structuring_prompt(&research.data.text),
            None,
            rebuild_structuring_schema(),
        )
        .await?;

    let mut analysis = structured.data;
    analysis.sources = research.data.sources;
    Ok(analysis)
}
