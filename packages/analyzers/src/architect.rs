// ABOUTME: Search-grounded architect chat
// ABOUTME: Free-form questions answered with cited web sources

use blueprint_ai::{GenerationClient, GenerationResult, GroundedAnswer};
use blueprint_prompts::ARCHITECT_CHAT_SYSTEM_PROMPT;

/// Answer an architecture question with grounding sources attached
pub async fn ask_architect(
    client: &GenerationClient,
    question: &str,
) -> GenerationResult<GroundedAnswer> {
    let generated = client
        .generate_grounded(
            question.to_string(),
            Some(ARCHITECT_CHAT_SYSTEM_PROMPT.to_string()),
        )
        .await?;

    Ok(generated.data)
}
