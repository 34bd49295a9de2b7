// ABOUTME: Typed generation client over a pluggable backend
// ABOUTME: Structured parsing, grounded answers, image synthesis, and bounded video polling

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, info};

use blueprint_core::GroundingSource;

use crate::backend::{
    GenerationBackend, GenerationRequest, ImageRequest, Usage, VideoRequest,
};
use crate::error::{GenerationError, GenerationResult};
use crate::gemini::GeminiBackend;
use crate::models::{ModelProfile, PollPolicy};

/// Typed payload plus the provider's token accounting for the call
#[derive(Debug, Clone)]
pub struct Generated<T> {
    pub data: T,
    pub usage: Option<Usage>,
}

/// Search-grounded answer with the sources the model cited
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundedAnswer {
    pub text: String,
    pub sources: Vec<GroundingSource>,
}

/// Inline image produced by the synthesis model
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageArtifact {
    pub mime_type: String,
    pub base64_data: String,
}

/// Reference to a finished video artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoArtifact {
    pub uri: String,
}

/// Strip markdown code fences if present (```json ... ```)
fn strip_code_fences(text: &str) -> &str {
    let cleaned = text.trim();
    if !cleaned.starts_with("```") {
        return cleaned;
    }
    // Find the first newline after the opening fence
    let start = cleaned.find('\n').map(|i| i + 1).unwrap_or(0);
    // Find the closing fence (search from start to avoid the opening fence)
    let end = cleaned[start..]
        .rfind("```")
        .map(|i| i + start)
        .unwrap_or(cleaned.len());
    cleaned[start..end].trim()
}

/// Single choke point for all calls to the external generation service.
/// Stateless between calls; every method issues exactly one logical request.
pub struct GenerationClient {
    backend: Arc<dyn GenerationBackend>,
    poll_policy: PollPolicy,
}

impl GenerationClient {
    /// Production client reading the API key from the environment
    pub fn from_env() -> Self {
        Self::with_backend(Arc::new(GeminiBackend::new()))
    }

    pub fn with_backend(backend: Arc<dyn GenerationBackend>) -> Self {
        Self {
            backend,
            poll_policy: PollPolicy::default(),
        }
    }

    pub fn with_poll_policy(mut self, poll_policy: PollPolicy) -> Self {
        self.poll_policy = poll_policy;
        self
    }

    /// Issue a structured call and parse the reply against `T`.
    /// Either returns a value conforming to the declared shape or fails with
    /// a parse error; the caller never sees a partially-typed object.
    pub async fn generate_structured<T: DeserializeOwned>(
        &self,
        profile: ModelProfile,
        prompt: String,
        system_instruction: Option<String>,
        schema: Value,
    ) -> GenerationResult<Generated<T>> {
        let mut request = GenerationRequest::new(profile, prompt).with_schema(schema);
        if let Some(instruction) = system_instruction {
            request = request.with_system(instruction);
        }
        let response = self.backend.execute(request).await?;

        let text = response
            .text
            .ok_or_else(|| GenerationError::EmptyResult("no text in response".to_string()))?;
        let json_text = strip_code_fences(&text);

        debug!(
            "structured response (first 500 chars): {}",
            &json_text[..json_text.len().min(500)]
        );
        let data: T = serde_json::from_str(json_text).map_err(|e| {
            error!(
                "JSON parsing failed: {}. JSON snippet: {}",
                e,
                &json_text[..json_text.len().min(500)]
            );
            GenerationError::Parse(format!("Failed to parse JSON: {}", e))
        })?;

        Ok(Generated {
            data,
            usage: response.usage,
        })
    }

    /// Free-text generation
    pub async fn generate_text(
        &self,
        profile: ModelProfile,
        prompt: String,
        system_instruction: Option<String>,
    ) -> GenerationResult<Generated<String>> {
        let mut request = GenerationRequest::new(profile, prompt);
        if let Some(instruction) = system_instruction {
            request = request.with_system(instruction);
        }
        let response = self.backend.execute(request).await?;

        let text = response
            .text
            .ok_or_else(|| GenerationError::EmptyResult("no text in response".to_string()))?;
        Ok(Generated {
            data: text,
            usage: response.usage,
        })
    }

    /// Web-search-grounded answer with cited sources
    pub async fn generate_grounded(
        &self,
        prompt: String,
        system_instruction: Option<String>,
    ) -> GenerationResult<Generated<GroundedAnswer>> {
        let mut request =
            GenerationRequest::new(ModelProfile::SearchGrounded, prompt).with_search_grounding();
        if let Some(instruction) = system_instruction {
            request = request.with_system(instruction);
        }
        let response = self.backend.execute(request).await?;

        let text = response
            .text
            .ok_or_else(|| GenerationError::EmptyResult("no text in response".to_string()))?;
        Ok(Generated {
            data: GroundedAnswer {
                text,
                sources: response.grounding,
            },
            usage: response.usage,
        })
    }

    /// Synchronous image synthesis. Fails with an empty-result error when the
    /// provider reports success but returns no image part.
    pub async fn generate_image(
        &self,
        prompt: String,
        aspect_ratio: &str,
        size: &str,
    ) -> GenerationResult<ImageArtifact> {
        let parts = self
            .backend
            .generate_images(ImageRequest {
                prompt,
                aspect_ratio: aspect_ratio.to_string(),
                size: size.to_string(),
                count: 1,
            })
            .await?;

        let part = parts
            .into_iter()
            .next()
            .ok_or_else(|| GenerationError::EmptyResult("no image part in response".to_string()))?;
        Ok(ImageArtifact {
            mime_type: part.mime_type,
            base64_data: part.data,
        })
    }

    /// Long-running video synthesis: submit, then poll at a fixed interval
    /// until done. The loop is bounded by the client's poll policy and fails
    /// with a timeout once the budget is spent.
    pub async fn generate_video(
        &self,
        prompt: String,
        seed_image: Option<ImageArtifact>,
        aspect_ratio: &str,
    ) -> GenerationResult<VideoArtifact> {
        let handle = self
            .backend
            .start_video(VideoRequest {
                prompt,
                seed_image: seed_image.map(|image| crate::backend::BinaryPart {
                    mime_type: image.mime_type,
                    data: image.base64_data,
                }),
                aspect_ratio: aspect_ratio.to_string(),
            })
            .await?;

        for attempt in 1..=self.poll_policy.max_attempts {
            tokio::time::sleep(self.poll_policy.interval).await;
            let status = self.backend.poll_video(&handle).await?;
            debug!(
                attempt,
                done = status.done,
                "polled video operation {}",
                handle.name
            );
            if status.done {
                let uri = status.uri.ok_or_else(|| {
                    GenerationError::EmptyResult(
                        "operation finished without a video artifact".to_string(),
                    )
                })?;
                info!("video synthesis finished after {} polls", attempt);
                return Ok(VideoArtifact { uri });
            }
        }

        Err(GenerationError::Timeout {
            waited_secs: self.poll_policy.max_wait().as_secs(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fences_are_stripped_from_json_replies() {
        let fenced = "```json\n{\"a\": 1}\n```";
        assert_eq!(strip_code_fences(fenced), "{\"a\": 1}");
    }

    #[test]
    fn bare_json_passes_through_untouched() {
        assert_eq!(strip_code_fences("  {\"a\": 1} "), "{\"a\": 1}");
    }

    #[test]
    fn fence_without_language_tag_still_strips() {
        let fenced = "```\n[1, 2, 3]\n```";
        assert_eq!(strip_code_fences(fenced), "[1, 2, 3]");
    }

    #[test]
    fn unterminated_fence_keeps_the_body() {
        let fenced = "```json\n{\"a\": 1}";
        assert_eq!(strip_code_fences(fenced), "{\"a\": 1}");
    }
}
