// ABOUTME: REST backend speaking the hosted generation API's wire format
// ABOUTME: Request shaping, auth headers, status translation, and response flattening

use std::env;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, error, info};

use async_trait::async_trait;
use blueprint_core::GroundingSource;

use crate::backend::{
    BinaryPart, FunctionCall, GenerationBackend, GenerationRequest, GenerationResponse,
    ImageRequest, OperationHandle, OperationStatus, Usage, VideoRequest,
};
use crate::error::{GenerationError, GenerationResult};

const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<Tool>>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

impl Content {
    fn text(text: impl Into<String>) -> Self {
        Self {
            parts: vec![Part {
                text: Some(text.into()),
                ..Default::default()
            }],
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    function_call: Option<WireFunctionCall>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireFunctionCall {
    name: String,
    #[serde(default)]
    args: Value,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    thinking_config: Option<ThinkingConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    thinking_budget: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Tool {
    google_search: Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Content,
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Deserialize)]
struct GroundingChunk {
    web: Option<WebSource>,
}

#[derive(Debug, Deserialize)]
struct WebSource {
    #[serde(default)]
    title: String,
    uri: String,
}

#[derive(Debug, Serialize)]
struct ImagePredictRequest {
    instances: Vec<ImageInstance>,
    parameters: ImageParameters,
}

#[derive(Debug, Serialize)]
struct ImageInstance {
    prompt: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageParameters {
    sample_count: u32,
    aspect_ratio: String,
    sample_image_size: String,
}

#[derive(Debug, Deserialize)]
struct ImagePredictResponse {
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Prediction {
    bytes_base64_encoded: Option<String>,
    mime_type: Option<String>,
}

#[derive(Debug, Serialize)]
struct VideoStartRequest {
    instances: Vec<VideoInstance>,
    parameters: VideoParameters,
}

#[derive(Debug, Serialize)]
struct VideoInstance {
    prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<WireImage>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireImage {
    bytes_base64_encoded: String,
    mime_type: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VideoParameters {
    aspect_ratio: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OperationEnvelope {
    name: String,
    #[serde(default)]
    done: bool,
    response: Option<OperationResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OperationResponse {
    generate_video_response: Option<GenerateVideoResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateVideoResponse {
    #[serde(default)]
    generated_samples: Vec<GeneratedSample>,
}

#[derive(Debug, Deserialize)]
struct GeneratedSample {
    video: Option<VideoRef>,
}

#[derive(Debug, Deserialize)]
struct VideoRef {
    uri: String,
}

/// Production backend for the hosted generation API
pub struct GeminiBackend {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl GeminiBackend {
    /// Create HTTP client with timeout configuration
    fn create_client() -> Client {
        Client::builder()
            .timeout(std::time::Duration::from_secs(600))
            .connect_timeout(std::time::Duration::from_secs(10))
            .build()
            .expect("Failed to build HTTP client")
    }

    /// Creates a new backend instance.
    /// API key is fetched from the GEMINI_API_KEY environment variable.
    pub fn new() -> Self {
        let api_key = env::var("GEMINI_API_KEY").ok();
        if api_key.is_none() {
            info!("GEMINI_API_KEY not set - generation calls will fail until a key is configured");
        }

        Self {
            client: Self::create_client(),
            api_key,
            base_url: GEMINI_API_URL.to_string(),
        }
    }

    /// Creates a new backend instance with a specific API key
    pub fn with_api_key(api_key: String) -> Self {
        Self {
            client: Self::create_client(),
            api_key: Some(api_key),
            base_url: GEMINI_API_URL.to_string(),
        }
    }

    /// Point the backend at a different host (test servers)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn key(&self) -> GenerationResult<&str> {
        self.api_key
            .as_deref()
            .ok_or(GenerationError::MissingApiKey)
    }

    async fn send<B: Serialize, R: DeserializeOwned>(
        &self,
        method: reqwest::Method,
        url: String,
        body: Option<&B>,
    ) -> GenerationResult<R> {
        let key = self.key()?;

        let mut request = self
            .client
            .request(method, &url)
            .header("x-goog-api-key", key)
            .header("content-type", "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                error!("generation API request timed out: {}", url);
            } else if e.is_connect() {
                error!("failed to connect to generation API: {}", e);
            } else {
                error!("generation API request failed: {}", e);
            }
            GenerationError::Transport(e)
        })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!("generation API error: {} - {}", status, error_text);
            return Err(GenerationError::Api {
                status,
                message: error_text,
            });
        }

        response
            .json()
            .await
            .map_err(|e| GenerationError::Parse(e.to_string()))
    }

    fn build_request(request: &GenerationRequest) -> GenerateContentRequest {
        let needs_config = request.response_schema.is_some() || request.thinking_budget.is_some();
        let generation_config = needs_config.then(|| GenerationConfig {
            response_mime_type: request
                .response_schema
                .as_ref()
                .map(|_| "application/json".to_string()),
            response_schema: request.response_schema.clone(),
            thinking_config: request
                .thinking_budget
                .map(|thinking_budget| ThinkingConfig { thinking_budget }),
        });

        let tools = request.search_grounding.then(|| {
            vec![Tool {
                google_search: json!({}),
            }]
        });

        GenerateContentRequest {
            contents: vec![Content::text(request.prompt.clone())],
            system_instruction: request.system_instruction.clone().map(Content::text),
            generation_config,
            tools,
        }
    }

    fn flatten_response(wire: GenerateContentResponse) -> GenerationResponse {
        let usage = wire.usage_metadata.map(|u| Usage {
            input_tokens: u.prompt_token_count,
            output_tokens: u.candidates_token_count,
        });

        let mut response = GenerationResponse {
            usage,
            ..Default::default()
        };

        let Some(candidate) = wire.candidates.into_iter().next() else {
            return response;
        };

        let mut text = String::new();
        for part in candidate.content.parts {
            if let Some(part_text) = part.text {
                text.push_str(&part_text);
            }
            if let Some(inline) = part.inline_data {
                response.binary.push(BinaryPart {
                    mime_type: inline.mime_type,
                    data: inline.data,
                });
            }
            if let Some(call) = part.function_call {
                response.function_calls.push(FunctionCall {
                    name: call.name,
                    args: call.args,
                });
            }
        }
        if !text.is_empty() {
            response.text = Some(text);
        }

        if let Some(grounding) = candidate.grounding_metadata {
            response.grounding = grounding
                .grounding_chunks
                .into_iter()
                .filter_map(|chunk| chunk.web)
                .map(|web| GroundingSource {
                    title: web.title,
                    uri: web.uri,
                })
                .collect();
        }

        response
    }
}

impl Default for GeminiBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GenerationBackend for GeminiBackend {
    async fn execute(&self, request: GenerationRequest) -> GenerationResult<GenerationResponse> {
        let model = request.profile.model_id();
        let url = format!("{}/models/{}:generateContent", self.base_url, model);
        debug!(
            model,
            structured = request.response_schema.is_some(),
            grounded = request.search_grounding,
            "issuing generation request"
        );

        let body = Self::build_request(&request);
        let wire: GenerateContentResponse = self
            .send(reqwest::Method::POST, url, Some(&body))
            .await?;
        Ok(Self::flatten_response(wire))
    }

    async fn start_video(&self, request: VideoRequest) -> GenerationResult<OperationHandle> {
        let model = crate::models::ModelProfile::VideoSynthesis.model_id();
        let url = format!("{}/models/{}:predictLongRunning", self.base_url, model);

        let body = VideoStartRequest {
            instances: vec![VideoInstance {
                prompt: request.prompt,
                image: request.seed_image.map(|part| WireImage {
                    bytes_base64_encoded: part.data,
                    mime_type: part.mime_type,
                }),
            }],
            parameters: VideoParameters {
                aspect_ratio: request.aspect_ratio,
            },
        };

        let envelope: OperationEnvelope = self
            .send(reqwest::Method::POST, url, Some(&body))
            .await?;
        info!("video synthesis started: {}", envelope.name);
        Ok(OperationHandle {
            name: envelope.name,
        })
    }

    async fn poll_video(&self, handle: &OperationHandle) -> GenerationResult<OperationStatus> {
        let url = format!("{}/{}", self.base_url, handle.name);
        let envelope: OperationEnvelope = self
            .send::<(), _>(reqwest::Method::GET, url, None)
            .await?;

        let uri = envelope
            .response
            .and_then(|r| r.generate_video_response)
            .and_then(|r| r.generated_samples.into_iter().next())
            .and_then(|s| s.video)
            .map(|v| v.uri);

        Ok(OperationStatus {
            done: envelope.done,
            uri,
        })
    }

    async fn generate_images(&self, request: ImageRequest) -> GenerationResult<Vec<BinaryPart>> {
        let model = crate::models::ModelProfile::ImageSynthesis.model_id();
        let url = format!("{}/models/{}:predict", self.base_url, model);

        let body = ImagePredictRequest {
            instances: vec![ImageInstance {
                prompt: request.prompt,
            }],
            parameters: ImageParameters {
                sample_count: request.count,
                aspect_ratio: request.aspect_ratio,
                sample_image_size: request.size,
            },
        };

        let wire: ImagePredictResponse = self
            .send(reqwest::Method::POST, url, Some(&body))
            .await?;

        Ok(wire
            .predictions
            .into_iter()
            .filter_map(|p| {
                p.bytes_base64_encoded.map(|data| BinaryPart {
                    mime_type: p.mime_type.unwrap_or_else(|| "image/png".to_string()),
                    data,
                })
            })
            .collect())
    }
}
