// ABOUTME: Provider-neutral request/response types and the backend trait
// ABOUTME: Everything the typed client needs from a transport implementation

use async_trait::async_trait;
use blueprint_core::GroundingSource;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::GenerationResult;
use crate::models::ModelProfile;

/// One generation call, independent of the provider wire format
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub profile: ModelProfile,
    pub prompt: String,
    pub system_instruction: Option<String>,
    pub response_schema: Option<Value>,
    pub thinking_budget: Option<u32>,
    pub search_grounding: bool,
}

impl GenerationRequest {
    pub fn new(profile: ModelProfile, prompt: impl Into<String>) -> Self {
        Self {
            profile,
            prompt: prompt.into(),
            system_instruction: None,
            response_schema: None,
            thinking_budget: profile.default_thinking_budget(),
            search_grounding: false,
        }
    }

    pub fn with_system(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    pub fn with_schema(mut self, schema: Value) -> Self {
        self.response_schema = Some(schema);
        self
    }

    pub fn with_search_grounding(mut self) -> Self {
        self.search_grounding = true;
        self
    }
}

/// Base64-encoded binary payload returned inline by the provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BinaryPart {
    pub mime_type: String,
    pub data: String,
}

/// Tool invocation the model requested
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    pub args: Value,
}

/// Token accounting reported by the provider
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl Usage {
    pub fn total_tokens(&self) -> u32 {
        self.input_tokens + self.output_tokens
    }
}

/// Decoded provider reply before any schema-typed parsing
#[derive(Debug, Clone, Default)]
pub struct GenerationResponse {
    pub text: Option<String>,
    pub binary: Vec<BinaryPart>,
    pub grounding: Vec<GroundingSource>,
    pub function_calls: Vec<FunctionCall>,
    pub usage: Option<Usage>,
}

/// Image synthesis call parameters
#[derive(Debug, Clone)]
pub struct ImageRequest {
    pub prompt: String,
    pub aspect_ratio: String,
    pub size: String,
    pub count: u32,
}

/// Video synthesis call parameters; `seed_image` animates a still
#[derive(Debug, Clone)]
pub struct VideoRequest {
    pub prompt: String,
    pub seed_image: Option<BinaryPart>,
    pub aspect_ratio: String,
}

/// Server-side handle for a long-running operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationHandle {
    pub name: String,
}

/// Poll outcome for a long-running operation
#[derive(Debug, Clone, Default)]
pub struct OperationStatus {
    pub done: bool,
    pub uri: Option<String>,
}

/// Transport seam between the typed client and the provider. The production
/// implementation speaks the provider's REST API; tests substitute a
/// recording mock.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Single-shot text/structured generation
    async fn execute(&self, request: GenerationRequest) -> GenerationResult<GenerationResponse>;

    /// Submit a video synthesis job, returning its operation handle
    async fn start_video(&self, request: VideoRequest) -> GenerationResult<OperationHandle>;

    /// Check a previously submitted video job
    async fn poll_video(&self, handle: &OperationHandle) -> GenerationResult<OperationStatus>;

    /// Synchronous image synthesis
    async fn generate_images(&self, request: ImageRequest) -> GenerationResult<Vec<BinaryPart>>;
}
