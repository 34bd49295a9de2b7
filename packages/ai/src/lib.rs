// ABOUTME: Generation client for the hosted model API
// ABOUTME: Capability profiles, typed structured calls, grounding, and media synthesis

pub mod backend;
pub mod client;
pub mod error;
pub mod gemini;
pub mod models;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

// Re-export backend contract types
pub use backend::{
    BinaryPart, FunctionCall, GenerationBackend, GenerationRequest, GenerationResponse,
    ImageRequest, OperationHandle, OperationStatus, Usage, VideoRequest,
};

// Re-export the typed client
pub use client::{Generated, GenerationClient, GroundedAnswer, ImageArtifact, VideoArtifact};

// Re-export errors and profiles
pub use error::{GenerationError, GenerationResult};
pub use gemini::GeminiBackend;
pub use models::{ModelProfile, PollPolicy, DEFAULT_THINKING_BUDGET};
