// ABOUTME: Model capability profiles and their provider model identities
// ABOUTME: Profile selection is a pure function; callers never name models directly

use std::time::Duration;

/// Default thinking budget attached to deep-reasoning calls
pub const DEFAULT_THINKING_BUDGET: u32 = 2000;

/// Capability profile a call runs under. The provider model id is derived
/// from the profile so call sites stay free of model names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelProfile {
    /// Fast structured-output generation (interview questions, stage schemas)
    FastStructured,
    /// Slow, high-quality reasoning (master prompt compilation)
    DeepReasoning,
    /// Web-search-grounded answers with cited sources
    SearchGrounded,
    /// Still image synthesis
    ImageSynthesis,
    /// Long-running video synthesis
    VideoSynthesis,
    /// Realtime bidirectional audio session
    LiveAudio,
}

impl ModelProfile {
    pub fn model_id(&self) -> &'static str {
        match self {
            ModelProfile::FastStructured => "gemini-3-flash-preview",
            ModelProfile::DeepReasoning => "gemini-3-pro-preview",
            ModelProfile::SearchGrounded => "gemini-3-flash-preview",
            ModelProfile::ImageSynthesis => "imagen-4.0-generate-001",
            ModelProfile::VideoSynthesis => "veo-3.1-generate-preview",
            ModelProfile::LiveAudio => "gemini-2.5-flash-native-audio-preview-09-2025",
        }
    }

    /// Thinking budget the profile carries unless the caller overrides it
    pub fn default_thinking_budget(&self) -> Option<u32> {
        match self {
            ModelProfile::DeepReasoning => Some(DEFAULT_THINKING_BUDGET),
            _ => None,
        }
    }
}

/// Bound on the video-synthesis poll loop. The loop sleeps `interval`
/// between checks and gives up after `max_attempts`, surfacing a Timeout.
#[derive(Debug, Clone, Copy)]
pub struct PollPolicy {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(10),
            max_attempts: 30,
        }
    }
}

impl PollPolicy {
    /// Total wall-clock budget the policy allows
    pub fn max_wait(&self) -> Duration {
        self.interval * self.max_attempts
    }
}
