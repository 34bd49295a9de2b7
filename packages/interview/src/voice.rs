// ABOUTME: Configuration surface for the realtime voice scoping session
// ABOUTME: The audio transport is provider-side; this only assembles the session setup

use blueprint_ai::ModelProfile;
use blueprint_prompts::{update_field_declaration, VOICE_SCOPING_SYSTEM_PROMPT};
use serde::Serialize;
use serde_json::Value;

/// Everything a live audio client needs to open the scoping session
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceSessionConfig {
    pub model: String,
    pub system_instruction: String,
    pub function_declarations: Vec<Value>,
}

pub fn voice_session_config() -> VoiceSessionConfig {
    VoiceSessionConfig {
        model: ModelProfile::LiveAudio.model_id().to_string(),
        system_instruction: VOICE_SCOPING_SYSTEM_PROMPT.to_string(),
        function_declarations: vec![update_field_declaration()],
    }
}
