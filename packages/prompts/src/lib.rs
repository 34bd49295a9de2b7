// ABOUTME: Prompt builders and response schemas for Blueprint generation calls
// ABOUTME: One builder per call; the JSON shapes are contractual, the wording is not

pub mod analyzers;
pub mod interview;
pub mod stages;

pub use analyzers::{
    estimation_prompt, estimation_schema, feature_brainstorm_prompt, feature_brainstorm_schema,
    marketing_strategy_prompt, marketing_strategy_schema, rebuild_research_prompt,
    rebuild_structuring_prompt, rebuild_structuring_schema, refinement_prompt, refinement_schema,
    ARCHITECT_CHAT_SYSTEM_PROMPT,
};
pub use interview::{
    interview_question_prompt, interview_question_schema, update_field_declaration,
    INTERVIEW_SYSTEM_PROMPT, VOICE_SCOPING_SYSTEM_PROMPT,
};
pub use stages::{
    stage1_structure_prompt, stage1_structure_schema, stage2_architecture_prompt,
    stage2_architecture_schema, stage3_workspace_prompt, stage3_workspace_schema,
};
