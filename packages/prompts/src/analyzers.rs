// ABOUTME: Prompts and schemas for the auxiliary analyzers
// ABOUTME: Estimation, marketing strategy, rebuild research, brainstorming, refinement, chat

use blueprint_core::{ProjectData, ProjectDraft};
use serde_json::{json, Value};

fn pretty(value: &impl serde::Serialize) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

/// Commercial estimation: hours, token budget, API cost
pub fn estimation_prompt(project: &ProjectData) -> String {
    format!(
        r#"Estimate the commercial effort for building this project with an AI coding agent.

PROJECT:
{}

Give a development-hours range for a single senior engineer working with the agent, the projected agent token usage for the whole build, the resulting API cost in USD, and the assumptions the numbers rest on. Every numeric field is required.

Respond exclusively in JSON matching the schema."#,
        pretty(project)
    )
}

pub fn estimation_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "devHoursMin": { "type": "INTEGER" },
            "devHoursMax": { "type": "INTEGER" },
            "estimatedTokens": { "type": "INTEGER" },
            "apiCostUsd": { "type": "NUMBER" },
            "assumptions": { "type": "ARRAY", "items": { "type": "STRING" } }
        },
        "required": ["devHoursMin", "devHoursMax", "estimatedTokens", "apiCostUsd", "assumptions"]
    })
}

/// Marketing strategy with SWOT. Takes plain parts because the trigger fires
/// mid-interview, before the draft is complete.
pub fn marketing_strategy_prompt(title: &str, description: &str, target_audience: &str) -> String {
    format!(
        r#"Draft a go-to-market strategy for this software project.

Title: {}
Description: {}
Target Audience: {}

Provide a one-paragraph positioning statement, a SWOT analysis, the marketing channels that fit the audience, and monetization ideas.

Respond exclusively in JSON matching the schema."#,
        title, description, target_audience
    )
}

pub fn marketing_strategy_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "positioning": { "type": "STRING" },
            "swot": {
                "type": "OBJECT",
                "properties": {
                    "strengths": { "type": "ARRAY", "items": { "type": "STRING" } },
                    "weaknesses": { "type": "ARRAY", "items": { "type": "STRING" } },
                    "opportunities": { "type": "ARRAY", "items": { "type": "STRING" } },
                    "threats": { "type": "ARRAY", "items": { "type": "STRING" } }
                },
                "required": ["strengths", "weaknesses", "opportunities", "threats"]
            },
            "channels": { "type": "ARRAY", "items": { "type": "STRING" } },
            "monetizationIdeas": { "type": "ARRAY", "items": { "type": "STRING" } }
        },
        "required": ["positioning", "swot", "channels", "monetizationIdeas"]
    })
}

/// Step one of the rebuild analysis: free-text, search-grounded research
pub fn rebuild_research_prompt(source_description: &str) -> String {
    format!(
        r#"Research the existing product "{}" using current web sources.

Summarize: its main features, its known weaknesses and user complaints, where a rebuild could realistically improve on it, and how it is monetized. Write plain prose; this summary will be parsed in a second step."#,
        source_description
    )
}

/// Step two: re-parse the free-text research into the shared shape
pub fn rebuild_structuring_prompt(research_text: &str) -> String {
    format!(
        r#"Convert this product research summary into structured JSON.

RESEARCH SUMMARY:
{}

Extract the features, the weaknesses, the concrete optimization opportunities for a rebuild, and the monetization model if one is mentioned.

Respond exclusively in JSON matching the schema."#,
        research_text
    )
}

pub fn rebuild_structuring_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "features": { "type": "ARRAY", "items": { "type": "STRING" } },
            "weaknesses": { "type": "ARRAY", "items": { "type": "STRING" } },
            "optimizations": { "type": "ARRAY", "items": { "type": "STRING" } },
            "monetization": { "type": "STRING" }
        },
        "required": ["features", "weaknesses", "optimizations"]
    })
}

/// Feature brainstorm: suggestion list only. Works on the partial draft so
/// the interview can offer ideas while the feature list is being collected.
pub fn feature_brainstorm_prompt(draft: &ProjectDraft) -> String {
    let planned = draft
        .key_features
        .as_deref()
        .map(|features| features.join(", "))
        .unwrap_or_else(|| "none yet".to_string());

    format!(
        r#"Brainstorm features for this project.

Title: {}
Description: {}
Target Audience: {}
Already planned: {}

Propose 5 concise feature names that complement the planned set without duplicating it.

Respond exclusively in JSON: an array of strings."#,
        draft.title.as_deref().unwrap_or("(untitled)"),
        draft.description.as_deref().unwrap_or("(not described yet)"),
        draft.target_audience.as_deref().unwrap_or("(unspecified)"),
        planned
    )
}

pub fn feature_brainstorm_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": { "type": "STRING" }
    })
}

/// Component refinement for a selected artifact (file, endpoint, tech choice)
pub fn refinement_prompt(target: &str, project: &ProjectData) -> String {
    format!(
        r#"The user selected this artifact from their generated project plan:

TARGET: {}

PROJECT CONTEXT:
{}

Suggest 2-4 focused improvements for the target. Each suggestion has a type (modification, refactor, performance, or readability), a short title, a description, and optionally a small code snippet.

Respond exclusively in JSON matching the schema."#,
        target,
        pretty(project)
    )
}

pub fn refinement_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "type": {
                    "type": "STRING",
                    "enum": ["modification", "refactor", "performance", "readability"]
                },
                "title": { "type": "STRING" },
                "description": { "type": "STRING" },
                "codeSnippet": { "type": "STRING" }
            },
            "required": ["type", "title", "description"]
        }
    })
}

/// System instruction for the search-grounded architect chat
pub const ARCHITECT_CHAT_SYSTEM_PROMPT: &str = r#"You are a senior software architect copilot.

Answer questions about cloud architectures, frameworks, and code structure. Ground claims about current tooling in web search results and keep answers under 300 words. When you cite a source, rely on it."#;
