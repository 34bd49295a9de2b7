// ABOUTME: Prompts and schemas for the three mandatory pipeline stages
// ABOUTME: Structure extraction, architecture synthesis, and workspace compilation

use blueprint_core::{ProjectData, SystemModel, TechnicalArchitecture};
use serde_json::{json, Value};

fn pretty(value: &impl serde::Serialize) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

/// Stage 1: extract a logical system model from the scoped project
pub fn stage1_structure_prompt(project: &ProjectData) -> String {
    format!(
        r#"Transform this project idea into a logical system model. Keep descriptions and entity names in the same language as the input.

Title: {}
Description: {}
Target Audience: {}
Key Features: {}
Scope: {}
Complexity: {}

Model the entities with their attributes, the relationships between them, the primary user flows, and a concise statement of the core business logic.

Respond exclusively in JSON matching the schema."#,
        project.title,
        project.description,
        project.target_audience,
        project.key_features.join(", "),
        project.project_scope,
        project.complexity,
    )
}

pub fn stage1_structure_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "entities": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING" },
                        "description": { "type": "STRING" },
                        "properties": { "type": "ARRAY", "items": { "type": "STRING" } }
                    },
                    "required": ["name", "description", "properties"]
                }
            },
            "relationships": { "type": "ARRAY", "items": { "type": "STRING" } },
            "userFlows": { "type": "ARRAY", "items": { "type": "STRING" } },
            "coreLogic": { "type": "STRING" }
        },
        "required": ["entities", "relationships", "userFlows", "coreLogic"]
    })
}

/// Stage 2: synthesize a technical architecture from the system model plus
/// the original project data, so late preferences (ecosystem, hosting,
/// security level) shape the stack choice.
pub fn stage2_architecture_prompt(model: &SystemModel, project: &ProjectData) -> String {
    let ecosystem = project
        .ecosystem_preference
        .map(|e| e.to_string())
        .unwrap_or_else(|| "no preference".to_string());

    format!(
        r#"Based on this system model, generate a comprehensive technical architecture. Maintain language consistency with the source.

SYSTEM MODEL:
{}

CONSTRAINTS FROM THE PROJECT BRIEF:
- Scope: {}
- Complexity: {}
- Hosting/Deployment: {}
- Test strategy: {}
- Security level: {}
- Ecosystem preference: {}

Recommend ranked technology options with a one-sentence justification each, a folder structure, the API endpoints with parameters and response shapes, explicit security requirements, and operational guardrails.

Respond exclusively in JSON matching the schema."#,
        pretty(model),
        project.project_scope,
        project.complexity,
        project.hosting_deployment,
        project.test_strategy,
        project.security_level,
        ecosystem,
    )
}

pub fn stage2_architecture_schema() -> Value {
    let tech_option = json!({
        "type": "OBJECT",
        "properties": {
            "name": { "type": "STRING" },
            "justification": { "type": "STRING" }
        },
        "required": ["name", "justification"]
    });

    json!({
        "type": "OBJECT",
        "properties": {
            "techStack": {
                "type": "OBJECT",
                "properties": {
                    "frontend": { "type": "ARRAY", "items": tech_option },
                    "backend": { "type": "ARRAY", "items": tech_option },
                    "database": { "type": "ARRAY", "items": tech_option },
                    "additional": { "type": "ARRAY", "items": { "type": "STRING" } }
                },
                "required": ["frontend", "backend", "database", "additional"]
            },
            "folderStructure": { "type": "STRING" },
            "apiEndpoints": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "method": { "type": "STRING" },
                        "path": { "type": "STRING" },
                        "description": { "type": "STRING" },
                        "parameters": {
                            "type": "ARRAY",
                            "items": {
                                "type": "OBJECT",
                                "properties": {
                                    "name": { "type": "STRING" },
                                    "type": { "type": "STRING" },
                                    "required": { "type": "BOOLEAN" },
                                    "description": { "type": "STRING" }
                                },
                                "required": ["name", "type", "required", "description"]
                            }
                        },
                        "response": { "type": "STRING" }
                    },
                    "required": ["method", "path", "description", "parameters", "response"]
                }
            },
            "securityRequirements": { "type": "ARRAY", "items": { "type": "STRING" } },
            "guardrails": {
                "type": "OBJECT",
                "properties": {
                    "security": { "type": "ARRAY", "items": { "type": "STRING" } },
                    "performance": { "type": "ARRAY", "items": { "type": "STRING" } },
                    "reliability": { "type": "ARRAY", "items": { "type": "STRING" } }
                },
                "required": ["security", "performance", "reliability"]
            }
        },
        "required": ["techStack", "folderStructure", "apiEndpoints", "securityRequirements", "guardrails"]
    })
}

/// Stage 3: compile everything into the master prompt and workspace files
pub fn stage3_workspace_prompt(
    project: &ProjectData,
    model: &SystemModel,
    architecture: &TechnicalArchitecture,
) -> String {
    format!(
        r#"Compile the following project data, system model, and technical architecture into a workspace for an autonomous AI programming agent.

The centerpiece is a single, highly detailed 'Master Prompt' (a Markdown document) the agent uses to build the entire system from scratch. Alongside it, produce the supporting workspace files the agent's environment expects (agent instructions, architecture notes, setup steps), each with a short description and its language. Target the {} environment and the {} model. Output content in the language primarily used in the project description.

PROJECT INFO:
{}

SYSTEM MODEL:
{}

TECHNICAL ARCHITECTURE:
{}

Respond exclusively in JSON matching the schema."#,
        project.ide,
        project.preferred_model,
        pretty(project),
        pretty(model),
        pretty(architecture),
    )
}

pub fn stage3_workspace_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "masterPrompt": { "type": "STRING" },
            "workspaceFiles": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING" },
                        "content": { "type": "STRING" },
                        "description": { "type": "STRING" },
                        "language": { "type": "STRING" }
                    },
                    "required": ["name", "content", "description", "language"]
                }
            }
        },
        "required": ["masterPrompt", "workspaceFiles"]
    })
}
