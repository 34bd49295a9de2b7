// ABOUTME: Prompts and schemas for interview question generation and voice scoping
// ABOUTME: Question builder embeds collected answers and pins the target field

use blueprint_core::{ProjectDraft, COMPLETE_SENTINEL};
use serde_json::{json, Value};

/// System prompt for all interview question calls
pub const INTERVIEW_SYSTEM_PROMPT: &str = r#"You are an experienced software architect conducting a project scoping interview.

Your role is to:
- Ask one precise, professional question at a time
- Build on answers the user has already given
- Offer concrete suggestions where they help the user answer faster
- Never ask about fields that are already filled

Always respond in valid JSON format matching the requested structure."#;

/// Build the prompt for the next interview question. The engine decides the
/// target field; the model only phrases the question (and suggestions).
pub fn interview_question_prompt(
    draft: &ProjectDraft,
    field_name: &str,
    field_hint: &str,
    option_labels: Option<&[&str]>,
    wants_suggestions: bool,
) -> String {
    let collected = serde_json::to_string_pretty(draft).unwrap_or_else(|_| "{}".to_string());

    let mut rules = vec![
        format!(
            "1. Formulate exactly one precise, helpful question about \"{}\" ({}).",
            field_name, field_hint
        ),
        "2. Reference earlier answers where they make the question more concrete.".to_string(),
    ];
    if let Some(options) = option_labels {
        rules.push(format!(
            "3. Present these options verbatim in \"suggestions\": {}.",
            options.join(", ")
        ));
    } else if wants_suggestions {
        rules.push(
            "3. Propose 3 concrete, context-specific values in \"suggestions\".".to_string(),
        );
    }
    rules.push(format!(
        "{}. Set \"currentField\" to \"{}\".",
        if option_labels.is_some() || wants_suggestions { 4 } else { 3 },
        field_name
    ));

    format!(
        r#"We are collecting the description of a new software project, one field per turn.

Data collected so far:
{}

Rules:
{}

Respond exclusively in JSON matching the schema."#,
        collected,
        rules.join("\n")
    )
}

/// Structured-output schema for an interview question reply
pub fn interview_question_schema(field_name: &str) -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "currentField": {
                "type": "STRING",
                "enum": [field_name, COMPLETE_SENTINEL]
            },
            "question": { "type": "STRING" },
            "suggestions": {
                "type": "ARRAY",
                "items": { "type": "STRING" }
            }
        },
        "required": ["currentField", "question"]
    })
}

/// Session instruction for the realtime voice scoping channel
pub const VOICE_SCOPING_SYSTEM_PROMPT: &str = r#"You are a voice assistant scoping a software project with the user.

Work through these fields in order, one short spoken question each: title, description, targetAudience, keyFeatures, projectScope, complexity, ide, preferredModel, githubRepo, hostingDeployment, testStrategy, securityLevel.

After every user answer, call update_field with the field name and the answer before asking the next question. Keep questions under two sentences."#;

/// Tool declaration the voice session uses to post answers into the draft
pub fn update_field_declaration() -> Value {
    json!({
        "name": "update_field",
        "description": "Record the user's answer for one interview field",
        "parameters": {
            "type": "OBJECT",
            "properties": {
                "field": { "type": "STRING" },
                "value": { "type": "STRING" }
            },
            "required": ["field", "value"]
        }
    })
}
