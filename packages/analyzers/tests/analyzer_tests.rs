// ABOUTME: Integration tests for the auxiliary analyzers against a recording mock backend
// ABOUTME: Covers typed parsing, the two-step rebuild flow, and profile selection

use std::sync::Arc;

use blueprint_ai::testing::MockBackend;
use blueprint_ai::{GenerationClient, GenerationError, GenerationResponse, ModelProfile};
use blueprint_analyzers::{
    analyze_existing_product, ask_architect, brainstorm_features, estimate_effort,
    marketing_strategy, refine_component,
};
use blueprint_core::{
    Complexity, GroundingSource, HostingTarget, IdePreference, ModelPreference, ProjectData,
    ProjectDraft, ProjectScope, RefinementKind, RepoPlan, SecurityLevel, TestStrategy,
};
use pretty_assertions::assert_eq;
use serde_json::json;

// ============================================================================
// Helpers
// ============================================================================

fn sample_project() -> ProjectData {
    ProjectData {
        title: "TaskFlow".to_string(),
        description: "A kanban board for freelancers".to_string(),
        target_audience: "Freelancers".to_string(),
        key_features: vec!["auth".to_string(), "kanban".to_string()],
        project_scope: ProjectScope::Mvp,
        complexity: Complexity::Interactive,
        ide: IdePreference::Cursor,
        preferred_model: ModelPreference::ClaudeSonnet,
        github_repo: RepoPlan::CreateNew,
        hosting_deployment: HostingTarget::Vercel,
        test_strategy: TestStrategy::IntegrationFocus,
        security_level: SecurityLevel::Standard,
        ecosystem_preference: None,
        is_rebuild: false,
        existing_product: None,
        marketing_strategy: None,
        estimation: None,
        rebuild_analysis: None,
    }
}

fn client_over(backend: Arc<MockBackend>) -> GenerationClient {
    GenerationClient::with_backend(backend)
}

// ============================================================================
// Estimation
// ============================================================================

#[tokio::test]
async fn test_estimation_returns_complete_object() {
    let backend = Arc::new(MockBackend::new());
    backend.push_json(json!({
        "devHoursMin": 40,
        "devHoursMax": 80,
        "estimatedTokens": 1_500_000,
        "apiCostUsd": 42.5,
        "assumptions": ["single senior engineer", "agent does scaffolding"]
    }));
    let client = client_over(backend.clone());

    let estimation = estimate_effort(&client, &sample_project()).await.unwrap();

    assert_eq!(estimation.dev_hours_min, 40);
    assert_eq!(estimation.dev_hours_max, 80);
    assert_eq!(estimation.estimated_tokens, 1_500_000);
    assert_eq!(estimation.assumptions.len(), 2);

    let recorded = backend.recorded();
    assert_eq!(recorded.len(), 1);
    assert!(recorded[0].prompt.contains("TaskFlow"));
    assert!(recorded[0].response_schema.is_some());

    println!("✓ Estimation parses into a fully populated object");
}

#[tokio::test]
async fn test_estimation_with_missing_numeric_is_a_parse_error() {
    let backend = Arc::new(MockBackend::new());
    // devHoursMax missing: the reply must be rejected, not half-filled
    backend.push_json(json!({
        "devHoursMin": 40,
        "estimatedTokens": 1_500_000,
        "apiCostUsd": 42.5,
        "assumptions": []
    }));
    let client = client_over(backend);

    let result = estimate_effort(&client, &sample_project()).await;
    assert!(matches!(result, Err(GenerationError::Parse(_))));

    println!("✓ Partial numeric estimation replies fail as parse errors");
}

// ============================================================================
// Marketing strategy
// ============================================================================

#[tokio::test]
async fn test_marketing_strategy_works_on_a_partial_draft() {
    let backend = Arc::new(MockBackend::new());
    backend.push_json(json!({
        "positioning": "The fastest board for solo work",
        "swot": {
            "strengths": ["focus"],
            "weaknesses": ["small team"],
            "opportunities": ["freelance boom"],
            "threats": ["incumbents"]
        },
        "channels": ["newsletters"],
        "monetizationIdeas": ["pro tier"]
    }));
    let client = client_over(backend.clone());

    let draft = ProjectDraft {
        title: Some("TaskFlow".to_string()),
        description: Some("A kanban board for freelancers".to_string()),
        target_audience: Some("Freelancers".to_string()),
        ..Default::default()
    };

    let strategy = marketing_strategy(&client, &draft).await.unwrap();
    assert_eq!(strategy.positioning, "The fastest board for solo work");
    assert_eq!(strategy.swot.strengths, vec!["focus".to_string()]);

    let recorded = backend.recorded();
    assert!(recorded[0].prompt.contains("Freelancers"));

    println!("✓ Marketing strategy runs against the mid-interview draft");
}

// ============================================================================
// Rebuild analysis (two-step)
// ============================================================================

#[tokio::test]
async fn test_rebuild_analysis_chains_research_into_structuring() {
    let backend = Arc::new(MockBackend::new());

    // Step 1: grounded research reply with sources
    backend.push_response(GenerationResponse {
        text: Some("Trello has boards and power-ups; users complain about pricing.".to_string()),
        grounding: vec![GroundingSource {
            title: "Trello review".to_string(),
            uri: "https://example.com/trello".to_string(),
        }],
        ..Default::default()
    });
    // Step 2: structuring reply
    backend.push_json(json!({
        "features": ["boards", "power-ups"],
        "weaknesses": ["pricing"],
        "optimizations": ["simpler tiers"],
        "monetization": "subscriptions"
    }));

    let client = client_over(backend.clone());
    let analysis = analyze_existing_product(&client, "Trello").await.unwrap();

    assert_eq!(analysis.features, vec!["boards", "power-ups"]);
    assert_eq!(analysis.monetization.as_deref(), Some("subscriptions"));
    // Sources come from step one, not from the structuring model
    assert_eq!(analysis.sources.len(), 1);
    assert_eq!(analysis.sources[0].uri, "https://example.com/trello");

    let recorded = backend.recorded();
    assert_eq!(recorded.len(), 2);
    assert!(recorded[0].search_grounding);
    assert!(recorded[0].response_schema.is_none());
    assert!(!recorded[1].search_grounding);
    assert!(recorded[1].response_schema.is_some());
    assert!(recorded[1].prompt.contains("pricing"));

    println!("✓ Rebuild analysis researches first, structures second, keeps sources");
}

#[tokio::test]
async fn test_rebuild_analysis_propagates_research_failure() {
    let backend = Arc::new(MockBackend::new());
    backend.push_error(GenerationError::Api {
        status: 503,
        message: "overloaded".to_string(),
    });
    let client = client_over(backend.clone());

    let result = analyze_existing_product(&client, "Trello").await;
    assert!(matches!(result, Err(GenerationError::Api { status: 503, .. })));
    // The structuring step never ran
    assert_eq!(backend.call_count(), 1);

    println!("✓ A failed research step short-circuits the structuring call");
}

// ============================================================================
// Brainstorm and refinement
// ============================================================================

#[tokio::test]
async fn test_brainstorm_returns_plain_suggestion_list() {
    let backend = Arc::new(MockBackend::new());
    backend.push_json(json!(["Time tracking", "Invoice export", "Client portal"]));
    let client = client_over(backend);

    let draft = ProjectDraft {
        title: Some("TaskFlow".to_string()),
        description: Some("A kanban board".to_string()),
        ..Default::default()
    };

    let ideas = brainstorm_features(&client, &draft).await.unwrap();
    assert_eq!(ideas.len(), 3);
    assert_eq!(ideas[0], "Time tracking");

    println!("✓ Brainstorm yields a plain string list");
}

#[tokio::test]
async fn test_refinement_uses_the_deep_reasoning_profile() {
    let backend = Arc::new(MockBackend::new());
    backend.push_json(json!([
        {
            "type": "performance",
            "title": "Batch the board queries",
            "description": "Fetch lists and cards in one round trip",
            "codeSnippet": "SELECT * FROM cards WHERE board_id = $1"
        },
        {
            "type": "readability",
            "title": "Name the reducer actions",
            "description": "Replace string literals with an enum"
        }
    ]));
    let client = client_over(backend.clone());

    let suggestions = refine_component(&client, "GET /boards/:id", &sample_project())
        .await
        .unwrap();

    assert_eq!(suggestions.len(), 2);
    assert_eq!(suggestions[0].kind, RefinementKind::Performance);
    assert!(suggestions[0].code_snippet.is_some());
    assert!(suggestions[1].code_snippet.is_none());

    let recorded = backend.recorded();
    assert_eq!(recorded[0].profile, ModelProfile::DeepReasoning);
    assert!(recorded[0].thinking_budget.is_some());

    println!("✓ Refinement runs on the deep-reasoning profile with a thinking budget");
}

// ============================================================================
// Architect chat
// ============================================================================

#[tokio::test]
async fn test_ask_architect_carries_grounding_sources() {
    let backend = Arc::new(MockBackend::new());
    backend.push_response(GenerationResponse {
        text: Some("Use a managed Postgres to start.".to_string()),
        grounding: vec![GroundingSource {
            title: "Postgres hosting comparison".to_string(),
            uri: "https://example.com/pg".to_string(),
        }],
        ..Default::default()
    });
    let client = client_over(backend.clone());

    let answer = ask_architect(&client, "Which database should an MVP use?")
        .await
        .unwrap();

    assert!(answer.text.contains("Postgres"));
    assert_eq!(answer.sources.len(), 1);

    let recorded = backend.recorded();
    assert!(recorded[0].search_grounding);
    assert!(recorded[0].system_instruction.is_some());

    println!("✓ Architect chat is grounded and cites its sources");
}
