// ABOUTME: Integration tests for the generation client and REST backend
// ABOUTME: Covers structured parsing, grounding, media synthesis, and poll bounds

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use blueprint_ai::testing::MockBackend;
use blueprint_ai::{
    GeminiBackend, GenerationClient, GenerationError, ModelProfile, OperationStatus, PollPolicy,
};
use blueprint_core::InterviewPrompt;

fn question_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "currentField": {"type": "STRING"},
            "question": {"type": "STRING"}
        },
        "required": ["currentField", "question"]
    })
}

// ============================================================================
// REST Backend Tests
// ============================================================================

#[tokio::test]
async fn test_structured_call_parses_fenced_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-3-flash-preview:generateContent"))
        .and(header("x-goog-api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": {"parts": [{
                    "text": "```json\n{\"currentField\": \"title\", \"question\": \"What is the project called?\"}\n```"
                }]}
            }],
            "usageMetadata": {"promptTokenCount": 12, "candidatesTokenCount": 8}
        })))
        .mount(&server)
        .await;

    let backend = GeminiBackend::with_api_key("test-key".to_string()).with_base_url(server.uri());
    let client = GenerationClient::with_backend(Arc::new(backend));

    let generated = client
        .generate_structured::<InterviewPrompt>(
            ModelProfile::FastStructured,
            "ask the next question".to_string(),
            None,
            question_schema(),
        )
        .await
        .unwrap();

    assert_eq!(generated.data.current_field, "title");
    assert_eq!(generated.data.question, "What is the project called?");
    assert_eq!(generated.usage.unwrap().total_tokens(), 20);

    println!("✓ Structured call strips fences and parses into the typed shape");
}

#[tokio::test]
async fn test_malformed_structured_reply_is_a_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": {"parts": [{"text": "sorry, I cannot answer that"}]}
            }]
        })))
        .mount(&server)
        .await;

    let backend = GeminiBackend::with_api_key("test-key".to_string()).with_base_url(server.uri());
    let client = GenerationClient::with_backend(Arc::new(backend));

    let result = client
        .generate_structured::<InterviewPrompt>(
            ModelProfile::FastStructured,
            "ask".to_string(),
            None,
            question_schema(),
        )
        .await;

    assert!(matches!(result, Err(GenerationError::Parse(_))));

    println!("✓ Non-JSON reply surfaces as a parse error, never a partial value");
}

#[tokio::test]
async fn test_provider_error_status_maps_to_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("model overloaded"))
        .mount(&server)
        .await;

    let backend = GeminiBackend::with_api_key("test-key".to_string()).with_base_url(server.uri());
    let client = GenerationClient::with_backend(Arc::new(backend));

    let result = client
        .generate_text(
            ModelProfile::FastStructured,
            "hello".to_string(),
            None,
        )
        .await;

    match result {
        Err(GenerationError::Api { status, message }) => {
            assert_eq!(status, 503);
            assert!(message.contains("model overloaded"));
        }
        other => panic!("expected Api error, got {:?}", other.map(|g| g.data)),
    }

    println!("✓ Provider 5xx becomes a retryable API error with the body preserved");
}

#[tokio::test]
async fn test_grounded_answer_carries_sources() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-3-flash-preview:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": {"parts": [{"text": "Serverless is common for small apps."}]},
                "groundingMetadata": {
                    "groundingChunks": [
                        {"web": {"title": "Cloud Docs", "uri": "https://docs.example.com"}}
                    ]
                }
            }]
        })))
        .mount(&server)
        .await;

    let backend = GeminiBackend::with_api_key("test-key".to_string()).with_base_url(server.uri());
    let client = GenerationClient::with_backend(Arc::new(backend));

    let answer = client
        .generate_grounded("current hosting trends?".to_string(), None)
        .await
        .unwrap()
        .data;

    assert!(answer.text.contains("Serverless"));
    assert_eq!(answer.sources.len(), 1);
    assert_eq!(answer.sources[0].uri, "https://docs.example.com");

    println!("✓ Grounded call returns the answer with its cited sources");
}

#[tokio::test]
async fn test_image_synthesis_without_image_part_is_empty_result() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/imagen-4.0-generate-001:predict"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"predictions": []})))
        .mount(&server)
        .await;

    let backend = GeminiBackend::with_api_key("test-key".to_string()).with_base_url(server.uri());
    let client = GenerationClient::with_backend(Arc::new(backend));

    let result = client
        .generate_image("a dashboard mockup".to_string(), "16:9", "1K")
        .await;

    assert!(matches!(result, Err(GenerationError::EmptyResult(_))));

    println!("✓ Successful response with no image part is an empty-result error");
}

#[tokio::test]
async fn test_image_synthesis_returns_first_part() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/imagen-4.0-generate-001:predict"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "predictions": [
                {"bytesBase64Encoded": "aGVsbG8=", "mimeType": "image/png"}
            ]
        })))
        .mount(&server)
        .await;

    let backend = GeminiBackend::with_api_key("test-key".to_string()).with_base_url(server.uri());
    let client = GenerationClient::with_backend(Arc::new(backend));

    let image = client
        .generate_image("a dashboard mockup".to_string(), "16:9", "1K")
        .await
        .unwrap();

    assert_eq!(image.mime_type, "image/png");
    assert_eq!(image.base64_data, "aGVsbG8=");

    println!("✓ Image synthesis returns the inline artifact");
}

// ============================================================================
// Video Poll Loop Tests
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_video_poll_loop_resolves_when_done() {
    let backend = Arc::new(MockBackend::new());
    backend.push_poll(OperationStatus {
        done: false,
        uri: None,
    });
    backend.push_poll(OperationStatus {
        done: true,
        uri: Some("https://files.example.com/clip.mp4".to_string()),
    });

    let client = GenerationClient::with_backend(backend.clone()).with_poll_policy(PollPolicy {
        interval: Duration::from_secs(1),
        max_attempts: 5,
    });

    let video = client
        .generate_video("animate the mockup".to_string(), None, "16:9")
        .await
        .unwrap();

    assert_eq!(video.uri, "https://files.example.com/clip.mp4");
    assert_eq!(backend.recorded_videos().len(), 1);

    println!("✓ Video polling stops at the first done status");
}

#[tokio::test(start_paused = true)]
async fn test_video_poll_loop_is_bounded() {
    let backend = Arc::new(MockBackend::new());
    for _ in 0..3 {
        backend.push_poll(OperationStatus {
            done: false,
            uri: None,
        });
    }

    let client = GenerationClient::with_backend(backend).with_poll_policy(PollPolicy {
        interval: Duration::from_secs(1),
        max_attempts: 3,
    });

    let result = client
        .generate_video("animate the mockup".to_string(), None, "16:9")
        .await;

    match result {
        Err(GenerationError::Timeout { waited_secs }) => assert_eq!(waited_secs, 3),
        other => panic!("expected timeout, got {:?}", other),
    }

    println!("✓ Video polling gives up after the configured attempt budget");
}

#[tokio::test(start_paused = true)]
async fn test_done_operation_without_artifact_is_empty_result() {
    let backend = Arc::new(MockBackend::new());
    backend.push_poll(OperationStatus {
        done: true,
        uri: None,
    });

    let client = GenerationClient::with_backend(backend).with_poll_policy(PollPolicy {
        interval: Duration::from_millis(10),
        max_attempts: 2,
    });

    let result = client
        .generate_video("animate".to_string(), None, "9:16")
        .await;

    assert!(matches!(result, Err(GenerationError::EmptyResult(_))));

    println!("✓ A finished operation without a video reference is an empty result");
}
