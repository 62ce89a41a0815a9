//! Titan Text contract against a mocked Bedrock runtime.

#![allow(clippy::unwrap_used)] // Test code

use serde_json::json;
use std::time::Duration;
use todo_gen_bedrock::{BedrockClient, DEFAULT_MODEL_ID};
use todo_gen_core::{Backend, TodoError, suggest_todo};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const INVOKE_PATH: &str = "/model/amazon.titan-text-lite-v1/invoke";

fn client_for(server: &MockServer) -> BedrockClient {
    BedrockClient::new("us-east-1", DEFAULT_MODEL_ID).with_endpoint(server.uri())
}

fn titan_response(texts: &[&str]) -> serde_json::Value {
    json!({
        "inputTextTokenCount": 20,
        "results": texts
            .iter()
            .map(|text| json!({"tokenCount": 5, "outputText": text, "completionReason": "FINISH"}))
            .collect::<Vec<_>>()
    })
}

#[tokio::test]
async fn test_sends_titan_body_and_cleans_first_result() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(INVOKE_PATH))
        .and(header("content-type", "application/json"))
        .and(header("accept", "application/json"))
        .and(body_json(json!({
            "inputText": "Generate a short, fake to-do list item. It must be a single sentence, not a list.",
            "textGenerationConfig": {
                "maxTokenCount": 50,
                "stopSequences": [],
                "temperature": 0.9,
                "topP": 1.0
            }
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(titan_response(&["  \"Buy milk.\"  ", "Second choice"])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let text = suggest_todo(&client_for(&server)).await.unwrap();

    assert_eq!(text, "Buy milk.");
}

#[tokio::test]
async fn test_sends_bearer_token_when_configured() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(INVOKE_PATH))
        .and(header("authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(titan_response(&["Walk the dog"])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).with_api_key("test-key");

    assert_eq!(suggest_todo(&client).await.unwrap(), "Walk the dog");
}

#[tokio::test]
async fn test_zero_results_is_empty_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(INVOKE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(titan_response(&[])))
        .mount(&server)
        .await;

    let err = suggest_todo(&client_for(&server)).await.unwrap_err();

    assert_eq!(
        err,
        TodoError::EmptyResponse {
            backend: Backend::Generator
        }
    );
}

#[tokio::test]
async fn test_malformed_body_is_bad_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(INVOKE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = suggest_todo(&client_for(&server)).await.unwrap_err();

    assert!(matches!(
        err,
        TodoError::BadResponse {
            backend: Backend::Generator,
            ..
        }
    ));
}

#[tokio::test]
async fn test_throttling_is_unavailable() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(INVOKE_PATH))
        .respond_with(ResponseTemplate::new(429))
        .expect(1)
        .mount(&server)
        .await;

    let err = suggest_todo(&client_for(&server)).await.unwrap_err();

    assert!(matches!(err, TodoError::Unavailable { .. }));
}

#[tokio::test]
async fn test_unknown_model_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = suggest_todo(&client_for(&server)).await.unwrap_err();

    assert!(matches!(
        err,
        TodoError::NotFound {
            backend: Backend::Generator,
            ..
        }
    ));
}

#[tokio::test]
async fn test_server_error_carries_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal failure"))
        .mount(&server)
        .await;

    let err = suggest_todo(&client_for(&server)).await.unwrap_err();

    assert!(matches!(err, TodoError::Unavailable { .. }));
    assert!(err.to_string().contains("internal failure"));
}

#[tokio::test]
async fn test_slow_service_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(titan_response(&["too late"]))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let client = client_for(&server).with_timeout(Duration::from_millis(100));

    let err = suggest_todo(&client).await.unwrap_err();

    assert!(matches!(err, TodoError::Unavailable { .. }));
}
