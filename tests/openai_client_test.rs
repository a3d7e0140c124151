//! HTTP adapter tests against a wiremock server.

use prospector::adapters::completions::{OpenAiClient, OpenAiClientConfig};
use prospector::{CompletionClient, CompletionError, CompletionRequest};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config(base_url: String) -> OpenAiClientConfig {
    OpenAiClientConfig {
        api_key: "sk-test-key".to_string(),
        base_url,
        model: "gpt-3.5-turbo".to_string(),
        timeout_secs: 30,
        max_retries: 3,
        initial_backoff_ms: 50,
        max_backoff_ms: 500,
    }
}

fn chat_response(text: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-test123",
        "object": "chat.completion",
        "model": "gpt-3.5-turbo",
        "choices": [
            {
                "index": 0,
                "message": {"role": "assistant", "content": text},
                "finish_reason": "stop"
            }
        ],
        "usage": {"prompt_tokens": 25, "completion_tokens": 40, "total_tokens": 65}
    })
}

#[tokio::test]
async fn test_successful_completion() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_response("Market analysis.")))
        .mount(&mock_server)
        .await;

    let client = OpenAiClient::new(test_config(mock_server.uri())).unwrap();
    let text = client
        .complete(CompletionRequest::new("role", "idea", 0.7, 500))
        .await
        .unwrap();

    assert_eq!(text, "Market analysis.");
}

#[tokio::test]
async fn test_retry_on_server_error() {
    let mock_server = MockServer::start().await;

    // First two attempts fail with 500, third succeeds
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .up_to_n_times(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_response("Recovered.")))
        .mount(&mock_server)
        .await;

    let client = OpenAiClient::new(test_config(mock_server.uri())).unwrap();
    let text = client
        .complete(CompletionRequest::new("role", "idea", 0.7, 500))
        .await
        .unwrap();

    assert_eq!(text, "Recovered.");
}

#[tokio::test]
async fn test_retry_on_rate_limit() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_string("Rate limit reached"))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_response("After backoff.")))
        .mount(&mock_server)
        .await;

    let client = OpenAiClient::new(test_config(mock_server.uri())).unwrap();
    let text = client
        .complete(CompletionRequest::new("role", "idea", 0.5, 400))
        .await
        .unwrap();

    assert_eq!(text, "After backoff.");
}

#[tokio::test]
async fn test_auth_error_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Invalid API key"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = OpenAiClient::new(test_config(mock_server.uri())).unwrap();
    let err = client
        .complete(CompletionRequest::new("role", "idea", 0.7, 500))
        .await
        .unwrap_err();

    assert!(matches!(err, CompletionError::AuthError));
}

#[tokio::test]
async fn test_exhausted_retries_surface_last_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&mock_server)
        .await;

    let client = OpenAiClient::new(test_config(mock_server.uri())).unwrap();
    let err = client
        .complete(CompletionRequest::new("role", "idea", 0.7, 500))
        .await
        .unwrap_err();

    assert!(matches!(err, CompletionError::ServerError { status: 503, .. }));
}

#[tokio::test]
async fn test_empty_choices_is_malformed() {
    let mock_server = MockServer::start().await;

    let empty = serde_json::json!({
        "id": "chatcmpl-test456",
        "object": "chat.completion",
        "model": "gpt-3.5-turbo",
        "choices": [],
        "usage": {"prompt_tokens": 10, "completion_tokens": 0, "total_tokens": 10}
    });

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(empty))
        .mount(&mock_server)
        .await;

    let client = OpenAiClient::new(test_config(mock_server.uri())).unwrap();
    let err = client
        .complete(CompletionRequest::new("role", "idea", 0.7, 500))
        .await
        .unwrap_err();

    assert!(matches!(err, CompletionError::MalformedResponse(_)));
}
