//! Mock completion client for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::ports::{CompletionClient, CompletionError, CompletionRequest};

/// Scripted response configuration.
#[derive(Debug, Clone)]
pub struct MockCompletion {
    /// Text to return
    pub output: String,
    /// Whether to simulate failure
    pub fail: bool,
    /// Error message if failing
    pub error_message: Option<String>,
}

impl Default for MockCompletion {
    fn default() -> Self {
        Self {
            output: "Mock analysis based on market research and available data. ".repeat(3),
            fail: false,
            error_message: None,
        }
    }
}

impl MockCompletion {
    pub fn success(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            ..Default::default()
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            fail: true,
            error_message: Some(error.into()),
            ..Default::default()
        }
    }
}

/// Mock completion client.
///
/// Responses are scripted by substring match against the request's system
/// prompt (each agent role has a distinctive prompt), with a default for
/// unmatched requests. Every request is recorded for assertions.
pub struct MockCompletionClient {
    default_response: MockCompletion,
    matchers: Arc<RwLock<Vec<(String, MockCompletion)>>>,
    requests: Arc<RwLock<Vec<CompletionRequest>>>,
}

impl MockCompletionClient {
    pub fn new() -> Self {
        Self {
            default_response: MockCompletion::default(),
            matchers: Arc::new(RwLock::new(Vec::new())),
            requests: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn with_default(response: MockCompletion) -> Self {
        Self {
            default_response: response,
            matchers: Arc::new(RwLock::new(Vec::new())),
            requests: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Script a response for requests whose system prompt contains `pattern`.
    pub async fn set_response_matching(&self, pattern: impl Into<String>, response: MockCompletion) {
        let mut matchers = self.matchers.write().await;
        matchers.push((pattern.into(), response));
    }

    /// All requests seen so far, in arrival order.
    pub async fn recorded_requests(&self) -> Vec<CompletionRequest> {
        let requests = self.requests.read().await;
        requests.clone()
    }

    async fn response_for(&self, request: &CompletionRequest) -> MockCompletion {
        let matchers = self.matchers.read().await;
        matchers
            .iter()
            .find(|(pattern, _)| request.system_prompt.contains(pattern))
            .map(|(_, response)| response.clone())
            .unwrap_or_else(|| self.default_response.clone())
    }
}

impl Default for MockCompletionClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionClient for MockCompletionClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError> {
        {
            let mut requests = self.requests.write().await;
            requests.push(request.clone());
        }

        let response = self.response_for(&request).await;
        if response.fail {
            Err(CompletionError::NetworkError(
                response
                    .error_message
                    .unwrap_or_else(|| "Mock failure".to_string()),
            ))
        } else {
            Ok(response.output)
        }
    }
}
