//! OpenAI Chat Completions client.
//!
//! Makes direct HTTP calls to the Chat Completions API. Owns the retry policy
//! for transient errors (the orchestrator never retries): exponential backoff
//! starting at `initial_backoff_ms`, doubling per attempt, capped at
//! `max_backoff_ms`.

use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, instrument, warn};

use crate::domain::models::CompletionConfig;
use crate::domain::ports::{CompletionClient, CompletionError, CompletionRequest};

/// Configuration for the OpenAI API client.
#[derive(Debug, Clone)]
pub struct OpenAiClientConfig {
    /// API key for authentication
    pub api_key: String,
    /// API base URL
    pub base_url: String,
    /// Model name
    pub model: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Maximum retry attempts for transient errors
    pub max_retries: u32,
    /// Initial backoff delay in milliseconds
    pub initial_backoff_ms: u64,
    /// Maximum backoff delay in milliseconds
    pub max_backoff_ms: u64,
}

impl OpenAiClientConfig {
    /// Build a client config from the loaded completion config.
    ///
    /// Fails when no API key is configured and `OPENAI_API_KEY` is unset.
    pub fn from_completion_config(config: &CompletionConfig) -> Result<Self, CompletionError> {
        let api_key = config.get_api_key().ok_or(CompletionError::AuthError)?;
        Ok(Self {
            api_key,
            base_url: config.base_url.clone(),
            model: config.model.clone(),
            timeout_secs: config.timeout_secs,
            max_retries: config.max_retries,
            initial_backoff_ms: config.initial_backoff_ms,
            max_backoff_ms: config.max_backoff_ms,
        })
    }
}

/// Message in a chat completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Request to the Chat Completions API.
#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Token usage from the API.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatMessage,
}

/// Response from the Chat Completions API.
#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<ChatChoice>,
    pub usage: Option<ChatUsage>,
}

/// HTTP client for the OpenAI Chat Completions API.
///
/// One shared handle serves all agents: reqwest pools connections internally
/// and the client is `Send + Sync`.
pub struct OpenAiClient {
    http_client: Client,
    config: OpenAiClientConfig,
}

impl OpenAiClient {
    /// Create a new client.
    pub fn new(config: OpenAiClientConfig) -> Result<Self, CompletionError> {
        // Scrub API key from logs
        let api_key_scrubbed = if config.api_key.len() > 8 {
            format!("{}...[REDACTED]", &config.api_key[..8])
        } else {
            "[REDACTED]".to_string()
        };
        info!(
            base_url = %config.base_url,
            model = %config.model,
            timeout_secs = config.timeout_secs,
            api_key = %api_key_scrubbed,
            "initializing completion client"
        );

        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .pool_max_idle_per_host(10)
            .tcp_nodelay(true)
            .build()
            .map_err(|e| CompletionError::NetworkError(e.to_string()))?;

        Ok(Self {
            http_client,
            config,
        })
    }

    fn build_request(&self, request: &CompletionRequest) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: request.system_prompt.clone(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: request.user_prompt.clone(),
                },
            ],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        }
    }

    /// Execute a single request attempt.
    async fn execute_once(
        &self,
        api_request: &ChatCompletionRequest,
    ) -> Result<String, CompletionError> {
        let url = format!("{}/v1/chat/completions", self.config.base_url);
        debug!(%url, "POST chat completion");

        let response = self
            .http_client
            .post(&url)
            .header(header::CONTENT_TYPE, "application/json")
            .bearer_auth(&self.config.api_key)
            .json(api_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CompletionError::Timeout(self.config.timeout_secs)
                } else {
                    CompletionError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error body".to_string());
            warn!(%status, "API error response");
            return Err(Self::classify_status(status, body));
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::MalformedResponse(e.to_string()))?;

        if let Some(usage) = &parsed.usage {
            debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "completion succeeded"
            );
        }

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| CompletionError::MalformedResponse("response has no choices".to_string()))
    }

    /// Map an HTTP status to a completion error.
    fn classify_status(status: StatusCode, body: String) -> CompletionError {
        match status {
            StatusCode::BAD_REQUEST => CompletionError::InvalidRequest(body),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => CompletionError::AuthError,
            StatusCode::TOO_MANY_REQUESTS => CompletionError::RateLimitExceeded,
            status => CompletionError::ServerError {
                status: status.as_u16(),
                body,
            },
        }
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    #[instrument(skip(self, request), fields(temperature = request.temperature, max_tokens = request.max_tokens))]
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError> {
        let api_request = self.build_request(&request);

        let mut backoff_ms = self.config.initial_backoff_ms;
        let mut attempt = 0u32;

        loop {
            match self.execute_once(&api_request).await {
                Ok(text) => return Ok(text),
                Err(err) if err.is_transient() && attempt < self.config.max_retries => {
                    attempt += 1;
                    warn!(
                        attempt,
                        max_retries = self.config.max_retries,
                        backoff_ms,
                        error = %err,
                        "transient error, retrying"
                    );
                    sleep(Duration::from_millis(backoff_ms)).await;
                    backoff_ms = (backoff_ms * 2).min(self.config.max_backoff_ms);
                }
                Err(err) => return Err(err),
            }
        }
    }
}
