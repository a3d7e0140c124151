//! Completion port.
//!
//! The sole I/O boundary of the pipeline: a prompt-in/text-out completion
//! service. Agents depend on this trait, never on a concrete backend, so the
//! whole pipeline is testable against a mock.

use async_trait::async_trait;
use thiserror::Error;

/// One completion request: a fixed system role plus a user message, with
/// sampling parameters taken from the calling agent's profile.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// System prompt defining the agent's role
    pub system_prompt: String,

    /// User message carrying the product idea (and, for synthesis, the prior
    /// analyses)
    pub user_prompt: String,

    /// Sampling temperature (0.0 - 1.0)
    pub temperature: f32,

    /// Response length cap in tokens
    pub max_tokens: u32,
}

impl CompletionRequest {
    pub fn new(
        system_prompt: impl Into<String>,
        user_prompt: impl Into<String>,
        temperature: f32,
        max_tokens: u32,
    ) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            user_prompt: user_prompt.into(),
            temperature,
            max_tokens,
        }
    }
}

/// Error types for completion operations.
///
/// Whatever the variant, agents absorb these at their boundary and report the
/// failure as degraded output data; no completion error escapes to the
/// orchestrator.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Authentication failed: invalid or missing API key")]
    AuthError,

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Server error ({status}): {body}")]
    ServerError { status: u16, body: String },

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timed out after {0}s")]
    Timeout(u64),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl CompletionError {
    /// Whether a retry could plausibly succeed. Client errors are permanent;
    /// rate limits, server errors, and transport failures are transient.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::RateLimitExceeded
                | Self::ServerError { .. }
                | Self::NetworkError(_)
                | Self::Timeout(_)
        )
    }
}

/// Port trait for completion backends.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so one shared client can serve
/// concurrent agent calls.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Execute one completion request and return the generated text.
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(CompletionError::RateLimitExceeded.is_transient());
        assert!(CompletionError::ServerError { status: 503, body: String::new() }.is_transient());
        assert!(CompletionError::Timeout(30).is_transient());
        assert!(!CompletionError::AuthError.is_transient());
        assert!(!CompletionError::InvalidRequest("bad".into()).is_transient());
    }
}
