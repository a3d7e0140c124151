//! Research agent.
//!
//! One configurable component covers all three research roles; behavior is
//! driven entirely by the `AgentProfile` it is constructed with. A failed
//! completion call never propagates: it is absorbed here and reported as
//! degraded output data so the pipeline can proceed with partial results.

use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::models::{AgentProfile, ResearchOutput};
use crate::domain::ports::{CompletionClient, CompletionRequest};
use crate::services::confidence::confidence_score;

/// An agent that analyzes one facet of a product idea through a fixed
/// analytical lens.
pub struct ResearchAgent {
    profile: AgentProfile,
    client: Arc<dyn CompletionClient>,
}

impl ResearchAgent {
    pub fn new(profile: AgentProfile, client: Arc<dyn CompletionClient>) -> Self {
        Self { profile, client }
    }

    /// The profile this agent was configured with.
    pub fn profile(&self) -> &AgentProfile {
        &self.profile
    }

    /// Research a product idea.
    ///
    /// Always returns an output: completion failures are absorbed into a
    /// degraded record with an `"Error:"`-prefixed diagnostic and the 0.0
    /// confidence sentinel.
    pub async fn research(&self, product_idea: &str) -> ResearchOutput {
        debug!(agent = %self.profile.kind, "starting research");

        let request = CompletionRequest::new(
            self.profile.role_prompt.clone(),
            format!("Research this product idea: {product_idea}"),
            self.profile.temperature,
            self.profile.max_tokens,
        );

        match self.client.complete(request).await {
            Ok(text) => {
                let confidence = confidence_score(&text);
                debug!(agent = %self.profile.kind, confidence, "research complete");
                ResearchOutput::success(self.profile.kind, product_idea, text, confidence)
            }
            Err(err) => {
                warn!(agent = %self.profile.kind, error = %err, "completion failed, absorbing");
                ResearchOutput::failure(self.profile.kind, product_idea, &err.to_string())
            }
        }
    }
}
