//! Decision agent.
//!
//! Synthesizes the three research analyses into a final categorical
//! recommendation. Shares the research agents' request/absorb-failure handling
//! and confidence heuristic, but runs at a lower temperature and additionally
//! extracts a recommendation from the synthesis text.

use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::models::{AgentProfile, Recommendation, ResearchOutput};
use crate::domain::ports::{CompletionClient, CompletionRequest};
use crate::services::confidence::confidence_score;

/// Phrases that resolve to `Recommendation::Good`.
const GOOD_PHRASES: [&str; 4] = ["good opportunity", "recommend", "positive", "strong potential"];

/// Phrases that resolve to `Recommendation::Poor`.
const POOR_PHRASES: [&str; 5] = ["poor", "avoid", "risky", "challenging", "difficult"];

/// Extract a categorical recommendation from synthesis text.
///
/// Membership is tested in strict precedence order: any Good phrase wins over
/// any Poor phrase; a text matching neither is Neutral. The order must not be
/// changed.
pub fn extract_recommendation(text: &str) -> Recommendation {
    let lower = text.to_lowercase();

    if GOOD_PHRASES.iter().any(|phrase| lower.contains(phrase)) {
        Recommendation::Good
    } else if POOR_PHRASES.iter().any(|phrase| lower.contains(phrase)) {
        Recommendation::Poor
    } else {
        Recommendation::Neutral
    }
}

/// Agent that synthesizes all research into a final recommendation.
pub struct DecisionAgent {
    profile: AgentProfile,
    client: Arc<dyn CompletionClient>,
}

impl DecisionAgent {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self {
            profile: AgentProfile::decision(),
            client,
        }
    }

    /// Synthesize a final recommendation from the three prior analyses.
    ///
    /// The prior analyses are embedded verbatim, labeled by section; error
    /// strings from failed research calls flow through unchanged. Like
    /// `ResearchAgent::research`, this absorbs completion failures into a
    /// degraded output.
    pub async fn decide(
        &self,
        incumbents_analysis: &str,
        funding_analysis: &str,
        growth_analysis: &str,
        product_idea: &str,
    ) -> ResearchOutput {
        debug!(agent = %self.profile.kind, "starting synthesis");

        let combined_prompt = format!(
            "Product Idea: {product_idea}\n\
             \n\
             COMPETITORS ANALYSIS:\n\
             {incumbents_analysis}\n\
             \n\
             FUNDING ANALYSIS:\n\
             {funding_analysis}\n\
             \n\
             GROWTH ANALYSIS:\n\
             {growth_analysis}\n\
             \n\
             Based on the above research, provide your final recommendation."
        );

        let request = CompletionRequest::new(
            self.profile.role_prompt.clone(),
            combined_prompt,
            self.profile.temperature,
            self.profile.max_tokens,
        );

        match self.client.complete(request).await {
            Ok(text) => {
                let recommendation = extract_recommendation(&text);
                let confidence = confidence_score(&text);
                debug!(
                    agent = %self.profile.kind,
                    %recommendation,
                    confidence,
                    "synthesis complete"
                );
                ResearchOutput::decision(product_idea, text, recommendation, confidence)
            }
            Err(err) => {
                warn!(agent = %self.profile.kind, error = %err, "completion failed, absorbing");
                ResearchOutput::decision_failure(product_idea, &err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::completions::mock::{MockCompletion, MockCompletionClient};

    #[test]
    fn test_good_phrases_win() {
        assert_eq!(
            extract_recommendation("This is a good opportunity"),
            Recommendation::Good
        );
        assert_eq!(
            extract_recommendation("We RECOMMEND entering this market"),
            Recommendation::Good
        );
    }

    #[test]
    fn test_poor_phrases() {
        assert_eq!(
            extract_recommendation("Better to avoid this market"),
            Recommendation::Poor
        );
        assert_eq!(extract_recommendation("very risky play"), Recommendation::Poor);
    }

    #[test]
    fn test_precedence_good_beats_poor() {
        // Contains both a Good phrase and a Poor phrase
        assert_eq!(
            extract_recommendation("A good opportunity despite the risky market"),
            Recommendation::Good
        );
    }

    #[test]
    fn test_neutral_when_neither_matches() {
        assert_eq!(
            extract_recommendation("The market exists and has participants"),
            Recommendation::Neutral
        );
    }

    #[tokio::test]
    async fn test_decide_builds_labeled_synthesis_prompt() {
        let client = Arc::new(MockCompletionClient::new());
        let agent = DecisionAgent::new(client.clone());

        agent
            .decide("incumbents text", "funding text", "growth text", "gizmo")
            .await;

        let requests = client.recorded_requests().await;
        assert_eq!(requests.len(), 1);
        let prompt = &requests[0].user_prompt;
        assert!(prompt.starts_with("Product Idea: gizmo"));
        assert!(prompt.contains("COMPETITORS ANALYSIS:\nincumbents text"));
        assert!(prompt.contains("FUNDING ANALYSIS:\nfunding text"));
        assert!(prompt.contains("GROWTH ANALYSIS:\ngrowth text"));
        assert_eq!(requests[0].temperature, 0.5);
        assert_eq!(requests[0].max_tokens, 400);
    }

    #[tokio::test]
    async fn test_decide_failure_yields_error_recommendation() {
        let client = Arc::new(MockCompletionClient::with_default(MockCompletion::failure(
            "quota exhausted",
        )));
        let agent = DecisionAgent::new(client);

        let output = agent.decide("a", "b", "c", "gizmo").await;

        assert_eq!(output.recommendation, Some(Recommendation::Error));
        assert_eq!(output.confidence, 0.0);
        assert!(output.analysis.contains("quota exhausted"));
    }
}
