//! Pipeline orchestration.
//!
//! Runs the three independent research agents concurrently, feeds their
//! analyses to the decision agent, and passes the complete result set to the
//! evaluator. No agent failure halts the pipeline: failures surface only as
//! degraded entries carried through to evaluation. Retry policy, if any,
//! belongs to the completion client, never to this layer.

use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::domain::models::{AgentKind, AgentProfile, PipelineResult};
use crate::domain::ports::CompletionClient;
use crate::services::decision_agent::DecisionAgent;
use crate::services::evaluator::Evaluator;
use crate::services::research_agent::ResearchAgent;

/// The four-agent research pipeline.
///
/// All agents share one completion client handle, passed in at construction;
/// there is no ambient or global client state.
pub struct ResearchPipeline {
    incumbents: ResearchAgent,
    funding: ResearchAgent,
    growth: ResearchAgent,
    decision: DecisionAgent,
    evaluator: Evaluator,
}

impl ResearchPipeline {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self {
            incumbents: ResearchAgent::new(AgentProfile::incumbents(), client.clone()),
            funding: ResearchAgent::new(AgentProfile::funding(), client.clone()),
            growth: ResearchAgent::new(AgentProfile::growth(), client.clone()),
            decision: DecisionAgent::new(client),
            evaluator: Evaluator::new(),
        }
    }

    /// Run the complete research pipeline for one product idea.
    ///
    /// The three research calls have no data dependency on one another and run
    /// concurrently; the decision call starts only once all three have
    /// returned (successfully or with an absorbed failure). A run always
    /// proceeds to completion and the evaluation always runs, even over
    /// degraded entries.
    #[instrument(skip(self))]
    pub async fn run(&self, product_idea: &str) -> PipelineResult {
        info!(product_idea, "starting research pipeline");

        let (incumbents_result, funding_result, growth_result) = tokio::join!(
            self.incumbents.research(product_idea),
            self.funding.research(product_idea),
            self.growth.research(product_idea),
        );

        let decision_result = self
            .decision
            .decide(
                &incumbents_result.analysis,
                &funding_result.analysis,
                &growth_result.analysis,
                product_idea,
            )
            .await;

        let mut results = BTreeMap::new();
        results.insert(AgentKind::Incumbents, incumbents_result);
        results.insert(AgentKind::Funding, funding_result);
        results.insert(AgentKind::Growth, growth_result);
        results.insert(AgentKind::Decision, decision_result);

        let evaluation = self.evaluator.evaluate_all(&results);

        info!(
            system_score = evaluation.system_score,
            degraded = results.values().filter(|r| r.is_degraded()).count(),
            "pipeline complete"
        );

        PipelineResult {
            run_id: Uuid::new_v4(),
            product_idea: product_idea.to_string(),
            results,
            evaluation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::completions::mock::{MockCompletion, MockCompletionClient};
    use crate::domain::models::Recommendation;

    #[tokio::test]
    async fn test_run_collects_all_four_outputs() {
        let client = Arc::new(MockCompletionClient::new());
        let pipeline = ResearchPipeline::new(client);

        let result = pipeline.run("AI-powered fitness app").await;

        assert_eq!(result.results.len(), 4);
        for kind in AgentKind::ALL {
            assert!(result.results.contains_key(&kind));
        }
        assert_eq!(result.product_idea, "AI-powered fitness app");
        assert_eq!(result.evaluation.agent_count, 4);
    }

    #[tokio::test]
    async fn test_decision_sees_research_error_strings() {
        let client = Arc::new(MockCompletionClient::new());
        // Fail only the funding agent; its error text must still reach the
        // decision prompt.
        client
            .set_response_matching("venture capital", MockCompletion::failure("socket closed"))
            .await;
        let pipeline = ResearchPipeline::new(client.clone());

        let result = pipeline.run("gizmo").await;

        let funding = &result.results[&AgentKind::Funding];
        assert!(funding.is_degraded());

        let requests = client.recorded_requests().await;
        let decision_request = requests
            .iter()
            .find(|r| r.system_prompt.contains("strategic investment advisor"))
            .unwrap();
        assert!(decision_request.user_prompt.contains("Error:"));
        assert!(decision_request.user_prompt.contains("socket closed"));
    }

    #[tokio::test]
    async fn test_pipeline_never_aborts_on_total_failure() {
        let client = Arc::new(MockCompletionClient::with_default(MockCompletion::failure(
            "network down",
        )));
        let pipeline = ResearchPipeline::new(client);

        let result = pipeline.run("gizmo").await;

        assert_eq!(result.results.len(), 4);
        assert!(result.results.values().all(|r| r.is_degraded()));
        assert_eq!(result.recommendation(), Some(Recommendation::Error));
        // Evaluation still completes over the degraded entries
        assert_eq!(result.evaluation.agent_count, 4);
        assert!(result.evaluation.system_score < 6.0);
    }
}
