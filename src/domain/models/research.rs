use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

use super::evaluation::SystemEvaluation;
use super::profile::AgentKind;

/// Categorical recommendation extracted from the decision agent's synthesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    Good,
    Neutral,
    Poor,
    /// The decision call itself failed; no recommendation could be made.
    Error,
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Good => write!(f, "Good"),
            Self::Neutral => write!(f, "Neutral"),
            Self::Poor => write!(f, "Poor"),
            Self::Error => write!(f, "Error"),
        }
    }
}

/// Output of one agent invocation. Created once per agent per pipeline run and
/// immutable thereafter.
///
/// `confidence` is always in [0.1, 0.9] for successful calls. A failed call is
/// reported as data, not an error: `analysis` carries an `"Error:"`-prefixed
/// diagnostic and `confidence` is forced to exactly 0.0, a deliberate
/// out-of-band sentinel distinct from the normal range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchOutput {
    /// Which agent produced this output
    pub agent: AgentKind,

    /// The product idea the agent was asked about
    pub product_idea: String,

    /// Free-text analysis from the model (diagnostic string on failure).
    /// For the decision agent this is the synthesis reasoning.
    pub analysis: String,

    /// Heuristic confidence in [0.1, 0.9], or 0.0 on failure
    pub confidence: f64,

    /// Categorical recommendation; present only for the decision agent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<Recommendation>,

    /// When this output was produced
    pub created_at: DateTime<Utc>,
}

impl ResearchOutput {
    /// Successful research output with a heuristic confidence score.
    pub fn success(agent: AgentKind, product_idea: &str, analysis: String, confidence: f64) -> Self {
        Self {
            agent,
            product_idea: product_idea.to_string(),
            analysis,
            confidence,
            recommendation: None,
            created_at: Utc::now(),
        }
    }

    /// Absorbed failure: the diagnostic becomes data and confidence drops to
    /// the 0.0 sentinel.
    pub fn failure(agent: AgentKind, product_idea: &str, error: &str) -> Self {
        Self {
            agent,
            product_idea: product_idea.to_string(),
            analysis: format!("Error: {error}"),
            confidence: 0.0,
            recommendation: None,
            created_at: Utc::now(),
        }
    }

    /// Successful decision output with an extracted recommendation.
    pub fn decision(
        product_idea: &str,
        reasoning: String,
        recommendation: Recommendation,
        confidence: f64,
    ) -> Self {
        Self {
            agent: AgentKind::Decision,
            product_idea: product_idea.to_string(),
            analysis: reasoning,
            confidence,
            recommendation: Some(recommendation),
            created_at: Utc::now(),
        }
    }

    /// Failed decision call.
    pub fn decision_failure(product_idea: &str, error: &str) -> Self {
        Self {
            agent: AgentKind::Decision,
            product_idea: product_idea.to_string(),
            analysis: format!("Error: {error}"),
            confidence: 0.0,
            recommendation: Some(Recommendation::Error),
            created_at: Utc::now(),
        }
    }

    /// Whether this output came from an absorbed completion failure.
    pub fn is_degraded(&self) -> bool {
        self.confidence == 0.0
    }
}

/// Complete result of one pipeline run: all four agent outputs plus the
/// system evaluation. Serializable so the host can persist it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineResult {
    /// Unique identifier for this run
    pub run_id: Uuid,

    /// The product idea that was researched
    pub product_idea: String,

    /// Per-agent outputs, keyed in pipeline order
    pub results: BTreeMap<AgentKind, ResearchOutput>,

    /// Rubric-based evaluation of all outputs
    pub evaluation: SystemEvaluation,
}

impl PipelineResult {
    /// The decision agent's recommendation, if the decision ran.
    pub fn recommendation(&self) -> Option<Recommendation> {
        self.results
            .get(&AgentKind::Decision)
            .and_then(|output| output.recommendation)
    }
}
