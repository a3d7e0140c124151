use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Rubric-based score for one agent's output. Derived from a `ResearchOutput`,
/// never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationScore {
    /// Agent name (rubric key)
    pub agent: String,

    /// Per-criterion scores in [0, 10]
    pub individual_scores: BTreeMap<String, f64>,

    /// Unweighted mean of the criterion scores, rounded to 2 decimals
    pub overall_score: f64,

    /// One of four fixed summary tiers
    pub summary: String,

    /// Length of the evaluated text in characters
    pub response_length: usize,

    /// Confidence copied from the corresponding `ResearchOutput`
    pub confidence: f64,
}

/// Histogram of overall scores over four half-open tiers:
/// excellent >= 8, good [6, 8), adequate [4, 6), poor < 4.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreDistribution {
    pub excellent: usize,
    pub good: usize,
    pub adequate: usize,
    pub poor: usize,
}

impl ScoreDistribution {
    /// Tally a set of overall scores into tiers.
    pub fn from_scores(scores: &[f64]) -> Self {
        let mut dist = Self::default();
        for &score in scores {
            if score >= 8.0 {
                dist.excellent += 1;
            } else if score >= 6.0 {
                dist.good += 1;
            } else if score >= 4.0 {
                dist.adequate += 1;
            } else {
                dist.poor += 1;
            }
        }
        dist
    }
}

/// System-wide evaluation aggregating all per-agent scores.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemEvaluation {
    /// Per-agent evaluations, keyed by agent name
    pub evaluations: BTreeMap<String, EvaluationScore>,

    /// Agents that could not be evaluated (no rubric for their name), with the
    /// error description. Inline data, not a fatal failure.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub failures: BTreeMap<String, String>,

    /// Mean of all overall scores, rounded to 2 decimals; 0 with no evaluations
    pub system_score: f64,

    /// Number of agents evaluated
    pub agent_count: usize,

    /// Histogram of overall scores
    pub distribution: ScoreDistribution,

    /// Fixed-template improvement suggestions
    pub recommendations: Vec<String>,
}

impl SystemEvaluation {
    /// Performance label for the system score, same tiers as the distribution.
    pub fn performance_label(&self) -> &'static str {
        if self.system_score >= 8.0 {
            "Excellent"
        } else if self.system_score >= 6.0 {
            "Good"
        } else if self.system_score >= 4.0 {
            "Adequate"
        } else {
            "Needs Improvement"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distribution_buckets_are_half_open() {
        let dist = ScoreDistribution::from_scores(&[8.0, 7.99, 6.0, 5.99, 4.0, 3.99, 0.0, 10.0]);

        assert_eq!(dist.excellent, 2);
        assert_eq!(dist.good, 2);
        assert_eq!(dist.adequate, 2);
        assert_eq!(dist.poor, 2);
    }

    #[test]
    fn test_distribution_is_exhaustive() {
        let scores = [0.0, 1.5, 4.0, 5.0, 6.5, 7.0, 8.0, 9.9];
        let dist = ScoreDistribution::from_scores(&scores);
        assert_eq!(
            dist.excellent + dist.good + dist.adequate + dist.poor,
            scores.len()
        );
    }
}
