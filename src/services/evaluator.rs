//! Rubric-based evaluator.
//!
//! Scores every agent's output against a fixed per-agent rubric of three
//! criteria, each backed by a keyword set, then aggregates into system-level
//! statistics and improvement suggestions. Evaluation is a pure, synchronous
//! computation over already-collected results.
//!
//! The rubric is data, not branching code: criteria and keyword sets live in
//! static tables so they can be unit-tested independently of the scoring
//! pipeline.

use std::collections::BTreeMap;
use tracing::debug;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{
    AgentKind, EvaluationScore, ResearchOutput, ScoreDistribution, SystemEvaluation,
};

/// One rubric criterion: a name plus the keyword set that evidences it.
#[derive(Debug, Clone, Copy)]
pub struct Criterion {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
}

const COMPLETENESS: Criterion = Criterion {
    name: "completeness",
    keywords: &["competitor", "company", "market", "player", "incumbent"],
};
const SPECIFICITY: Criterion = Criterion {
    name: "specificity",
    keywords: &["feature", "product", "service", "$", "million", "billion"],
};
const INSIGHT_QUALITY: Criterion = Criterion {
    name: "insight_quality",
    keywords: &["opportunity", "advantage", "weakness", "trend", "strategy"],
};
const RELEVANCE: Criterion = Criterion {
    name: "relevance",
    keywords: &["funding", "investment", "venture", "capital", "round"],
};
const RECENCY: Criterion = Criterion {
    name: "recency",
    keywords: &["recent", "2023", "2024", "latest", "current"],
};
const INVESTOR_PERSPECTIVE: Criterion = Criterion {
    name: "investor_perspective",
    keywords: &["investor", "valuation", "return", "portfolio", "vc"],
};
const MARKET_SIZING: Criterion = Criterion {
    name: "market_sizing",
    keywords: &["market", "size", "billion", "million", "tam", "revenue"],
};
const GROWTH_TRENDS: Criterion = Criterion {
    name: "growth_trends",
    keywords: &["growth", "increase", "trend", "forecast", "projection"],
};
const REVENUE_POTENTIAL: Criterion = Criterion {
    name: "revenue_potential",
    keywords: &["revenue", "profit", "monetization", "pricing", "income"],
};
const SYNTHESIS: Criterion = Criterion {
    name: "synthesis",
    keywords: &["based on", "considering", "overall", "combination", "together"],
};
const CLARITY: Criterion = Criterion {
    name: "clarity",
    keywords: &["recommend", "good", "poor", "neutral", "opportunity"],
};
const REASONING: Criterion = Criterion {
    name: "reasoning",
    keywords: &["because", "due to", "reason", "evidence", "analysis"],
};

/// Fixed, total mapping from agent kind to its three rubric criteria.
/// Lookup is by lowercase agent name so that an unrecognized name surfaces as
/// an error result instead of a crash.
pub fn rubric_for(agent_name: &str) -> Option<[Criterion; 3]> {
    match agent_name {
        "incumbents" => Some([COMPLETENESS, SPECIFICITY, INSIGHT_QUALITY]),
        "funding" => Some([RELEVANCE, RECENCY, INVESTOR_PERSPECTIVE]),
        "growth" => Some([MARKET_SIZING, GROWTH_TRENDS, REVENUE_POTENTIAL]),
        "decision" => Some([SYNTHESIS, CLARITY, REASONING]),
        _ => None,
    }
}

/// Keyword set for a criterion name, if it is part of the rubric.
fn keywords_for(criterion: &str) -> Option<&'static [&'static str]> {
    const ALL: [Criterion; 12] = [
        COMPLETENESS,
        SPECIFICITY,
        INSIGHT_QUALITY,
        RELEVANCE,
        RECENCY,
        INVESTOR_PERSPECTIVE,
        MARKET_SIZING,
        GROWTH_TRENDS,
        REVENUE_POTENTIAL,
        SYNTHESIS,
        CLARITY,
        REASONING,
    ];
    ALL.iter()
        .find(|c| c.name == criterion)
        .map(|c| c.keywords)
}

/// Round to 2 decimal places.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Score one criterion against a response text, in [0, 10].
///
/// Keyword presence contributes up to 6 points, saturating once 3 distinct
/// keywords from the set are found; text length contributes up to 4 points,
/// saturating at 200 characters. An unrecognized criterion falls back to a
/// flat 5.0 (or 2.0 for very short text); with the fixed rubric this path
/// should not trigger.
pub fn score_criterion(text: &str, criterion: &str) -> f64 {
    let length = text.chars().count();

    let Some(keywords) = keywords_for(criterion) else {
        return if length > 50 { 5.0 } else { 2.0 };
    };

    let lower = text.to_lowercase();
    let keyword_count = keywords.iter().filter(|kw| lower.contains(**kw)).count();

    let keyword_score = (keyword_count as f64 / 3.0).min(1.0) * 6.0;
    let length_score = (length as f64 / 200.0).min(1.0) * 4.0;

    (keyword_score + length_score).min(10.0)
}

/// Four-tier summary label for an overall score.
fn summary_for(overall_score: f64) -> &'static str {
    if overall_score >= 8.0 {
        "Excellent response with strong analysis across all criteria"
    } else if overall_score >= 6.0 {
        "Good response with solid insights, minor improvements possible"
    } else if overall_score >= 4.0 {
        "Adequate response but lacks depth in some areas"
    } else {
        "Poor response, needs significant improvement"
    }
}

/// Applies the fixed rubric to agent outputs and aggregates system statistics.
#[derive(Debug, Clone, Copy, Default)]
pub struct Evaluator;

impl Evaluator {
    pub fn new() -> Self {
        Self
    }

    /// Evaluate one agent's output against its rubric.
    ///
    /// Returns `DomainError::UnknownAgent` if no rubric exists for the name;
    /// callers report that inline rather than aborting the evaluation.
    pub fn evaluate_one(
        &self,
        agent_name: &str,
        output: &ResearchOutput,
    ) -> DomainResult<EvaluationScore> {
        let key = agent_name.to_lowercase();
        let criteria =
            rubric_for(&key).ok_or_else(|| DomainError::UnknownAgent(agent_name.to_string()))?;

        let text = &output.analysis;

        let individual_scores: BTreeMap<String, f64> = criteria
            .iter()
            .map(|criterion| (criterion.name.to_string(), score_criterion(text, criterion.name)))
            .collect();

        let overall_score =
            round2(individual_scores.values().sum::<f64>() / individual_scores.len() as f64);

        debug!(agent = %agent_name, overall_score, "agent evaluated");

        Ok(EvaluationScore {
            agent: agent_name.to_string(),
            summary: summary_for(overall_score).to_string(),
            individual_scores,
            overall_score,
            response_length: text.chars().count(),
            confidence: output.confidence,
        })
    }

    /// Evaluate the complete result set from one pipeline run.
    ///
    /// Every `AgentKind` has a rubric, so results coming from the pipeline
    /// never populate `failures`; that path is exercised through
    /// [`Evaluator::evaluate_named`].
    pub fn evaluate_all(
        &self,
        results: &BTreeMap<AgentKind, ResearchOutput>,
    ) -> SystemEvaluation {
        self.evaluate_named(
            results
                .iter()
                .map(|(kind, output)| (kind.to_string(), output)),
        )
    }

    /// Evaluate a result set keyed by agent name.
    ///
    /// Names without a rubric are reported inline in `failures`; the other
    /// agents still evaluate normally. An empty result set degrades the system
    /// score to 0 rather than failing.
    pub fn evaluate_named<'a>(
        &self,
        results: impl IntoIterator<Item = (String, &'a ResearchOutput)>,
    ) -> SystemEvaluation {
        let mut evaluations = BTreeMap::new();
        let mut failures = BTreeMap::new();

        for (name, output) in results {
            match self.evaluate_one(&name, output) {
                Ok(score) => {
                    evaluations.insert(name, score);
                }
                Err(err) => {
                    failures.insert(name, err.to_string());
                }
            }
        }

        let overall_scores: Vec<f64> =
            evaluations.values().map(|score| score.overall_score).collect();
        let system_score = if overall_scores.is_empty() {
            0.0
        } else {
            round2(overall_scores.iter().sum::<f64>() / overall_scores.len() as f64)
        };

        let recommendations = self.system_recommendations(&evaluations, system_score);

        SystemEvaluation {
            agent_count: evaluations.len(),
            distribution: ScoreDistribution::from_scores(&overall_scores),
            evaluations,
            failures,
            system_score,
            recommendations,
        }
    }

    /// Fixed-template improvement suggestions.
    ///
    /// The system threshold is strict (< 6.0); per-agent notes trigger below
    /// 5.0; with nothing to flag, a single "performing well" message.
    fn system_recommendations(
        &self,
        evaluations: &BTreeMap<String, EvaluationScore>,
        system_score: f64,
    ) -> Vec<String> {
        let mut recommendations = Vec::new();

        if system_score < 6.0 {
            recommendations
                .push("Consider adjusting agent prompts for better specificity".to_string());
            recommendations
                .push("Add more domain-specific keywords to improve analysis depth".to_string());
        }

        for (agent, score) in evaluations {
            if score.overall_score < 5.0 {
                recommendations
                    .push(format!("Agent {agent} needs improvement in analysis quality"));
            }
        }

        if recommendations.is_empty() {
            recommendations.push("System performing well - continue current approach".to_string());
        }

        recommendations
    }
}
