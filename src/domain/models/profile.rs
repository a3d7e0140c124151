use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The four agent kinds in the research pipeline, in pipeline order.
///
/// Ordering matters for deterministic iteration over result maps: the three
/// research agents come first, the decision agent last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentKind {
    Incumbents,
    Funding,
    Growth,
    Decision,
}

impl AgentKind {
    /// All agent kinds in pipeline order.
    pub const ALL: [AgentKind; 4] = [
        AgentKind::Incumbents,
        AgentKind::Funding,
        AgentKind::Growth,
        AgentKind::Decision,
    ];

    /// Lowercase name used as the rubric lookup key.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Incumbents => "incumbents",
            Self::Funding => "funding",
            Self::Growth => "growth",
            Self::Decision => "decision",
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgentKind {
    type Err = crate::domain::errors::DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "incumbents" => Ok(Self::Incumbents),
            "funding" => Ok(Self::Funding),
            "growth" => Ok(Self::Growth),
            "decision" => Ok(Self::Decision),
            other => Err(crate::domain::errors::DomainError::UnknownAgentKind(
                other.to_string(),
            )),
        }
    }
}

/// Static configuration for one agent: its analytical lens and sampling
/// parameters. Created once at startup, immutable thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentProfile {
    /// Which agent this profile configures
    pub kind: AgentKind,

    /// Fixed system prompt defining the agent's analytical lens
    pub role_prompt: String,

    /// Sampling temperature for completion requests
    pub temperature: f32,

    /// Response length cap in tokens
    pub max_tokens: u32,
}

impl AgentProfile {
    /// Profile for the competitive-analysis agent.
    pub fn incumbents() -> Self {
        Self {
            kind: AgentKind::Incumbents,
            role_prompt: "You are a market research expert specializing in competitive analysis.\n\
                Your job is to identify existing competitors and their key features for a given product idea.\n\
                \n\
                Focus on:\n\
                - Main competitors in the space\n\
                - Their key features and differentiators\n\
                - Market positioning\n\
                - Strengths and weaknesses\n\
                \n\
                Provide specific, actionable insights. Be concise but thorough."
                .to_string(),
            temperature: 0.7,
            max_tokens: 500,
        }
    }

    /// Profile for the funding-landscape agent.
    pub fn funding() -> Self {
        Self {
            kind: AgentKind::Funding,
            role_prompt: "You are a venture capital research expert.\n\
                Your job is to analyze funding activity and investor interest in a given product space.\n\
                \n\
                Focus on:\n\
                - Recent funding rounds in similar companies\n\
                - Investor sentiment and trends\n\
                - Valuation trends\n\
                - Market attractiveness to VCs\n\
                \n\
                Provide specific insights about funding landscape. Be data-driven where possible."
                .to_string(),
            temperature: 0.7,
            max_tokens: 500,
        }
    }

    /// Profile for the market-growth agent.
    pub fn growth() -> Self {
        Self {
            kind: AgentKind::Growth,
            role_prompt: "You are a market growth analyst.\n\
                Your job is to evaluate market size, growth potential, and revenue opportunities.\n\
                \n\
                Focus on:\n\
                - Market size and growth rate\n\
                - Revenue potential\n\
                - Market maturity and lifecycle stage\n\
                - Economic factors affecting growth\n\
                \n\
                Provide quantitative insights where possible. Focus on growth trajectory."
                .to_string(),
            temperature: 0.7,
            max_tokens: 500,
        }
    }

    /// Profile for the decision-synthesis agent.
    ///
    /// Lower temperature than the research agents: synthesis favors consistency
    /// over exploration.
    pub fn decision() -> Self {
        Self {
            kind: AgentKind::Decision,
            role_prompt: "You are a strategic investment advisor.\n\
                Your job is to synthesize market research and make a final recommendation.\n\
                \n\
                You will receive analysis from three areas: competitors, funding, and growth.\n\
                Based on this, provide:\n\
                - Overall recommendation (Good/Neutral/Poor opportunity)\n\
                - Key reasons supporting your decision\n\
                - Main risks and opportunities\n\
                - Confidence level in your assessment\n\
                \n\
                Be decisive but balanced in your judgment."
                .to_string(),
            temperature: 0.5,
            max_tokens: 400,
        }
    }

    /// Profile for a given agent kind.
    pub fn for_kind(kind: AgentKind) -> Self {
        match kind {
            AgentKind::Incumbents => Self::incumbents(),
            AgentKind::Funding => Self::funding(),
            AgentKind::Growth => Self::growth(),
            AgentKind::Decision => Self::decision(),
        }
    }
}
