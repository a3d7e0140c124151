//! Prospector - Multi-Agent Market Research Pipeline
//!
//! Prospector runs a small pipeline of specialized research agents over a product
//! idea. Three agents analyze independent facets (incumbents, funding, growth), a
//! decision agent synthesizes their output into a categorical recommendation, and
//! a rubric-based evaluator scores every agent's response with keyword-density
//! heuristics.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Pure domain models, errors, and ports
//! - **Service Layer** (`services`): Agents, pipeline orchestration, evaluation
//! - **Adapters** (`adapters`): Completion backends (OpenAI API, mock)
//! - **Infrastructure Layer** (`infrastructure`): Configuration loading
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```ignore
//! use prospector::services::ResearchPipeline;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Build a pipeline with a completion client and run one product idea
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{
    AgentKind, AgentProfile, CompletionConfig, Config, EvaluationScore, LoggingConfig,
    PipelineResult, Recommendation, ResearchOutput, ScoreDistribution, SystemEvaluation,
};
pub use domain::ports::{CompletionClient, CompletionError, CompletionRequest};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{DecisionAgent, Evaluator, ResearchAgent, ResearchPipeline};
