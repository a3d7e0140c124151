//! Service layer: agents, evaluation, and pipeline orchestration.

pub mod confidence;
pub mod decision_agent;
pub mod evaluator;
pub mod pipeline;
pub mod research_agent;

pub use confidence::confidence_score;
pub use decision_agent::DecisionAgent;
pub use evaluator::Evaluator;
pub use pipeline::ResearchPipeline;
pub use research_agent::ResearchAgent;
