pub mod config;
pub mod evaluation;
pub mod profile;
pub mod research;

pub use config::{CompletionConfig, Config, LoggingConfig};
pub use evaluation::{EvaluationScore, ScoreDistribution, SystemEvaluation};
pub use profile::{AgentKind, AgentProfile};
pub use research::{PipelineResult, Recommendation, ResearchOutput};
