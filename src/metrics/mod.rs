//! @ai:module:intent Data model and statistics for benchmark metrics
//! @ai:module:layer domain
//! @ai:module:public_api AgentResponse, QuestionResult, AggregateMetrics, AgentRecord, MetricSummary

pub mod stats;
pub mod types;

pub use stats::MetricSummary;
pub use types::{
    AgentRecord, AgentResponse, AggregateMetrics, CategoryScores, InsufficientData, QueryOutcome,
    QuestionResult, TokenUsage,
};
