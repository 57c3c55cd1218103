//! @ai:module:intent Multi-agent benchmark pipeline library
//! @ai:module:layer application
//! @ai:module:public_api config, error, dataset, agents, runner, evaluator, metrics, analytics, deduction, pipeline, report

pub mod agents;
pub mod analytics;
pub mod config;
pub mod dataset;
pub mod deduction;
pub mod error;
pub mod evaluator;
pub mod metrics;
pub mod pipeline;
pub mod report;
pub mod runner;

pub use agents::{create_agent, Agent, AgentClient};
pub use analytics::{AnalysisReport, AnalyticsEngine};
pub use config::BenchmarkConfig;
pub use dataset::{Dataset, DatasetLoader, QuestionItem};
pub use deduction::{DeductionEngine, Deductions};
pub use error::{PipelineError, Result};
pub use evaluator::Evaluator;
pub use metrics::{AgentRecord, AgentResponse, AggregateMetrics, QuestionResult};
pub use pipeline::{BenchmarkReport, BenchmarkRunner, Pipeline};
pub use runner::BenchmarkExecutor;
