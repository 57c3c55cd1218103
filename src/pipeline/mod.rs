//! @ai:module:intent Evaluator -> {analytics, deduction} reduction and the end-to-end benchmark run
//! @ai:module:layer application
//! @ai:module:public_api Pipeline, BenchmarkRunner, BenchmarkReport, RunSummary, category_scores

pub mod categories;

pub use categories::category_scores;

use crate::agents::AgentClient;
use crate::analytics::{AnalysisReport, AnalyticsEngine};
use crate::config::RunConfig;
use crate::dataset::{Dataset, QuestionItem};
use crate::deduction::{DeductionEngine, Deductions};
use crate::error::{PipelineError, Result};
use crate::evaluator::Evaluator;
use crate::metrics::{AgentRecord, QuestionResult};
use crate::runner::BenchmarkExecutor;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// @ai:intent Headline numbers of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// First agent with the highest accuracy
    pub top_performer: Option<String>,
    pub question_count: usize,
    pub agent_count: usize,
    pub failed_queries: usize,
}

/// @ai:intent Merged output of one benchmark run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkReport {
    pub run_id: String,
    pub benchmark: String,
    /// RFC 3339, UTC
    pub timestamp: String,
    pub agents: Vec<AgentRecord>,
    pub summary: RunSummary,
    pub analysis: AnalysisReport,
    pub deductions: Deductions,
}

impl RunSummary {
    /// @ai:effects pure
    pub fn new(agents: &[AgentRecord], results: &[QuestionResult]) -> Self {
        let mut top: Option<&AgentRecord> = None;
        for agent in agents {
            match top {
                Some(best) if agent.metrics.accuracy_pct <= best.metrics.accuracy_pct => {}
                _ => top = Some(agent),
            }
        }

        let failed_queries = results
            .iter()
            .flat_map(|r| &r.responses)
            .filter(|r| r.is_error())
            .count();

        Self {
            top_performer: top.map(|a| a.id.clone()),
            question_count: results.len(),
            agent_count: agents.len(),
            failed_queries,
        }
    }
}

/// @ai:intent Stateless reduction from question results to a report
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    evaluator: Evaluator,
    analytics: AnalyticsEngine,
    deduction: DeductionEngine,
}

impl Pipeline {
    pub fn new(evaluator: Evaluator, analytics: AnalyticsEngine, deduction: DeductionEngine) -> Self {
        Self {
            evaluator,
            analytics,
            deduction,
        }
    }

    /// @ai:intent Run analytics and deduction over the same records on two blocking tasks
    /// @ai:post a panicking stage fails the whole reduction
    /// @ai:effects pure
    pub async fn analyze_records(&self, agents: Vec<AgentRecord>) -> Result<(AnalysisReport, Deductions)> {
        let agents = Arc::new(agents);

        let analytics = {
            let engine = self.analytics;
            let agents = Arc::clone(&agents);
            tokio::task::spawn_blocking(move || engine.analyze(&agents))
        };
        let deduction = {
            let engine = self.deduction.clone();
            let agents = Arc::clone(&agents);
            tokio::task::spawn_blocking(move || engine.deduce(&agents))
        };

        let (analysis, deductions) = tokio::join!(analytics, deduction);

        let analysis = analysis.map_err(|e| PipelineError::Stage {
            stage: "analytics",
            message: e.to_string(),
        })?;
        let deductions = deductions.map_err(|e| PipelineError::Stage {
            stage: "deduction",
            message: e.to_string(),
        })?;

        Ok((analysis, deductions))
    }

    /// @ai:intent Evaluate results, attach category scores and merge both engine outputs
    /// @ai:effects pure
    pub async fn reduce(
        &self,
        benchmark_id: &str,
        questions: &[QuestionItem],
        results: &[QuestionResult],
    ) -> Result<BenchmarkReport> {
        let mut scores = category_scores(questions, results);
        let agents: Vec<AgentRecord> = self
            .evaluator
            .evaluate(results)
            .iter()
            .map(|evaluation| {
                let record = evaluation.to_record();
                match scores.remove(&record.id) {
                    Some(s) => record.with_category_scores(s),
                    None => record,
                }
            })
            .collect();

        let summary = RunSummary::new(&agents, results);
        let (analysis, deductions) = self.analyze_records(agents.clone()).await?;

        let now = Utc::now();
        let report = BenchmarkReport {
            run_id: run_id(benchmark_id, now),
            benchmark: benchmark_id.to_string(),
            timestamp: now.to_rfc3339(),
            agents,
            summary,
            analysis,
            deductions,
        };

        tracing::info!(
            "Reduced {} questions for {} agents (top performer: {})",
            report.summary.question_count,
            report.summary.agent_count,
            report.summary.top_performer.as_deref().unwrap_or("none")
        );
        Ok(report)
    }
}

/// @ai:effects pure
fn run_id(benchmark_id: &str, at: DateTime<Utc>) -> String {
    format!("{}-{}", benchmark_id, at.format("%Y%m%d-%H%M%S-%3f"))
}

/// @ai:intent Dataset -> fan-out -> reduction, for one set of agents
pub struct BenchmarkRunner {
    run_config: RunConfig,
    pipeline: Pipeline,
}

impl BenchmarkRunner {
    pub fn new(run_config: RunConfig, pipeline: Pipeline) -> Self {
        Self { run_config, pipeline }
    }

    /// @ai:intent Run the whole benchmark and return the merged report
    /// @ai:pre agents is non-empty
    /// @ai:post per-agent query failures are recorded, never fatal
    /// @ai:effects network
    pub async fn run<C: AgentClient>(
        &self,
        dataset: &Dataset,
        agents: Vec<Arc<C>>,
        benchmark_id: &str,
    ) -> Result<BenchmarkReport> {
        if agents.is_empty() {
            return Err(PipelineError::NoAgents);
        }

        tracing::info!(
            "Running benchmark '{}' with {} questions and {} agents",
            benchmark_id,
            dataset.questions.len(),
            agents.len()
        );

        let executor = BenchmarkExecutor::new(agents, self.run_config.clone());
        let results = executor.run_questions(&dataset.questions).await;

        self.pipeline.reduce(benchmark_id, &dataset.questions, &results).await
    }
}
