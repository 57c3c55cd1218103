//! @ai:module:intent Reduce raw per-question responses into per-agent aggregate metrics
//! @ai:module:layer application
//! @ai:module:public_api Evaluator, AgentEvaluation, RawStats
//! @ai:module:stateless true

use crate::metrics::stats::round2;
use crate::metrics::{AgentRecord, AgentResponse, AggregateMetrics, QueryOutcome, QuestionResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// @ai:intent Counters accumulated for one agent across a run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawStats {
    pub total_questions: u32,
    pub correct_answers: u32,
    pub total_latency: f64,
    pub total_tokens: u64,
    pub errors: u32,
}

impl RawStats {
    /// @ai:intent Fold one response into the counters
    /// @ai:post failures count toward total_questions and errors only
    /// @ai:effects state:write
    fn record(&mut self, response: &AgentResponse) {
        self.total_questions += 1;

        match &response.outcome {
            QueryOutcome::Failure { .. } => self.errors += 1,
            QueryOutcome::Success {
                usage,
                latency_seconds,
                ..
            } => {
                if response.is_correct {
                    self.correct_answers += 1;
                }
                self.total_latency += latency_seconds.max(0.0);
                self.total_tokens += usage.total;
            }
        }
    }

    /// @ai:intent Derive aggregate metrics, every ratio guarded against zero questions
    /// @ai:effects pure
    pub fn to_metrics(&self) -> AggregateMetrics {
        let n = self.total_questions;
        let accuracy = ratio(self.correct_answers as f64 * 100.0, n);
        let latency = ratio(self.total_latency, n);
        let tokens = ratio(self.total_tokens as f64, n);
        let error_rate = ratio(self.errors as f64 * 100.0, n);

        AggregateMetrics::new(round2(accuracy), round2(latency), round2(tokens), round2(error_rate))
    }
}

fn ratio(numerator: f64, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        numerator / total as f64
    }
}

/// @ai:intent Evaluation output for a single agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentEvaluation {
    pub agent_id: String,
    pub metrics: AggregateMetrics,
    pub raw_stats: RawStats,
}

impl AgentEvaluation {
    pub fn to_record(&self) -> AgentRecord {
        AgentRecord::new(self.agent_id.clone(), self.metrics.clone())
    }
}

/// @ai:intent Stateless reducer from question results to per-agent metrics
#[derive(Debug, Clone, Copy, Default)]
pub struct Evaluator;

impl Evaluator {
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Aggregate every response per agent
    /// @ai:post one entry per distinct agent id, in order of first appearance
    /// @ai:effects pure
    pub fn evaluate(&self, results: &[QuestionResult]) -> Vec<AgentEvaluation> {
        let mut order: Vec<&str> = Vec::new();
        let mut stats: HashMap<&str, RawStats> = HashMap::new();

        for result in results {
            for response in &result.responses {
                let agent_id = response.agent_id.as_str();
                let entry = stats.entry(agent_id).or_insert_with(|| {
                    order.push(agent_id);
                    RawStats::default()
                });
                entry.record(response);
            }
        }

        tracing::debug!(
            "Evaluated {} question results across {} agents",
            results.len(),
            order.len()
        );

        order
            .into_iter()
            .map(|agent_id| {
                let raw_stats = stats.remove(agent_id).unwrap_or_default();
                AgentEvaluation {
                    agent_id: agent_id.to_string(),
                    metrics: raw_stats.to_metrics(),
                    raw_stats,
                }
            })
            .collect()
    }
}
