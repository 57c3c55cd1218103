//! @ai:module:intent Data model shared by every pipeline stage
//! @ai:module:layer domain
//! @ai:module:public_api TokenUsage, QueryOutcome, AgentResponse, QuestionResult, AggregateMetrics, AgentRecord, CategoryScores, InsufficientData
//! @ai:module:stateless true

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Category name to score (0-100).
pub type CategoryScores = BTreeMap<String, f64>;

/// @ai:intent Token counts reported by an agent for one query
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input: u64,
    pub output: u64,
    pub total: u64,
}

impl TokenUsage {
    /// @ai:intent Build usage with total derived from input and output
    /// @ai:effects pure
    pub fn new(input: u64, output: u64) -> Self {
        Self {
            input,
            output,
            total: input + output,
        }
    }
}

/// @ai:intent Result of a single agent query: an answer or a failure reason, never both
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum QueryOutcome {
    Success {
        text: String,
        usage: TokenUsage,
        latency_seconds: f64,
    },
    Failure {
        reason: String,
    },
}

impl QueryOutcome {
    /// @ai:intent Shorthand for a failed query
    /// @ai:effects pure
    pub fn failure(reason: impl Into<String>) -> Self {
        QueryOutcome::Failure {
            reason: reason.into(),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, QueryOutcome::Failure { .. })
    }
}

/// @ai:intent One agent's response to one question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentResponse {
    pub agent_id: String,
    pub outcome: QueryOutcome,
    /// Decided at collection time; always false for failures
    pub is_correct: bool,
}

impl AgentResponse {
    /// @ai:intent Build a successful response
    /// @ai:effects pure
    pub fn answered(
        agent_id: impl Into<String>,
        text: impl Into<String>,
        usage: TokenUsage,
        latency_seconds: f64,
        is_correct: bool,
    ) -> Self {
        Self {
            agent_id: agent_id.into(),
            outcome: QueryOutcome::Success {
                text: text.into(),
                usage,
                latency_seconds,
            },
            is_correct,
        }
    }

    /// @ai:intent Build a failed response
    /// @ai:post is_correct == false
    /// @ai:effects pure
    pub fn failed(agent_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            agent_id: agent_id.into(),
            outcome: QueryOutcome::failure(reason),
            is_correct: false,
        }
    }

    pub fn is_error(&self) -> bool {
        self.outcome.is_failure()
    }

    pub fn text(&self) -> Option<&str> {
        match &self.outcome {
            QueryOutcome::Success { text, .. } => Some(text),
            QueryOutcome::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            QueryOutcome::Success { .. } => None,
            QueryOutcome::Failure { reason } => Some(reason),
        }
    }
}

/// @ai:intent All agent responses collected for one question, in agent input order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionResult {
    pub question_id: String,
    pub responses: Vec<AgentResponse>,
}

/// @ai:intent Per-agent summary metrics derived from every response in a run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateMetrics {
    #[serde(rename = "accuracy")]
    pub accuracy_pct: f64,
    pub latency_avg: f64,
    pub tokens_avg: f64,
    #[serde(rename = "error_rate")]
    pub error_rate_pct: f64,
    /// 100 - error_rate_pct
    pub consistency: f64,
    /// Caller-supplied metrics beyond the canonical five
    #[serde(flatten, default)]
    pub extra: BTreeMap<String, f64>,
}

impl AggregateMetrics {
    pub const ACCURACY: &'static str = "accuracy";
    pub const LATENCY: &'static str = "latency_avg";
    pub const TOKENS: &'static str = "tokens_avg";
    pub const ERROR_RATE: &'static str = "error_rate";
    pub const CONSISTENCY: &'static str = "consistency";

    /// @ai:intent Canonical metrics with consistency derived from the error rate
    /// @ai:effects pure
    pub fn new(accuracy_pct: f64, latency_avg: f64, tokens_avg: f64, error_rate_pct: f64) -> Self {
        Self {
            accuracy_pct,
            latency_avg,
            tokens_avg,
            error_rate_pct,
            consistency: 100.0 - error_rate_pct,
            extra: BTreeMap::new(),
        }
    }

    /// @ai:intent Every metric as a (name, value) pair, canonical metrics first
    /// @ai:effects pure
    pub fn named_values(&self) -> Vec<(String, f64)> {
        let mut values = vec![
            (Self::ACCURACY.to_string(), self.accuracy_pct),
            (Self::LATENCY.to_string(), self.latency_avg),
            (Self::TOKENS.to_string(), self.tokens_avg),
            (Self::ERROR_RATE.to_string(), self.error_rate_pct),
            (Self::CONSISTENCY.to_string(), self.consistency),
        ];
        values.extend(self.extra.iter().map(|(k, v)| (k.clone(), *v)));
        values
    }
}

/// @ai:intent Input unit of the analytics and deduction engines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentRecord {
    pub id: String,
    pub metrics: AggregateMetrics,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_scores: Option<CategoryScores>,
}

impl AgentRecord {
    pub fn new(id: impl Into<String>, metrics: AggregateMetrics) -> Self {
        Self {
            id: id.into(),
            metrics,
            category_scores: None,
        }
    }

    pub fn with_category_scores(mut self, scores: CategoryScores) -> Self {
        self.category_scores = Some(scores);
        self
    }
}

/// @ai:intent Marker for a stage that needs more agents than the run has
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsufficientData {
    pub required: usize,
    pub available: usize,
}

impl InsufficientData {
    /// @ai:intent Return a marker when fewer than `required` agents are available
    /// @ai:effects pure
    pub fn check(required: usize, available: usize) -> Option<Self> {
        (available < required).then_some(Self {
            required,
            available,
        })
    }
}

impl std::fmt::Display for InsufficientData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "insufficient data: need at least {} agents, got {}",
            self.required, self.available
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consistency_is_complement_of_error_rate() {
        let metrics = AggregateMetrics::new(80.0, 1.0, 100.0, 12.5);
        assert!((metrics.consistency - 87.5).abs() < 1e-9);
    }

    #[test]
    fn test_named_values_include_extra_metrics() {
        let mut metrics = AggregateMetrics::new(80.0, 1.0, 100.0, 0.0);
        metrics.extra.insert("cost_usd".to_string(), 0.25);

        let names: Vec<_> = metrics.named_values().into_iter().map(|(n, _)| n).collect();
        assert_eq!(
            names,
            vec!["accuracy", "latency_avg", "tokens_avg", "error_rate", "consistency", "cost_usd"]
        );
    }

    #[test]
    fn test_extra_metrics_flatten_in_json() {
        let mut metrics = AggregateMetrics::new(90.0, 2.0, 300.0, 0.0);
        metrics.extra.insert("cost_usd".to_string(), 1.5);

        let json = serde_json::to_value(&metrics).unwrap();
        assert_eq!(json["cost_usd"], 1.5);
        assert_eq!(json["accuracy"], 90.0);

        let back: AggregateMetrics = serde_json::from_value(json).unwrap();
        assert_eq!(back, metrics);
    }

    #[test]
    fn test_failed_response_is_never_correct() {
        let response = AgentResponse::failed("agent-a", "timeout");
        assert!(response.is_error());
        assert!(!response.is_correct);
        assert_eq!(response.error(), Some("timeout"));
        assert_eq!(response.text(), None);
    }

    #[test]
    fn test_insufficient_data_check() {
        assert_eq!(InsufficientData::check(2, 2), None);
        assert_eq!(
            InsufficientData::check(3, 2),
            Some(InsufficientData {
                required: 3,
                available: 2
            })
        );
    }
}
