//! @ai:module:intent Pearson correlations between accuracy, latency and token usage across agents
//! @ai:module:layer domain
//! @ai:module:public_api CorrelationAnalysis, MetricCorrelation, PairCorrelation, CorrelationStrength, MetricPair, analyze_correlations
//! @ai:module:stateless true

use crate::metrics::stats::pearson;
use crate::metrics::{AgentRecord, InsufficientData};
use serde::{Deserialize, Serialize};

const MIN_AGENTS_FOR_CORRELATION: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricPair {
    AccuracyLatency,
    AccuracyTokens,
    LatencyTokens,
}

impl MetricPair {
    pub const ALL: [MetricPair; 3] = [
        MetricPair::AccuracyLatency,
        MetricPair::AccuracyTokens,
        MetricPair::LatencyTokens,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MetricPair::AccuracyLatency => "accuracy vs latency",
            MetricPair::AccuracyTokens => "accuracy vs tokens",
            MetricPair::LatencyTokens => "latency vs tokens",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CorrelationStrength {
    Strong,
    Moderate,
    Weak,
}

impl CorrelationStrength {
    /// @ai:intent Classify |r|: > 0.7 strong, > 0.3 moderate, else weak
    /// @ai:effects pure
    pub fn classify(r: f64) -> Self {
        let magnitude = r.abs();
        if magnitude > 0.7 {
            CorrelationStrength::Strong
        } else if magnitude > 0.3 {
            CorrelationStrength::Moderate
        } else {
            CorrelationStrength::Weak
        }
    }
}

/// @ai:intent Coefficient for one metric pair, or why it is undefined
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PairCorrelation {
    Computed {
        coefficient: f64,
        strength: CorrelationStrength,
    },
    Undefined {
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricCorrelation {
    pub pair: MetricPair,
    pub result: PairCorrelation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CorrelationAnalysis {
    InsufficientData(InsufficientData),
    Computed { correlations: Vec<MetricCorrelation> },
}

impl CorrelationAnalysis {
    /// @ai:intent Coefficient for a pair when it was computed
    /// @ai:effects pure
    pub fn coefficient(&self, pair: MetricPair) -> Option<f64> {
        let CorrelationAnalysis::Computed { correlations } = self else {
            return None;
        };
        correlations
            .iter()
            .find(|c| c.pair == pair)
            .and_then(|c| match c.result {
                PairCorrelation::Computed { coefficient, .. } => Some(coefficient),
                PairCorrelation::Undefined { .. } => None,
            })
    }
}

/// @ai:intent Correlate the agent-indexed metric vectors for each pair
/// @ai:pre at least three agents, otherwise an insufficient-data marker
/// @ai:effects pure
pub fn analyze_correlations(agents: &[AgentRecord]) -> CorrelationAnalysis {
    if let Some(marker) = InsufficientData::check(MIN_AGENTS_FOR_CORRELATION, agents.len()) {
        return CorrelationAnalysis::InsufficientData(marker);
    }

    let accuracy: Vec<f64> = agents.iter().map(|a| a.metrics.accuracy_pct).collect();
    let latency: Vec<f64> = agents.iter().map(|a| a.metrics.latency_avg).collect();
    let tokens: Vec<f64> = agents.iter().map(|a| a.metrics.tokens_avg).collect();

    let correlations = MetricPair::ALL
        .iter()
        .map(|&pair| {
            let (x, y) = match pair {
                MetricPair::AccuracyLatency => (&accuracy, &latency),
                MetricPair::AccuracyTokens => (&accuracy, &tokens),
                MetricPair::LatencyTokens => (&latency, &tokens),
            };

            let result = match pearson(x, y) {
                Some(r) => PairCorrelation::Computed {
                    coefficient: r,
                    strength: CorrelationStrength::classify(r),
                },
                None => {
                    tracing::debug!("Correlation for {} is undefined", pair.label());
                    PairCorrelation::Undefined {
                        reason: format!("zero variance in {}", pair.label()),
                    }
                }
            };

            MetricCorrelation { pair, result }
        })
        .collect();

    CorrelationAnalysis::Computed { correlations }
}
