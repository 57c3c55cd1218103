//! @ai:module:intent Threshold, comparative and general recommendations as ordered reason codes
//! @ai:module:layer domain
//! @ai:module:public_api Recommendation, generate_recommendations
//! @ai:module:stateless true

use crate::metrics::AgentRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

const MIN_ACCURACY: f64 = 75.0;
const MAX_LATENCY_SECS: f64 = 5.0;
const MAX_TOKENS: f64 = 2000.0;
const MIN_CONSISTENCY: f64 = 4.0;
const ACCURACY_SPREAD: f64 = 10.0;

/// @ai:intent One recommendation; equal variants collapse inside a set
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum Recommendation {
    ImproveAccuracy { agent: String },
    OptimizeLatency { agent: String },
    ReviewTokenEfficiency { agent: String },
    ImproveConsistency { agent: String },
    CompareConfigurations { best: String, worst: String },
    RunAdditionalBenchmarks,
    DocumentOptimalConfigurations,
    MonitorTrends,
}

impl Recommendation {
    pub const GENERAL: [Recommendation; 3] = [
        Recommendation::RunAdditionalBenchmarks,
        Recommendation::DocumentOptimalConfigurations,
        Recommendation::MonitorTrends,
    ];
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Recommendation::ImproveAccuracy { agent } => {
                write!(f, "Consider fine-tuning {agent} to improve accuracy")
            }
            Recommendation::OptimizeLatency { agent } => write!(f, "Optimize response time for {agent}"),
            Recommendation::ReviewTokenEfficiency { agent } => {
                write!(f, "Review token usage efficiency for {agent}")
            }
            Recommendation::ImproveConsistency { agent } => {
                write!(f, "Improve response consistency for {agent}")
            }
            Recommendation::CompareConfigurations { best, worst } => write!(
                f,
                "Compare the configurations of {best} and {worst} to identify success factors"
            ),
            Recommendation::RunAdditionalBenchmarks => {
                write!(f, "Run additional benchmarks for statistical validation")
            }
            Recommendation::DocumentOptimalConfigurations => {
                write!(f, "Document the optimal configurations identified")
            }
            Recommendation::MonitorTrends => write!(f, "Monitor performance trends over time"),
        }
    }
}

/// @ai:intent Collect every recommendation that applies to the run
/// @ai:post always contains the three general recommendations
/// @ai:effects pure
pub fn generate_recommendations(agents: &[AgentRecord]) -> BTreeSet<Recommendation> {
    let mut recommendations = BTreeSet::new();

    for agent in agents {
        let m = &agent.metrics;
        let id = || agent.id.clone();

        if m.accuracy_pct < MIN_ACCURACY {
            recommendations.insert(Recommendation::ImproveAccuracy { agent: id() });
        }
        if m.latency_avg > MAX_LATENCY_SECS {
            recommendations.insert(Recommendation::OptimizeLatency { agent: id() });
        }
        if m.tokens_avg > MAX_TOKENS {
            recommendations.insert(Recommendation::ReviewTokenEfficiency { agent: id() });
        }
        if m.consistency < MIN_CONSISTENCY {
            recommendations.insert(Recommendation::ImproveConsistency { agent: id() });
        }
    }

    if let Some(compare) = compare_extremes(agents) {
        recommendations.insert(compare);
    }

    recommendations.extend(Recommendation::GENERAL);
    recommendations
}

/// First agent with the highest and first with the lowest accuracy, when they differ by more than the spread.
fn compare_extremes(agents: &[AgentRecord]) -> Option<Recommendation> {
    if agents.len() < 2 {
        return None;
    }

    let mut best = &agents[0];
    let mut worst = &agents[0];
    for agent in &agents[1..] {
        if agent.metrics.accuracy_pct > best.metrics.accuracy_pct {
            best = agent;
        }
        if agent.metrics.accuracy_pct < worst.metrics.accuracy_pct {
            worst = agent;
        }
    }

    (best.metrics.accuracy_pct - worst.metrics.accuracy_pct > ACCURACY_SPREAD).then(|| {
        Recommendation::CompareConfigurations {
            best: best.id.clone(),
            worst: worst.id.clone(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::AggregateMetrics;

    fn agent(id: &str, accuracy: f64, latency: f64, tokens: f64, consistency: f64) -> AgentRecord {
        AgentRecord::new(
            id,
            AggregateMetrics {
                accuracy_pct: accuracy,
                latency_avg: latency,
                tokens_avg: tokens,
                consistency,
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_threshold_rules_for_weak_agent() {
        let recommendations = generate_recommendations(&[agent("test-agent", 65.0, 6.0, 2500.0, 3.0)]);
        let agent = || "test-agent".to_string();

        let expected: BTreeSet<_> = [
            Recommendation::ImproveAccuracy { agent: agent() },
            Recommendation::OptimizeLatency { agent: agent() },
            Recommendation::ReviewTokenEfficiency { agent: agent() },
            Recommendation::ImproveConsistency { agent: agent() },
            Recommendation::RunAdditionalBenchmarks,
            Recommendation::DocumentOptimalConfigurations,
            Recommendation::MonitorTrends,
        ]
        .into_iter()
        .collect();

        assert_eq!(recommendations, expected);
    }

    #[test]
    fn test_healthy_agent_gets_only_general_recommendations() {
        let recommendations = generate_recommendations(&[agent("good", 95.0, 1.0, 500.0, 100.0)]);
        let expected: BTreeSet<_> = Recommendation::GENERAL.into_iter().collect();
        assert_eq!(recommendations, expected);
    }

    #[test]
    fn test_general_recommendations_without_agents() {
        assert_eq!(generate_recommendations(&[]).len(), 3);
    }

    #[test]
    fn test_comparative_rule_uses_first_extremes() {
        let agents = vec![
            agent("a", 90.0, 1.0, 100.0, 100.0),
            agent("b", 90.0, 1.0, 100.0, 100.0),
            agent("c", 78.0, 1.0, 100.0, 100.0),
        ];

        let recommendations = generate_recommendations(&agents);
        assert!(recommendations.contains(&Recommendation::CompareConfigurations {
            best: "a".to_string(),
            worst: "c".to_string(),
        }));
    }

    #[test]
    fn test_spread_of_exactly_ten_is_silent() {
        let agents = vec![agent("a", 90.0, 1.0, 100.0, 100.0), agent("b", 80.0, 1.0, 100.0, 100.0)];
        let recommendations = generate_recommendations(&agents);
        assert!(!recommendations
            .iter()
            .any(|r| matches!(r, Recommendation::CompareConfigurations { .. })));
    }

    #[test]
    fn test_duplicate_agent_ids_collapse() {
        let agents = vec![agent("dup", 50.0, 1.0, 100.0, 100.0), agent("dup", 60.0, 1.0, 100.0, 100.0)];
        let count = generate_recommendations(&agents)
            .iter()
            .filter(|r| matches!(r, Recommendation::ImproveAccuracy { .. }))
            .count();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_rendered_text_and_code() {
        let rec = Recommendation::OptimizeLatency {
            agent: "slow".to_string(),
        };
        assert_eq!(rec.to_string(), "Optimize response time for slow");

        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["code"], "optimize_latency");
        assert_eq!(json["agent"], "slow");
    }
}
