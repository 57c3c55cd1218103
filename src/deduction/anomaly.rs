//! @ai:module:intent Flag agents whose metric sits outside the sigma band of the group
//! @ai:module:layer domain
//! @ai:module:public_api AnomalyRecord, AnomalyKind, AnomalyMetric, detect_anomalies
//! @ai:module:stateless true

use crate::metrics::stats::{mean, sample_std_dev, std_dev};
use crate::metrics::AgentRecord;
use serde::{Deserialize, Serialize};

const MIN_DATA_POINTS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyMetric {
    Accuracy,
    Latency,
    Tokens,
    Consistency,
}

impl AnomalyMetric {
    pub const ALL: [AnomalyMetric; 4] = [
        AnomalyMetric::Accuracy,
        AnomalyMetric::Latency,
        AnomalyMetric::Tokens,
        AnomalyMetric::Consistency,
    ];

    fn value(&self, agent: &AgentRecord) -> f64 {
        let m = &agent.metrics;
        match self {
            AnomalyMetric::Accuracy => m.accuracy_pct,
            AnomalyMetric::Latency => m.latency_avg,
            AnomalyMetric::Tokens => m.tokens_avg,
            AnomalyMetric::Consistency => m.consistency,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnomalyKind {
    LowOutlier,
    HighOutlier,
}

/// @ai:intent One metric value that falls outside mean ± sigma·std of its baseline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyRecord {
    pub agent_id: String,
    pub metric: AnomalyMetric,
    pub value: f64,
    /// Baseline mean the value was compared against
    pub mean: f64,
    /// Baseline standard deviation
    pub std_dev: f64,
    pub kind: AnomalyKind,
}

/// @ai:intent Whether a population band over all n values can ever exclude one of them
/// @ai:post the largest possible |z| over n points is (n - 1) / sqrt(n)
/// @ai:example (5, 2.0) -> false
/// @ai:example (6, 2.0) -> true
/// @ai:effects pure
fn all_agent_band_can_flag(n: usize, sigma: f64) -> bool {
    let n = n as f64;
    (n - 1.0) / n.sqrt() > sigma
}

/// @ai:intent Mean and std the value at `index` is judged against
/// @ai:post population stats over all values when that band can flag anything,
///          otherwise sample stats over the other values
/// @ai:effects pure
fn baseline(values: &[f64], index: usize, sigma: f64) -> (f64, f64) {
    if all_agent_band_can_flag(values.len(), sigma) {
        return (mean(values), std_dev(values));
    }

    let peers: Vec<f64> = values
        .iter()
        .enumerate()
        .filter(|&(j, _)| j != index)
        .map(|(_, &v)| v)
        .collect();
    (mean(&peers), sample_std_dev(&peers))
}

/// @ai:intent Detect per-metric outliers outside mean ± sigma·std
/// @ai:pre sigma > 0
/// @ai:post empty when fewer than three agents; a zero-spread baseline flags nothing;
///          ordered by metric, then agent input order
/// @ai:effects pure
pub fn detect_anomalies(agents: &[AgentRecord], sigma: f64) -> Vec<AnomalyRecord> {
    if agents.len() < MIN_DATA_POINTS {
        return Vec::new();
    }

    let mut anomalies = Vec::new();

    for metric in AnomalyMetric::ALL {
        let values: Vec<f64> = agents.iter().map(|a| metric.value(a)).collect();

        for (i, agent) in agents.iter().enumerate() {
            let (base_mean, base_std) = baseline(&values, i, sigma);
            if base_std == 0.0 {
                continue;
            }
            let value = values[i];

            let kind = if value < base_mean - sigma * base_std {
                Some(AnomalyKind::LowOutlier)
            } else if value > base_mean + sigma * base_std {
                Some(AnomalyKind::HighOutlier)
            } else {
                None
            };

            if let Some(kind) = kind {
                tracing::debug!("Anomaly for {}: {:?} {:?} = {}", agent.id, metric, kind, value);
                anomalies.push(AnomalyRecord {
                    agent_id: agent.id.clone(),
                    metric,
                    value,
                    mean: base_mean,
                    std_dev: base_std,
                    kind,
                });
            }
        }
    }

    anomalies
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::AggregateMetrics;
    use pretty_assertions::assert_eq;

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
    fn test_flags_low_accuracy_outlier() {
        let agents = vec![
            agent("a", 85.0, 2.0, 1000.0, 4.0),
            agent("b", 87.0, 2.0, 1000.0, 4.0),
            agent("c", 70.0, 2.0, 1000.0, 4.0),
        ];

        let anomalies = detect_anomalies(&agents, 2.0);

        assert_eq!(
            anomalies,
            vec![AnomalyRecord {
                agent_id: "c".to_string(),
                metric: AnomalyMetric::Accuracy,
                value: 70.0,
                mean: 86.0,
                std_dev: 2.0_f64.sqrt(),
                kind: AnomalyKind::LowOutlier,
            }]
        );
    }

    #[test]
    fn test_flags_high_latency_outlier() {
        let agents = vec![
            agent("a", 80.0, 1.0, 500.0, 4.0),
            agent("b", 80.0, 1.2, 500.0, 4.0),
            agent("c", 80.0, 0.8, 500.0, 4.0),
            agent("d", 80.0, 9.0, 500.0, 4.0),
        ];

        let anomalies = detect_anomalies(&agents, 2.0);
        assert_eq!(anomalies.len(), 1);
        assert_eq!(anomalies[0].agent_id, "d");
        assert_eq!(anomalies[0].metric, AnomalyMetric::Latency);
        assert_eq!(anomalies[0].kind, AnomalyKind::HighOutlier);
    }

    #[test]
    fn test_identical_values_have_no_outliers() {
        let agents = vec![
            agent("a", 80.0, 1.0, 500.0, 4.0),
            agent("b", 80.0, 1.0, 500.0, 4.0),
            agent("c", 80.0, 1.0, 500.0, 4.0),
        ];
        assert!(detect_anomalies(&agents, 2.0).is_empty());
    }

    #[test]
    fn test_two_agents_yield_nothing() {
        let agents = vec![agent("a", 10.0, 1.0, 1.0, 1.0), agent("b", 90.0, 9.0, 9.0, 9.0)];
        assert!(detect_anomalies(&agents, 2.0).is_empty());
    }

    #[test]
    fn test_evenly_spaced_values_are_not_outliers() {
        let agents: Vec<_> = [60.0, 70.0, 80.0, 90.0, 100.0]
            .iter()
            .enumerate()
            .map(|(i, &acc)| agent(&format!("a{i}"), acc, 2.0, 1000.0, 4.0))
            .collect();

        assert_eq!(detect_anomalies(&agents, 2.0), Vec::new());
    }

    #[test]
    fn test_large_groups_use_the_all_agent_band() {
        let mut agents: Vec<_> = (0..6)
            .map(|i| agent(&format!("a{i}"), 80.0, 2.0, 1000.0, 4.0))
            .collect();
        agents.push(agent("low", 20.0, 2.0, 1000.0, 4.0));

        let values: Vec<f64> = agents.iter().map(|a| a.metrics.accuracy_pct).collect();
        let anomalies = detect_anomalies(&agents, 2.0);

        assert_eq!(anomalies.len(), 1);
        assert_eq!(anomalies[0].agent_id, "low");
        assert_eq!(anomalies[0].mean, mean(&values));
        assert_eq!(anomalies[0].std_dev, std_dev(&values));
        assert_eq!(anomalies[0].kind, AnomalyKind::LowOutlier);
    }

    #[test]
    fn test_zero_spread_baseline_flags_nothing() {
        let agents = vec![
            agent("a", 80.0, 2.0, 1000.0, 100.0),
            agent("b", 80.0, 2.0, 1000.0, 100.0),
            agent("c", 80.0, 2.0, 1000.0, 99.9),
        ];
        assert!(detect_anomalies(&agents, 2.0).is_empty());
    }

    #[test]
    fn test_band_size_switch() {
        assert!(!all_agent_band_can_flag(3, 2.0));
        assert!(!all_agent_band_can_flag(5, 2.0));
        assert!(all_agent_band_can_flag(6, 2.0));
    }

    #[test]
    fn test_kind_serializes_screaming_snake() {
        let json = serde_json::to_string(&AnomalyKind::LowOutlier).unwrap();
        assert_eq!(json, "\"LOW_OUTLIER\"");
    }
}
