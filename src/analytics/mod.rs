//! @ai:module:intent Ratings, rankings, statistical summaries and insights over aggregate metrics
//! @ai:module:layer application
//! @ai:module:public_api AnalyticsEngine, AnalysisReport, ComparativeAnalysis, RankedAgent, Insight
//! @ai:module:stateless true

pub mod insights;
pub mod rating;

pub use insights::{generate_insights, Insight, InsightKind};
pub use rating::{cost_efficiency, rate_accuracy, rate_latency, tokens_per_second, Rating};

use crate::metrics::{AgentRecord, InsufficientData, MetricSummary};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// @ai:intent A metric value together with its rating bucket
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatedValue {
    pub value: f64,
    pub rating: Rating,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Efficiency {
    pub tokens_per_second: f64,
    pub cost_efficiency: f64,
}

/// @ai:intent Rated metrics for one agent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceAnalysis {
    pub accuracy: RatedValue,
    pub latency: RatedValue,
    pub efficiency: Efficiency,
}

impl PerformanceAnalysis {
    /// @ai:effects pure
    fn from_record(agent: &AgentRecord) -> Self {
        let m = &agent.metrics;
        Self {
            accuracy: RatedValue {
                value: m.accuracy_pct,
                rating: rate_accuracy(m.accuracy_pct),
            },
            latency: RatedValue {
                value: m.latency_avg,
                rating: rate_latency(m.latency_avg),
            },
            efficiency: Efficiency {
                tokens_per_second: tokens_per_second(m.tokens_avg, m.latency_avg),
                cost_efficiency: cost_efficiency(m.accuracy_pct, m.tokens_avg),
            },
        }
    }
}

/// @ai:intent One row of the composite ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedAgent {
    pub agent_id: String,
    pub composite_score: f64,
    pub accuracy: f64,
    pub latency: f64,
    pub consistency: f64,
}

/// @ai:intent Head-to-head comparison of two or more agents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentComparison {
    pub best_accuracy: String,
    pub best_latency: String,
    pub most_efficient: String,
    pub ranking: Vec<RankedAgent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ComparativeAnalysis {
    InsufficientData(InsufficientData),
    Available(AgentComparison),
}

impl ComparativeAnalysis {
    pub fn comparison(&self) -> Option<&AgentComparison> {
        match self {
            ComparativeAnalysis::Available(c) => Some(c),
            ComparativeAnalysis::InsufficientData(_) => None,
        }
    }
}

/// @ai:intent Complete analytics output for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub total_agents: usize,
    pub performance_metrics: BTreeMap<String, PerformanceAnalysis>,
    pub comparative_analysis: ComparativeAnalysis,
    pub statistical_summary: BTreeMap<String, MetricSummary>,
    pub insights: Vec<Insight>,
}

impl AnalysisReport {
    /// @ai:intent Render every insight as text, preserving order
    /// @ai:effects pure
    pub fn insight_messages(&self) -> Vec<String> {
        self.insights.iter().map(ToString::to_string).collect()
    }
}

const MIN_AGENTS_FOR_COMPARISON: usize = 2;

/// @ai:intent Composite score: accuracy*0.5 + max(0, (10-latency)*2) + consistency*0.3
/// @ai:effects pure
pub fn composite_score(agent: &AgentRecord) -> f64 {
    let m = &agent.metrics;
    m.accuracy_pct * 0.5 + ((10.0 - m.latency_avg) * 2.0).max(0.0) + m.consistency * 0.3
}

/// @ai:intent Stateless analytics engine
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyticsEngine;

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Analyze aggregate metrics of every agent in the run
    /// @ai:post identical input yields identical output
    /// @ai:effects pure
    pub fn analyze(&self, agents: &[AgentRecord]) -> AnalysisReport {
        let performance_metrics = agents
            .iter()
            .map(|a| (a.id.clone(), PerformanceAnalysis::from_record(a)))
            .collect();

        let report = AnalysisReport {
            total_agents: agents.len(),
            performance_metrics,
            comparative_analysis: self.compare(agents),
            statistical_summary: statistical_summary(agents),
            insights: generate_insights(agents),
        };

        tracing::debug!(
            "Analytics produced {} insights for {} agents",
            report.insights.len(),
            report.total_agents
        );
        report
    }

    /// @ai:intent Pick per-metric winners and rank agents by composite score
    /// @ai:pre ties resolve to the earliest agent in input order
    /// @ai:effects pure
    pub fn compare(&self, agents: &[AgentRecord]) -> ComparativeAnalysis {
        if let Some(marker) = InsufficientData::check(MIN_AGENTS_FOR_COMPARISON, agents.len()) {
            return ComparativeAnalysis::InsufficientData(marker);
        }

        let best_accuracy = first_best(agents, |a| a.metrics.accuracy_pct, |c, b| c > b);
        let best_latency = first_best(agents, |a| a.metrics.latency_avg, |c, b| c < b);
        let most_efficient = first_best(agents, |a| a.metrics.tokens_avg, |c, b| c < b);

        ComparativeAnalysis::Available(AgentComparison {
            best_accuracy,
            best_latency,
            most_efficient,
            ranking: rank_agents(agents),
        })
    }
}

/// @ai:intent Id of the first agent whose value beats all earlier ones
/// @ai:pre agents is non-empty
/// @ai:effects pure
fn first_best(
    agents: &[AgentRecord],
    value: impl Fn(&AgentRecord) -> f64,
    better: impl Fn(f64, f64) -> bool,
) -> String {
    let mut best: Option<(&AgentRecord, f64)> = None;

    for agent in agents {
        let v = value(agent);
        match best {
            Some((_, current)) if !better(v, current) => {}
            _ => best = Some((agent, v)),
        }
    }

    best.map(|(a, _)| a.id.clone()).unwrap_or_default()
}

/// @ai:intent Sort agents descending by composite score (stable)
/// @ai:effects pure
pub fn rank_agents(agents: &[AgentRecord]) -> Vec<RankedAgent> {
    let mut ranked: Vec<RankedAgent> = agents
        .iter()
        .map(|a| RankedAgent {
            agent_id: a.id.clone(),
            composite_score: composite_score(a),
            accuracy: a.metrics.accuracy_pct,
            latency: a.metrics.latency_avg,
            consistency: a.metrics.consistency,
        })
        .collect();

    ranked.sort_by(|a, b| b.composite_score.total_cmp(&a.composite_score));
    ranked
}

/// @ai:intent Mean/median/std/min/max for every metric name present on all agents
/// @ai:effects pure
pub fn statistical_summary(agents: &[AgentRecord]) -> BTreeMap<String, MetricSummary> {
    let mut collected: BTreeMap<String, Vec<f64>> = BTreeMap::new();

    for agent in agents {
        for (name, value) in agent.metrics.named_values() {
            collected.entry(name).or_default().push(value);
        }
    }

    collected
        .into_iter()
        .filter(|(_, values)| values.len() == agents.len())
        .filter_map(|(name, values)| MetricSummary::from_values(&values).map(|s| (name, s)))
        .collect()
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
    fn test_performance_ratings() {
        let report = AnalyticsEngine::new().analyze(&[agent("test-agent", 95.0, 1.5, 800.0, 4.8)]);
        let perf = &report.performance_metrics["test-agent"];

        assert_eq!(perf.accuracy.rating, Rating::Excellent);
        // 1.5s is Good, not Excellent
        assert_eq!(perf.latency.rating, Rating::Good);
        assert!((perf.efficiency.tokens_per_second - 533.333).abs() < 0.001);
        assert!((perf.efficiency.cost_efficiency - 1.1875).abs() < 1e-9);
    }

    #[test]
    fn test_best_accuracy_and_latency() {
        let agents = vec![
            agent("first", 80.0, 2.0, 1000.0, 100.0),
            agent("second", 90.0, 1.0, 1200.0, 100.0),
        ];

        let analysis = AnalyticsEngine::new().compare(&agents);
        let comparison = analysis.comparison().unwrap();

        assert_eq!(comparison.best_accuracy, "second");
        assert_eq!(comparison.best_latency, "second");
        assert_eq!(comparison.most_efficient, "first");
    }

    #[test]
    fn test_comparison_needs_two_agents() {
        let analysis = AnalyticsEngine::new().compare(&[agent("solo", 90.0, 1.0, 100.0, 100.0)]);
        assert_eq!(
            analysis,
            ComparativeAnalysis::InsufficientData(InsufficientData {
                required: 2,
                available: 1
            })
        );
    }

    #[test]
    fn test_ties_resolve_to_input_order() {
        let agents = vec![
            agent("a", 90.0, 2.0, 500.0, 100.0),
            agent("b", 90.0, 2.0, 500.0, 100.0),
        ];

        let analysis = AnalyticsEngine::new().compare(&agents);
        let comparison = analysis.comparison().unwrap();
        assert_eq!(comparison.best_accuracy, "a");
        assert_eq!(comparison.best_latency, "a");
        assert_eq!(comparison.most_efficient, "a");

        let order: Vec<_> = comparison.ranking.iter().map(|r| r.agent_id.as_str()).collect();
        assert_eq!(order, vec!["a", "b"]);
    }

    #[test]
    fn test_ranking_by_composite_score() {
        let agents = vec![
            // 40 + 0 + 30 = 70
            agent("slow", 80.0, 12.0, 100.0, 100.0),
            // 45 + 16 + 30 = 91
            agent("fast", 90.0, 2.0, 100.0, 100.0),
        ];

        let ranking = rank_agents(&agents);
        assert_eq!(ranking[0].agent_id, "fast");
        assert!((ranking[0].composite_score - 91.0).abs() < 1e-9);
        assert!((ranking[1].composite_score - 70.0).abs() < 1e-9);
    }

    #[test]
    fn test_statistical_summary_mean_and_median() {
        let agents = vec![
            agent("agent-1", 80.0, 2.0, 100.0, 100.0),
            agent("agent-2", 90.0, 1.0, 100.0, 100.0),
        ];

        let summary = statistical_summary(&agents);
        let accuracy = &summary["accuracy"];
        assert_eq!(accuracy.mean, 85.0);
        assert_eq!(accuracy.median, 85.0);
        assert_eq!(accuracy.std_dev, 5.0);
        assert_eq!(summary["latency_avg"].min, 1.0);
        assert_eq!(summary["latency_avg"].max, 2.0);
    }

    #[test]
    fn test_summary_skips_metrics_missing_on_some_agents() {
        let mut with_cost = agent("a", 80.0, 2.0, 100.0, 100.0);
        with_cost.metrics.extra.insert("cost_usd".to_string(), 0.5);
        let mut also_cost = agent("b", 90.0, 1.0, 100.0, 100.0);
        also_cost.metrics.extra.insert("cost_usd".to_string(), 1.5);
        also_cost.metrics.extra.insert("judge_score".to_string(), 4.0);

        let summary = statistical_summary(&[with_cost, also_cost]);
        assert_eq!(summary["cost_usd"].mean, 1.0);
        assert!(!summary.contains_key("judge_score"));
        assert_eq!(summary.len(), 6);
    }

    #[test]
    fn test_analyze_is_idempotent() {
        let agents = vec![
            agent("agent-1", 85.5, 2.3, 1200.0, 4.2),
            agent("agent-2", 92.0, 1.8, 1100.0, 4.7),
        ];

        let engine = AnalyticsEngine::new();
        assert_eq!(engine.analyze(&agents), engine.analyze(&agents));
    }

    #[test]
    fn test_empty_run() {
        let report = AnalyticsEngine::new().analyze(&[]);
        assert_eq!(report.total_agents, 0);
        assert!(report.statistical_summary.is_empty());
        assert!(report.insights.is_empty());
        assert!(report.comparative_analysis.comparison().is_none());
    }

    #[test]
    fn test_insight_messages_render_in_order() {
        let report = AnalyticsEngine::new().analyze(&[agent("a", 95.0, 3.0, 1500.0, 4.9)]);
        let messages = report.insight_messages();
        assert_eq!(messages, vec!["a demonstrates excellent precision (>=90%)".to_string()]);
    }
}
