//! @ai:module:intent Per-agent behavioral profile from category scores
//! @ai:module:layer domain
//! @ai:module:public_api BehavioralProfile, ScoreConsistency, PerformanceProfile, analyze_behavior, profile_performance
//! @ai:module:stateless true

use crate::metrics::stats::{mean, std_dev};
use crate::metrics::{AgentRecord, AggregateMetrics, CategoryScores};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Distance from the category mean that marks a strength or weakness.
const CATEGORY_MARGIN: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreConsistency {
    High,
    Medium,
    Low,
}

impl ScoreConsistency {
    /// @ai:intent Bucket the spread of category scores
    /// @ai:example (4.9) -> High
    /// @ai:example (10.0) -> Low
    /// @ai:effects pure
    pub fn from_std_dev(std_dev: f64) -> Self {
        if std_dev < 5.0 {
            ScoreConsistency::High
        } else if std_dev < 10.0 {
            ScoreConsistency::Medium
        } else {
            ScoreConsistency::Low
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PerformanceProfile {
    #[serde(rename = "High Performance")]
    HighPerformance,
    #[serde(rename = "Balanced Performance")]
    BalancedPerformance,
    #[serde(rename = "Needs Improvement")]
    NeedsImprovement,
}

impl std::fmt::Display for PerformanceProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            PerformanceProfile::HighPerformance => "High Performance",
            PerformanceProfile::BalancedPerformance => "Balanced Performance",
            PerformanceProfile::NeedsImprovement => "Needs Improvement",
        };
        write!(f, "{label}")
    }
}

/// @ai:intent Behavioral summary of one agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BehavioralProfile {
    pub score_consistency: ScoreConsistency,
    pub category_strengths: Vec<String>,
    pub category_weaknesses: Vec<String>,
    pub overall_performance_profile: PerformanceProfile,
}

/// @ai:intent Classify overall performance from accuracy, latency and consistency
/// @ai:effects pure
pub fn profile_performance(metrics: &AggregateMetrics) -> PerformanceProfile {
    let (accuracy, latency, consistency) =
        (metrics.accuracy_pct, metrics.latency_avg, metrics.consistency);

    if accuracy >= 85.0 && latency <= 3.0 && consistency >= 4.0 {
        PerformanceProfile::HighPerformance
    } else if accuracy >= 75.0 && latency <= 5.0 && consistency >= 3.0 {
        PerformanceProfile::BalancedPerformance
    } else {
        PerformanceProfile::NeedsImprovement
    }
}

/// @ai:intent Profile every agent that carries non-empty category scores
/// @ai:effects pure
pub fn analyze_behavior(agents: &[AgentRecord]) -> BTreeMap<String, BehavioralProfile> {
    agents
        .iter()
        .filter_map(|agent| {
            let scores = agent.category_scores.as_ref().filter(|s| !s.is_empty())?;
            Some((agent.id.clone(), build_profile(&agent.metrics, scores)))
        })
        .collect()
}

fn build_profile(metrics: &AggregateMetrics, scores: &CategoryScores) -> BehavioralProfile {
    let values: Vec<f64> = scores.values().copied().collect();
    let category_mean = mean(&values);

    let strengths = scores
        .iter()
        .filter(|&(_, &s)| s > category_mean + CATEGORY_MARGIN)
        .map(|(c, _)| c.clone())
        .collect();
    let weaknesses = scores
        .iter()
        .filter(|&(_, &s)| s < category_mean - CATEGORY_MARGIN)
        .map(|(c, _)| c.clone())
        .collect();

    BehavioralProfile {
        score_consistency: ScoreConsistency::from_std_dev(std_dev(&values)),
        category_strengths: strengths,
        category_weaknesses: weaknesses,
        overall_performance_profile: profile_performance(metrics),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(accuracy: f64, latency: f64, consistency: f64) -> AggregateMetrics {
        AggregateMetrics {
            accuracy_pct: accuracy,
            latency_avg: latency,
            consistency,
            ..Default::default()
        }
    }

    fn scores(pairs: &[(&str, f64)]) -> CategoryScores {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_profile_thresholds() {
        assert_eq!(profile_performance(&metrics(88.0, 2.1, 4.3)), PerformanceProfile::HighPerformance);
        assert_eq!(profile_performance(&metrics(80.0, 4.0, 3.5)), PerformanceProfile::BalancedPerformance);
        assert_eq!(profile_performance(&metrics(65.0, 6.0, 3.0)), PerformanceProfile::NeedsImprovement);
    }

    #[test]
    fn test_strengths_and_weaknesses() {
        let agent = AgentRecord::new("test-agent", metrics(88.0, 2.1, 4.3)).with_category_scores(scores(&[
            ("language", 70.0),
            ("logical_reasoning", 84.0),
            ("mathematics", 98.0),
        ]));

        let profiles = analyze_behavior(&[agent]);
        let profile = &profiles["test-agent"];

        // mean 84, std ~11.43
        assert_eq!(profile.score_consistency, ScoreConsistency::Low);
        assert_eq!(profile.category_strengths, vec!["mathematics"]);
        assert_eq!(profile.category_weaknesses, vec!["language"]);
        assert_eq!(profile.overall_performance_profile, PerformanceProfile::HighPerformance);
    }

    #[test]
    fn test_tight_scores_are_highly_consistent() {
        let agent = AgentRecord::new("steady", metrics(88.0, 2.1, 4.3))
            .with_category_scores(scores(&[("mathematics", 92.0), ("logical_reasoning", 84.0), ("language", 85.0)]));

        let profiles = analyze_behavior(&[agent]);
        let profile = &profiles["steady"];
        assert_eq!(profile.score_consistency, ScoreConsistency::High);
        assert!(profile.category_weaknesses.is_empty());
    }

    #[test]
    fn test_agents_without_categories_are_skipped() {
        let bare = AgentRecord::new("bare", metrics(90.0, 1.0, 100.0));
        let empty = AgentRecord::new("empty", metrics(90.0, 1.0, 100.0)).with_category_scores(CategoryScores::new());

        assert!(analyze_behavior(&[bare, empty]).is_empty());
    }

    #[test]
    fn test_profile_serializes_with_label() {
        let json = serde_json::to_string(&PerformanceProfile::NeedsImprovement).unwrap();
        assert_eq!(json, "\"Needs Improvement\"");
    }
}
