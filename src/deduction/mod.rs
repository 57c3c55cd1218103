//! @ai:module:intent Clustering, behavioral profiles, correlations, anomalies and recommendations
//! @ai:module:layer application
//! @ai:module:public_api DeductionEngine, Deductions, PerformancePatterns, Recommendation, AnomalyRecord
//! @ai:module:stateless true

pub mod anomaly;
pub mod behavior;
pub mod clustering;
pub mod correlation;
pub mod recommendations;

pub use anomaly::{detect_anomalies, AnomalyKind, AnomalyMetric, AnomalyRecord};
pub use behavior::{analyze_behavior, BehavioralProfile, PerformanceProfile, ScoreConsistency};
pub use clustering::{feature_vector, standardize, ClusteringError, KMeans, KMeansFit};
pub use correlation::{
    analyze_correlations, CorrelationAnalysis, CorrelationStrength, MetricCorrelation, MetricPair,
    PairCorrelation,
};
pub use recommendations::{generate_recommendations, Recommendation};

use crate::metrics::{AgentRecord, InsufficientData};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

const MIN_AGENTS_FOR_CLUSTERING: usize = 2;

/// @ai:intent Agent groups found by k-means over standardized features
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PerformancePatterns {
    InsufficientData(InsufficientData),
    Clustered {
        n_clusters: usize,
        /// Member agent ids per cluster id, in input order
        clusters: Vec<Vec<String>>,
        assignments: BTreeMap<String, usize>,
        /// Centers in standardized feature space
        centers: Vec<Vec<f64>>,
    },
    Error {
        message: String,
    },
}

/// @ai:intent Complete deduction output for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deductions {
    pub performance_patterns: PerformancePatterns,
    pub behavioral_insights: BTreeMap<String, BehavioralProfile>,
    pub correlation_analysis: CorrelationAnalysis,
    pub anomaly_detection: Vec<AnomalyRecord>,
    pub recommendations: BTreeSet<Recommendation>,
}

impl Deductions {
    pub fn recommendation_messages(&self) -> Vec<String> {
        self.recommendations.iter().map(ToString::to_string).collect()
    }
}

/// @ai:intent Deduction engine; configuration only, no state across calls
#[derive(Debug, Clone, PartialEq)]
pub struct DeductionEngine {
    pub seed: u64,
    pub max_clusters: usize,
    /// Width of the anomaly band in standard deviations
    pub sigma: f64,
}

impl Default for DeductionEngine {
    fn default() -> Self {
        Self {
            seed: 42,
            max_clusters: 3,
            sigma: 2.0,
        }
    }
}

impl DeductionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// @ai:intent Run every deduction stage over the same agent records
    /// @ai:post stage-local problems appear as markers; identical input yields identical output
    /// @ai:effects pure
    pub fn deduce(&self, agents: &[AgentRecord]) -> Deductions {
        let deductions = Deductions {
            performance_patterns: self.identify_patterns(agents),
            behavioral_insights: analyze_behavior(agents),
            correlation_analysis: analyze_correlations(agents),
            anomaly_detection: detect_anomalies(agents, self.sigma),
            recommendations: generate_recommendations(agents),
        };

        tracing::debug!(
            "Deduction found {} anomalies and {} recommendations",
            deductions.anomaly_detection.len(),
            deductions.recommendations.len()
        );
        deductions
    }

    /// @ai:intent Cluster agents into min(max_clusters, n) groups
    /// @ai:effects pure
    pub fn identify_patterns(&self, agents: &[AgentRecord]) -> PerformancePatterns {
        if let Some(marker) = InsufficientData::check(MIN_AGENTS_FOR_CLUSTERING, agents.len()) {
            return PerformancePatterns::InsufficientData(marker);
        }

        let features: Vec<Vec<f64>> = agents.iter().map(feature_vector).collect();
        let k = self.max_clusters.min(agents.len());

        match KMeans::new(k, self.seed).fit(&standardize(&features)) {
            Ok(fit) => {
                let mut clusters: Vec<Vec<String>> = vec![Vec::new(); fit.centers.len()];
                let mut assignments = BTreeMap::new();
                for (agent, &label) in agents.iter().zip(&fit.labels) {
                    clusters[label].push(agent.id.clone());
                    assignments.insert(agent.id.clone(), label);
                }

                PerformancePatterns::Clustered {
                    n_clusters: k,
                    clusters,
                    assignments,
                    centers: fit.centers,
                }
            }
            Err(e) => {
                tracing::warn!("Clustering failed: {}", e);
                PerformancePatterns::Error {
                    message: e.to_string(),
                }
            }
        }
    }
}
