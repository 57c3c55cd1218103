//! @ai:module:intent Plain-text console summary of a benchmark report
//! @ai:module:layer infrastructure
//! @ai:module:public_api ReportSummary
//! @ai:module:stateless true

use crate::analytics::ComparativeAnalysis;
use crate::deduction::{AnomalyKind, CorrelationAnalysis, PairCorrelation, PerformancePatterns};
use crate::pipeline::BenchmarkReport;
use std::fmt;

/// @ai:intent Display adapter that renders a report as aligned console tables
pub struct ReportSummary<'a>(pub &'a BenchmarkReport);

impl ReportSummary<'_> {
    fn agent_table(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        let width = report
            .agents
            .iter()
            .map(|a| a.id.len())
            .max()
            .unwrap_or(0)
            .max("Agent".len());

        writeln!(
            f,
            "{:<width$}  {:>9}  {:>9}  {:>9}  {:>7}  {:>11}",
            "Agent", "Accuracy", "Latency", "Tokens", "Errors", "Consistency"
        )?;
        writeln!(f, "{}", "-".repeat(width + 57))?;

        for agent in &report.agents {
            let m = &agent.metrics;
            writeln!(
                f,
                "{:<width$}  {:>8.1}%  {:>8.2}s  {:>9.1}  {:>6.1}%  {:>11.1}",
                agent.id, m.accuracy_pct, m.latency_avg, m.tokens_avg, m.error_rate_pct, m.consistency
            )?;
        }
        Ok(())
    }

    fn ranking(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0.analysis.comparative_analysis {
            ComparativeAnalysis::InsufficientData(marker) => writeln!(f, "Ranking: {marker}"),
            ComparativeAnalysis::Available(comparison) => {
                writeln!(f, "Ranking:")?;
                for (i, ranked) in comparison.ranking.iter().enumerate() {
                    writeln!(f, "  {}. {} ({:.1})", i + 1, ranked.agent_id, ranked.composite_score)?;
                }
                Ok(())
            }
        }
    }

    fn deductions(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let deductions = &self.0.deductions;

        match &deductions.performance_patterns {
            PerformancePatterns::InsufficientData(marker) => writeln!(f, "Clusters: {marker}")?,
            PerformancePatterns::Error { message } => writeln!(f, "Clusters: failed ({message})")?,
            PerformancePatterns::Clustered { clusters, .. } => {
                writeln!(f, "Clusters:")?;
                for (id, members) in clusters.iter().enumerate().filter(|(_, m)| !m.is_empty()) {
                    writeln!(f, "  {}: {}", id, members.join(", "))?;
                }
            }
        }

        match &deductions.correlation_analysis {
            CorrelationAnalysis::InsufficientData(marker) => writeln!(f, "Correlations: {marker}")?,
            CorrelationAnalysis::Computed { correlations } => {
                writeln!(f, "Correlations:")?;
                for c in correlations {
                    match &c.result {
                        PairCorrelation::Computed { coefficient, strength } => writeln!(
                            f,
                            "  {}: {:+.2} ({:?})",
                            c.pair.label(),
                            coefficient,
                            strength
                        )?,
                        PairCorrelation::Undefined { reason } => {
                            writeln!(f, "  {}: undefined ({})", c.pair.label(), reason)?
                        }
                    }
                }
            }
        }

        for anomaly in &deductions.anomaly_detection {
            let direction = match anomaly.kind {
                AnomalyKind::LowOutlier => "low",
                AnomalyKind::HighOutlier => "high",
            };
            writeln!(
                f,
                "Anomaly: {} has unusually {} {:?} ({:.2} vs mean {:.2})",
                anomaly.agent_id, direction, anomaly.metric, anomaly.value, anomaly.mean
            )?;
        }

        Ok(())
    }
}

impl fmt::Display for ReportSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;

        writeln!(f, "Benchmark: {} (run {})", report.benchmark, report.run_id)?;
        writeln!(f, "Date: {}", report.timestamp)?;
        writeln!(
            f,
            "Questions: {}  Agents: {}  Failed queries: {}",
            report.summary.question_count, report.summary.agent_count, report.summary.failed_queries
        )?;
        writeln!(
            f,
            "Top performer: {}",
            report.summary.top_performer.as_deref().unwrap_or("none")
        )?;
        writeln!(f)?;

        self.agent_table(f)?;
        writeln!(f)?;
        self.ranking(f)?;
        writeln!(f)?;

        if !report.analysis.insights.is_empty() {
            writeln!(f, "Insights:")?;
            for insight in &report.analysis.insights {
                writeln!(f, "  - {insight}")?;
            }
            writeln!(f)?;
        }

        self.deductions(f)?;
        writeln!(f)?;

        writeln!(f, "Recommendations:")?;
        for recommendation in &report.deductions.recommendations {
            writeln!(f, "  - {recommendation}")?;
        }
        Ok(())
    }
}
