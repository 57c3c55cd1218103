//! @ai:module:intent JSON persistence of benchmark reports
//! @ai:module:layer infrastructure
//! @ai:module:public_api JsonReportWriter
//! @ai:module:stateless true

use crate::error::Result;
use crate::pipeline::BenchmarkReport;
use crate::report::ReportSink;
use std::path::{Path, PathBuf};

pub const REPORT_FILE: &str = "report.json";

/// @ai:intent Writes each report to `<results_dir>/<run_id>/report.json`
pub struct JsonReportWriter {
    results_dir: PathBuf,
}

impl JsonReportWriter {
    /// @ai:effects pure
    pub fn new(results_dir: impl Into<PathBuf>) -> Self {
        Self {
            results_dir: results_dir.into(),
        }
    }

    /// @ai:effects pure
    pub fn report_path(&self, run_id: &str) -> PathBuf {
        self.results_dir.join(run_id).join(REPORT_FILE)
    }

    /// @ai:intent Read a previously persisted report
    /// @ai:effects fs:read
    pub fn load(path: &Path) -> Result<BenchmarkReport> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

impl ReportSink for JsonReportWriter {
    /// @ai:intent Write the report as pretty JSON, creating the run directory
    /// @ai:effects fs:write
    fn persist(&self, report: &BenchmarkReport) -> Result<PathBuf> {
        let path = self.report_path(&report.run_id);
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }

        let json = serde_json::to_string_pretty(report)?;
        std::fs::write(&path, json)?;

        tracing::info!("Report written to {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::QuestionItem;
    use crate::metrics::{AgentResponse, QuestionResult, TokenUsage};
    use crate::pipeline::Pipeline;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    async fn sample_report() -> BenchmarkReport {
        let questions = vec![
            QuestionItem::new("q1", "2+2?", "4").with_category("mathematics"),
            QuestionItem::new("q2", "Capital of France?", "Paris").with_category("geography"),
        ];
        let results = vec![
            QuestionResult {
                question_id: "q1".to_string(),
                responses: vec![
                    AgentResponse::answered("agent-a", "4", TokenUsage::new(10, 2), 1.2, true),
                    AgentResponse::answered("agent-b", "5", TokenUsage::new(10, 40), 3.4, false),
                    AgentResponse::failed("agent-c", "timed out after 30s"),
                ],
            },
            QuestionResult {
                question_id: "q2".to_string(),
                responses: vec![
                    AgentResponse::answered("agent-a", "Paris", TokenUsage::new(12, 3), 0.9, true),
                    AgentResponse::answered("agent-b", "Paris", TokenUsage::new(12, 50), 2.8, true),
                    AgentResponse::answered("agent-c", "Lyon", TokenUsage::new(12, 4), 7.5, false),
                ],
            },
        ];

        Pipeline::default().reduce("basic", &questions, &results).await.unwrap()
    }

    #[tokio::test]
    async fn test_persist_and_load_round_trip() {
        let temp = TempDir::new().unwrap();
        let writer = JsonReportWriter::new(temp.path());
        let report = sample_report().await;

        let path = writer.persist(&report).unwrap();
        assert_eq!(path, temp.path().join(&report.run_id).join("report.json"));

        let loaded = JsonReportWriter::load(&path).unwrap();
        assert_eq!(loaded.run_id, report.run_id);
        assert_eq!(loaded.summary, report.summary);
        assert_eq!(loaded.agents.len(), 3);
        assert_eq!(loaded.agents[0].category_scores, report.agents[0].category_scores);
        assert_eq!(loaded.analysis.insights, report.analysis.insights);
        assert_eq!(loaded.deductions.recommendations, report.deductions.recommendations);
    }

    #[tokio::test]
    async fn test_report_json_shape() {
        let temp = TempDir::new().unwrap();
        let report = sample_report().await;
        let path = JsonReportWriter::new(temp.path()).persist(&report).unwrap();

        let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(json["benchmark"], "basic");
        assert_eq!(json["agents"][0]["id"], "agent-a");
        assert_eq!(json["agents"][0]["metrics"]["accuracy"], 100.0);
        assert_eq!(json["summary"]["top_performer"], "agent-a");
        assert!(json["analysis"]["statistical_summary"]["accuracy"].is_object());
        assert_eq!(json["deductions"]["correlation_analysis"]["status"], "computed");
    }

    #[test]
    fn test_load_missing_report_fails() {
        assert!(JsonReportWriter::load(Path::new("/nonexistent/report.json")).is_err());
    }
}
