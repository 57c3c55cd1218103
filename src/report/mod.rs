//! @ai:module:intent Persistence and console rendering of benchmark reports
//! @ai:module:layer infrastructure
//! @ai:module:public_api ReportSink, JsonReportWriter, ReportSummary

pub mod json_report;
pub mod summary;

pub use json_report::JsonReportWriter;
pub use summary::ReportSummary;

use crate::error::Result;
use crate::pipeline::BenchmarkReport;
use std::path::PathBuf;

/// @ai:intent Destination for finished reports
pub trait ReportSink: Send + Sync {
    /// @ai:intent Store the report and return where it went
    fn persist(&self, report: &BenchmarkReport) -> Result<PathBuf>;
}
