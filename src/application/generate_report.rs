//! Generate report use case

use super::error::ActionError;
use crate::domain::entities::Session;
use crate::domain::services::ForensicReport;

/// A rendered report ready for download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedReport {
    pub file_name: String,
    pub content: String,
}

/// Builds the consolidated simulation and threat report
#[derive(Debug, Clone)]
pub struct GenerateReportUseCase {
    snapshot_chars: usize,
}

impl GenerateReportUseCase {
    pub fn new(snapshot_chars: usize) -> Self {
        Self { snapshot_chars }
    }

    /// Renders the report for a session
    ///
    /// Requires a stored threat scan.
    pub fn execute(&self, session: &Session) -> Result<RenderedReport, ActionError> {
        let scan = session.last_threat_scan().ok_or_else(|| {
            ActionError::precondition("Run a threat scan before downloading the report.")
        })?;

        let report = ForensicReport {
            original_file_name: session.original_file_name(),
            original_data: session.original_data(),
            recovered_data: session.recovered_data(),
            snapshot_chars: self.snapshot_chars,
            ..ForensicReport::new(scan)
        };
        let rendered = RenderedReport {
            file_name: report.download_name(),
            content: report.render(),
        };
        tracing::info!(file = %rendered.file_name, "report generated");
        Ok(rendered)
    }
}
