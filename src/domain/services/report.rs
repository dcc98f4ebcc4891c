//! Forensic report
//!
//! Consolidated plain-text report of a simulation run and the threat scan of
//! its recovered content.

use crate::domain::entities::{ThreatDetectionOutput, truncate_chars};
use chrono::{DateTime, Local};
use sha2::{Digest, Sha256};
use std::fmt::Write as _;

/// Name used when the session has no original file name
pub const UNKNOWN_FILE_NAME: &str = "Unknown File";

/// Default number of original-content characters kept in the snapshot
pub const DEFAULT_SNAPSHOT_CHARS: usize = 1000;

const TITLE: &str = "Forensic Simulation & Threat Analysis Report";
const TITLE_RULE: &str = "============================================";
const SECTION_RULE: &str = "--------------------------------------------";
const TRUNCATION_MARKER: &str = "\n... (content truncated for report)";
const ORIGINAL_NOT_FOUND: &str = "Original file content not found in simulation storage.";
const RECOVERED_NOT_FOUND: &str =
    "Recovered file content not found in simulation storage (this should be the data analyzed).";
const NO_THREATS: &str = "  No specific threats identified in the analyzed data.";

/// Inputs of a report, borrowed from the session
#[derive(Debug, Clone)]
pub struct ForensicReport<'a> {
    pub original_file_name: Option<&'a str>,
    pub original_data: Option<&'a str>,
    pub recovered_data: Option<&'a str>,
    pub threat_scan: &'a ThreatDetectionOutput,
    pub generated_at: DateTime<Local>,
    pub snapshot_chars: usize,
}

impl<'a> ForensicReport<'a> {
    /// Creates a report stamped with the current local time
    pub fn new(threat_scan: &'a ThreatDetectionOutput) -> Self {
        Self {
            original_file_name: None,
            original_data: None,
            recovered_data: None,
            threat_scan,
            generated_at: Local::now(),
            snapshot_chars: DEFAULT_SNAPSHOT_CHARS,
        }
    }

    /// Returns the file name printed in the report
    pub fn file_name(&self) -> &str {
        self.original_file_name
            .filter(|name| !name.is_empty())
            .unwrap_or(UNKNOWN_FILE_NAME)
    }

    /// Returns the download file name
    pub fn download_name(&self) -> String {
        format!("Forensic-Report-for-{}.txt", strip_extension(self.file_name()))
    }

    /// Renders the report text
    pub fn render(&self) -> String {
        let mut out = String::new();
        let original = self.original_data.filter(|data| !data.is_empty());
        let recovered = self.recovered_data.filter(|data| !data.is_empty());

        let _ = writeln!(out, "{TITLE}");
        let _ = writeln!(out, "{TITLE_RULE}\n");
        let _ = writeln!(out, "Original File: {}", self.file_name());
        let _ = writeln!(
            out,
            "Date of Report: {}",
            self.generated_at.format("%-m/%-d/%Y, %-I:%M:%S %p")
        );
        if let Some(data) = original {
            let _ = writeln!(out, "Original Content SHA-256: {}", content_digest(data));
        }
        out.push('\n');

        section(&mut out, "1. Original File Content (Snapshot from Simulation)");
        match original {
            Some(data) => out.push_str(&truncate_chars(data, self.snapshot_chars, TRUNCATION_MARKER)),
            None => out.push_str(ORIGINAL_NOT_FOUND),
        }
        out.push_str("\n\n");

        section(&mut out, "2. Simulated Recovered File Content (Used for this Analysis)");
        out.push_str(recovered.unwrap_or(RECOVERED_NOT_FOUND));
        out.push_str("\n\n");

        section(&mut out, "3. Threat Detection Analysis");
        out.push('\n');
        let _ = write!(out, "Summary:\n{}\n\n", self.threat_scan.summary);
        out.push_str("Identified Threats:\n");
        if self.threat_scan.threats_identified.is_empty() {
            let _ = write!(out, "{NO_THREATS}\n\n");
        } else {
            for threat in &self.threat_scan.threats_identified {
                let _ = writeln!(out, "  - Threat Name: {}", threat.threat_name);
                let _ = writeln!(out, "    Severity: {}", threat.threat_level);
                let _ = write!(out, "    Description: {}\n\n", threat.description);
            }
        }

        let _ = writeln!(out, "{SECTION_RULE}");
        out.push_str("End of Report\n");
        out
    }
}

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out, "{SECTION_RULE}");
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "{SECTION_RULE}");
}

/// Hex SHA-256 of `data`
pub fn content_digest(data: &str) -> String {
    hex::encode(Sha256::digest(data.as_bytes()))
}

/// Drops the last extension: `evidence.tar.gz` becomes `evidence.tar`
///
/// A trailing dot or a dot inside a directory component is not an extension.
pub fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) => {
            let ext = &name[idx + 1..];
            if ext.is_empty() || ext.contains('/') {
                name
            } else {
                &name[..idx]
            }
        }
        None => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Threat;

    fn clean_scan() -> ThreatDetectionOutput {
        ThreatDetectionOutput {
            threats_identified: Vec::new(),
            summary: "Nothing found.".to_string(),
        }
    }

    #[test]
    fn strips_only_last_extension() {
        assert_eq!(strip_extension("evidence.tar.gz"), "evidence.tar");
        assert_eq!(strip_extension("notes"), "notes");
        assert_eq!(strip_extension("notes."), "notes.");
        assert_eq!(strip_extension("dir.d/file"), "dir.d/file");
    }

    #[test]
    fn missing_name_uses_placeholder() {
        let scan = clean_scan();
        let report = ForensicReport::new(&scan);
        assert_eq!(report.file_name(), UNKNOWN_FILE_NAME);
        assert_eq!(report.download_name(), "Forensic-Report-for-Unknown File.txt");
    }

    #[test]
    fn long_original_is_truncated() {
        let scan = clean_scan();
        let original = "x".repeat(1005);
        let report = ForensicReport {
            original_data: Some(&original),
            ..ForensicReport::new(&scan)
        };
        let text = report.render();
        assert!(text.contains(&format!("{}{}", "x".repeat(1000), TRUNCATION_MARKER)));
        assert!(!text.contains(&"x".repeat(1001)));
    }

    #[test]
    fn lists_each_threat() {
        let scan = ThreatDetectionOutput {
            threats_identified: vec![Threat {
                threat_name: "Spyware".into(),
                threat_level: "High".into(),
                description: "Keylogger found".into(),
            }],
            summary: "Compromised.".into(),
        };
        let text = ForensicReport::new(&scan).render();
        assert!(text.contains(
            "  - Threat Name: Spyware\n    Severity: High\n    Description: Keylogger found\n\n"
        ));
        assert!(!text.contains(NO_THREATS));
        assert!(text.contains(ORIGINAL_NOT_FOUND));
        assert!(text.contains(RECOVERED_NOT_FOUND));
        assert!(text.ends_with("End of Report\n"));
    }
}
