//! Session entity
//!
//! Per-visitor state shared between the workflow steps: the auth flag, the
//! persisted simulation artefacts (original content, file name, recovered
//! content), the simulation workbench and the last threat scan.
//!
//! Simulation phases:
//! `NoFile -> FileLoaded -> Wiped -> RecoveryPending -> RecoveryComplete`.

use super::recovery_simulation::SimulateRecoveryOutput;
use super::threat_detection::ThreatDetectionOutput;
use serde::Serialize;
use thiserror::Error;

/// File name shown when the workbench is restored from persisted content
pub const RESTORED_FILE_NAME: &str = "previously loaded data";

/// Route the simulation hands off to once recovered content exists
pub const EXTRACTION_HANDOFF_ROUTE: &str = "/data-extraction?source=simulation";

/// Characters of content shown in the upload preview
pub const PREVIEW_CHARS: usize = 200;

/// Rejected simulation transitions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimulationError {
    #[error("Please upload a file first.")]
    NoFileLoaded,

    #[error("The loaded file has already been wiped. Upload a file to start again.")]
    AlreadyWiped,

    #[error("Please simulate a wipe first for a file.")]
    NothingWiped,

    #[error("A recovery attempt is already in progress.")]
    RecoveryInProgress,

    #[error("Please simulate file recovery first or ensure recovery was successful.")]
    NoRecoveredContent,
}

/// Phase of the wipe/recovery simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SimulationPhase {
    NoFile,
    FileLoaded,
    Wiped,
    RecoveryPending,
    RecoveryComplete(RecoveryStatus),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RecoveryStatus {
    Success,
    Error,
}

/// A file loaded into the workbench but not necessarily wiped yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadedFile {
    pub file_name: String,
    pub content: String,
}

impl LoadedFile {
    pub fn new(file_name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            content: content.into(),
        }
    }

    /// First [`PREVIEW_CHARS`] characters, with an ellipsis when cut
    pub fn preview(&self) -> String {
        truncate_chars(&self.content, PREVIEW_CHARS, "...")
    }
}

/// Outcome of the last recovery attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecoveryOutcome {
    Recovered(SimulateRecoveryOutput),
    Failed(String),
}

/// What a recovery attempt needs, captured when it starts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoveryTicket {
    pub original_data: String,
    pub original_file_name: Option<String>,
}

/// Page-local simulation state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimulationWorkbench {
    loaded: Option<LoadedFile>,
    wiped: bool,
    pending: bool,
    outcome: Option<RecoveryOutcome>,
}

impl SimulationWorkbench {
    pub fn loaded(&self) -> Option<&LoadedFile> {
        self.loaded.as_ref()
    }

    pub fn is_wiped(&self) -> bool {
        self.wiped
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn outcome(&self) -> Option<&RecoveryOutcome> {
        self.outcome.as_ref()
    }

    pub fn phase(&self) -> SimulationPhase {
        if self.pending {
            return SimulationPhase::RecoveryPending;
        }
        match (&self.outcome, &self.loaded, self.wiped) {
            (Some(RecoveryOutcome::Recovered(_)), _, _) => {
                SimulationPhase::RecoveryComplete(RecoveryStatus::Success)
            }
            (Some(RecoveryOutcome::Failed(_)), _, _) => {
                SimulationPhase::RecoveryComplete(RecoveryStatus::Error)
            }
            (None, Some(_), true) => SimulationPhase::Wiped,
            (None, Some(_), false) => SimulationPhase::FileLoaded,
            (None, None, _) => SimulationPhase::NoFile,
        }
    }
}

/// State held for one visitor
#[derive(Debug, Clone, Default)]
pub struct Session {
    authenticated: bool,
    original_data: Option<String>,
    original_file_name: Option<String>,
    recovered_data: Option<String>,
    last_threat_scan: Option<ThreatDetectionOutput>,
    workbench: SimulationWorkbench,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn login(&mut self) {
        self.authenticated = true;
    }

    /// Clears the auth flag only; simulation artefacts survive a logout
    pub fn logout(&mut self) {
        self.authenticated = false;
    }

    pub fn original_data(&self) -> Option<&str> {
        self.original_data.as_deref()
    }

    pub fn original_file_name(&self) -> Option<&str> {
        self.original_file_name.as_deref()
    }

    pub fn recovered_data(&self) -> Option<&str> {
        self.recovered_data.as_deref()
    }

    pub fn last_threat_scan(&self) -> Option<&ThreatDetectionOutput> {
        self.last_threat_scan.as_ref()
    }

    pub fn record_threat_scan(&mut self, result: ThreatDetectionOutput) {
        self.last_threat_scan = Some(result);
    }

    /// Returns the workbench, restoring it from persisted content first
    pub fn workbench(&mut self) -> &SimulationWorkbench {
        self.hydrate();
        &self.workbench
    }

    pub fn phase(&mut self) -> SimulationPhase {
        self.workbench().phase()
    }

    /// Loads a file into the workbench, or clears it when `None`
    ///
    /// Resets the wipe flag and any previous outcome. Persisted content is
    /// not touched until the wipe. Rejected while a recovery is pending.
    pub fn load_file(&mut self, file: Option<LoadedFile>) -> Result<(), SimulationError> {
        self.hydrate();
        if self.workbench.pending {
            return Err(SimulationError::RecoveryInProgress);
        }
        self.workbench.loaded = file;
        self.workbench.wiped = false;
        self.workbench.outcome = None;
        Ok(())
    }

    /// Persists the loaded file as the wiped original
    pub fn wipe(&mut self) -> Result<&LoadedFile, SimulationError> {
        self.hydrate();
        if self.workbench.pending {
            return Err(SimulationError::RecoveryInProgress);
        }
        if self.workbench.wiped {
            return Err(SimulationError::AlreadyWiped);
        }
        let loaded = self
            .workbench
            .loaded
            .as_ref()
            .ok_or(SimulationError::NoFileLoaded)?;

        self.original_data = Some(loaded.content.clone());
        self.original_file_name = Some(loaded.file_name.clone());
        self.recovered_data = None;
        self.workbench.wiped = true;
        self.workbench.outcome = None;

        Ok(loaded)
    }

    /// Starts a recovery attempt against the persisted original
    pub fn begin_recovery(&mut self) -> Result<RecoveryTicket, SimulationError> {
        self.hydrate();
        if self.workbench.pending {
            return Err(SimulationError::RecoveryInProgress);
        }
        self.workbench.outcome = None;

        let original_data = self
            .original_data
            .clone()
            .filter(|data| !data.is_empty())
            .ok_or(SimulationError::NothingWiped)?;

        self.workbench.pending = true;
        Ok(RecoveryTicket {
            original_data,
            original_file_name: self.original_file_name.clone(),
        })
    }

    /// Stores the result of the attempt started by [`Session::begin_recovery`]
    pub fn complete_recovery(&mut self, result: Result<SimulateRecoveryOutput, String>) {
        self.workbench.pending = false;
        match result {
            Ok(output) => {
                self.recovered_data = Some(output.recovered_file_content.clone());
                self.workbench.outcome = Some(RecoveryOutcome::Recovered(output));
            }
            Err(message) => {
                self.workbench.outcome = Some(RecoveryOutcome::Failed(message));
            }
        }
    }

    /// Returns the extraction route when recovered content exists
    pub fn proceed_to_extraction(&self) -> Result<&'static str, SimulationError> {
        match self.recovered_data.as_deref() {
            Some(data) if !data.is_empty() => Ok(EXTRACTION_HANDOFF_ROUTE),
            _ => Err(SimulationError::NoRecoveredContent),
        }
    }

    fn hydrate(&mut self) {
        if self.workbench.loaded.is_some() {
            return;
        }
        if let Some(data) = self.original_data.as_ref().filter(|d| !d.is_empty()) {
            let name = self
                .original_file_name
                .clone()
                .unwrap_or_else(|| RESTORED_FILE_NAME.to_string());
            self.workbench.loaded = Some(LoadedFile::new(name, data.clone()));
            self.workbench.wiped = true;
        }
    }
}

/// Cuts `text` to `max_chars` characters, appending `marker` when cut
pub fn truncate_chars(text: &str, max_chars: usize, marker: &str) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}{}", &text[..byte_idx], marker),
        None => text.to_string(),
    }
}
