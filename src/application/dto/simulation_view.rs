//! Simulation view DTO

use crate::domain::entities::{
    RecoveryOutcome, Session, SimulateRecoveryOutput, SimulationPhase,
};
use serde::Serialize;

/// What the simulation page shows for a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationView {
    pub phase: SimulationPhase,
    pub file_name: Option<String>,
    /// Start of the loaded content
    pub preview: Option<String>,
    pub wiped: bool,
    pub recovery_pending: bool,
    pub recovered: Option<SimulateRecoveryOutput>,
    pub recovery_error: Option<String>,
    /// Whether recovered content exists for the extraction handoff
    pub can_proceed: bool,
}

impl SimulationView {
    /// Snapshots the session, restoring the workbench when needed
    pub fn capture(session: &mut Session) -> Self {
        let can_proceed = session.proceed_to_extraction().is_ok();
        let workbench = session.workbench();

        let (recovered, recovery_error) = match workbench.outcome() {
            Some(RecoveryOutcome::Recovered(output)) => (Some(output.clone()), None),
            Some(RecoveryOutcome::Failed(message)) => (None, Some(message.clone())),
            None => (None, None),
        };

        Self {
            phase: workbench.phase(),
            file_name: workbench.loaded().map(|file| file.file_name.clone()),
            preview: workbench.loaded().map(|file| file.preview()),
            wiped: workbench.is_wiped(),
            recovery_pending: workbench.is_pending(),
            recovered,
            recovery_error,
            can_proceed,
        }
    }
}
