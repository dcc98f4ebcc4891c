//! Forensic simulation use case
//!
//! Drives the upload, wipe, recover and proceed steps against a visitor's
//! session. The session lock is only taken between awaits; the model call of
//! a recovery runs on its own task so that a dropped request still stores
//! its outcome.

use super::dto::SimulationView;
use super::error::ActionError;
use super::simulate_recovery::SimulateRecoveryUseCase;
use crate::domain::entities::{
    DataUri, LoadedFile, RecoveryEffort, SimulateRecoveryInput,
};
use crate::domain::repositories::SharedSession;
use std::sync::Arc;

/// File name used when an upload arrives without one
const UNNAMED_UPLOAD: &str = "uploaded file";

/// Wipe/recovery simulation workflow
#[derive(Clone)]
pub struct ForensicSimulationUseCase {
    simulate: SimulateRecoveryUseCase,
}

impl ForensicSimulationUseCase {
    pub fn new(simulate: SimulateRecoveryUseCase) -> Self {
        Self { simulate }
    }

    /// Returns the current view of the simulation
    pub fn view(&self, session: &SharedSession) -> SimulationView {
        SimulationView::capture(&mut session.lock())
    }

    /// Loads an uploaded file into the workbench
    ///
    /// An empty data URI deselects the current file.
    pub fn upload(
        &self,
        session: &SharedSession,
        data_uri: &str,
        file_name: Option<&str>,
    ) -> Result<SimulationView, ActionError> {
        let file = if data_uri.trim().is_empty() {
            None
        } else {
            let uri: DataUri = data_uri.parse()?;
            let name = file_name
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .unwrap_or(UNNAMED_UPLOAD);
            Some(LoadedFile::new(name, uri.decode_text()?))
        };

        let mut guard = session.lock();
        guard.load_file(file)?;
        match guard.workbench().loaded() {
            Some(loaded) => tracing::info!(
                file = %loaded.file_name,
                chars = loaded.content.chars().count(),
                "file loaded for simulation"
            ),
            None => tracing::info!("simulation file cleared"),
        }
        Ok(SimulationView::capture(&mut guard))
    }

    /// Simulates wiping the loaded file
    pub fn wipe(&self, session: &SharedSession) -> Result<SimulationView, ActionError> {
        let mut guard = session.lock();
        let file_name = guard.wipe()?.file_name.clone();
        tracing::info!(file = %file_name, "wipe simulated");
        Ok(SimulationView::capture(&mut guard))
    }

    /// Attempts to recover the wiped file
    ///
    /// Rejected transitions are errors. A failed model call is not: it is
    /// stored as the recovery outcome and shows up in the returned view.
    pub async fn recover(
        &self,
        session: &SharedSession,
        effort: RecoveryEffort,
    ) -> Result<SimulationView, ActionError> {
        let ticket = session.lock().begin_recovery()?;
        tracing::info!(
            file = ticket.original_file_name.as_deref().unwrap_or("unknown"),
            %effort,
            "recovery started"
        );

        let input = SimulateRecoveryInput {
            original_data: ticket.original_data,
            original_file_name: ticket.original_file_name,
            recovery_effort: effort,
        };
        let simulate = self.simulate.clone();
        let task_session = Arc::clone(session);

        let task = tokio::spawn(async move {
            let outcome = simulate.execute(input).await.into_result();
            let mut guard = task_session.lock();
            guard.complete_recovery(outcome);
            SimulationView::capture(&mut guard)
        });

        match task.await {
            Ok(view) => Ok(view),
            Err(e) => {
                session
                    .lock()
                    .complete_recovery(Err("Recovery was interrupted.".to_string()));
                Err(ActionError::Task(e.to_string()))
            }
        }
    }

    /// Returns the extraction route once recovered content exists
    pub fn proceed(&self, session: &SharedSession) -> Result<&'static str, ActionError> {
        let route = session.lock().proceed_to_extraction()?;
        Ok(route)
    }
}
