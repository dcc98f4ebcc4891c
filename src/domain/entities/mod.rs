//! Domain entities
//!
//! Flow contracts (inputs and outputs exchanged with the language model),
//! uploaded data URIs and the per-visitor session.

mod data_uri;
mod extraction;
mod recovery_potential;
mod recovery_simulation;
mod session;
mod threat_detection;
mod wipe_accuracy;

pub use data_uri::{DataUri, guess_mime_type};
pub use extraction::{ExtractionResult, ExtractionSource, progress_steps};
pub use recovery_potential::{RecoveryPotentialInput, RecoveryPotentialOutput};
pub use recovery_simulation::{RecoveryEffort, SimulateRecoveryInput, SimulateRecoveryOutput};
pub use session::{
    EXTRACTION_HANDOFF_ROUTE, LoadedFile, PREVIEW_CHARS, RESTORED_FILE_NAME, RecoveryOutcome,
    RecoveryStatus, RecoveryTicket, Session, SimulationError, SimulationPhase,
    SimulationWorkbench, truncate_chars,
};
pub use threat_detection::{SeverityBadge, Threat, ThreatDetectionInput, ThreatDetectionOutput};
pub use wipe_accuracy::{AccuracyAssessment, WipeAccuracyInput, WipeAccuracyOutput};
