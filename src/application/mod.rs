//! Application layer
//!
//! Server actions that validate their preconditions and run a flow, plus the
//! session-backed workflows (simulation, extraction, report) built on them.

pub mod dto;
mod analyze_recovery_potential;
mod assess_wipe_accuracy;
mod context;
mod detect_threats;
mod error;
mod extract_data;
mod forensic_simulation;
mod generate_report;
mod simulate_recovery;

pub use analyze_recovery_potential::AnalyzeRecoveryPotentialUseCase;
pub use assess_wipe_accuracy::AssessWipeAccuracyUseCase;
pub use context::ActionContext;
pub use detect_threats::DetectThreatsUseCase;
pub use error::ActionError;
pub use extract_data::ExtractDataUseCase;
pub use forensic_simulation::ForensicSimulationUseCase;
pub use generate_report::{GenerateReportUseCase, RenderedReport};
pub use simulate_recovery::SimulateRecoveryUseCase;
