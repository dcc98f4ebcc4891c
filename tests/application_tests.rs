//! Application layer tests
//!
//! Server actions and session workflows run against the canned model.

use forensics_hub::application::dto::ActionResult;
use forensics_hub::application::{
    ActionContext, ActionError, AnalyzeRecoveryPotentialUseCase, AssessWipeAccuracyUseCase,
    DetectThreatsUseCase, ExtractDataUseCase, ForensicSimulationUseCase, GenerateReportUseCase,
    SimulateRecoveryUseCase,
};
use forensics_hub::core::ModelError;
use forensics_hub::domain::entities::{
    DataUri, ExtractionSource, LoadedFile, RecoveryEffort, RecoveryPotentialInput,
    RecoveryStatus, Session, SimulateRecoveryInput, SimulateRecoveryOutput, SimulationError,
    SimulationPhase, ThreatDetectionInput, WipeAccuracyInput,
};
use forensics_hub::domain::repositories::{LanguageModel, ModelRequest, SharedSession};
use forensics_hub::domain::services::{
    MOCK_EXTRACTED_DATA, SIMULATE_RECOVERY_FLOW, THREAT_DETECTION_FLOW,
};
use forensics_hub::infrastructure::llm::CannedModel;
use async_trait::async_trait;
use futures::StreamExt;
use parking_lot::Mutex;
use rstest::*;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

const LOW_EFFORT_RECOVERY: &str = "Contacts:\n- J???: UNRECOVERABLE_SECTOR";

fn context_with(model: &Arc<CannedModel>) -> ActionContext {
    ActionContext::new(model.clone())
}

fn shared_session() -> SharedSession {
    Arc::new(Mutex::new(Session::new()))
}

fn text_upload(content: &str) -> String {
    DataUri::from_bytes("text/plain", content.as_bytes()).to_string()
}

#[fixture]
fn model() -> Arc<CannedModel> {
    Arc::new(
        CannedModel::demo().with_response(
            SIMULATE_RECOVERY_FLOW,
            json!({
                "recoveredFileContent": LOW_EFFORT_RECOVERY,
                "recoveryLog": "[INFO] 15% of sectors recovered."
            }),
        ),
    )
}

// ============================================================================
// Precondition Tests
// ============================================================================

#[rstest]
#[tokio::test]
async fn test_empty_wipe_log_never_reaches_model(model: Arc<CannedModel>) {
    let result = AssessWipeAccuracyUseCase::new(context_with(&model))
        .execute(WipeAccuracyInput::default())
        .await;

    assert_eq!(result.error(), Some("Wipe log file is required."));
    assert_eq!(model.call_count(), 0);
}

#[rstest]
#[case(RecoveryPotentialInput::default(), "Device image file is required.")]
#[case(
    RecoveryPotentialInput {
        device_image_uri: "data:image/png;base64,AA==".into(),
        ..Default::default()
    },
    "Device description is required."
)]
#[tokio::test]
async fn test_recovery_potential_preconditions(
    model: Arc<CannedModel>,
    #[case] input: RecoveryPotentialInput,
    #[case] expected: &str,
) {
    let result = AnalyzeRecoveryPotentialUseCase::new(context_with(&model))
        .execute(input)
        .await;

    assert_eq!(result.error(), Some(expected));
    assert_eq!(model.call_count(), 0);
}

#[rstest]
#[tokio::test]
async fn test_blank_extracted_data_never_reaches_model(model: Arc<CannedModel>) {
    let result = DetectThreatsUseCase::new(context_with(&model))
        .execute(ThreatDetectionInput {
            extracted_data: " \n\t".into(),
        })
        .await;

    assert_eq!(result.error(), Some("Extracted data cannot be empty."));
    assert_eq!(model.call_count(), 0);
}

#[rstest]
#[tokio::test]
async fn test_blank_original_never_reaches_model(model: Arc<CannedModel>) {
    let result = SimulateRecoveryUseCase::new(context_with(&model))
        .execute(SimulateRecoveryInput {
            original_data: "   ".into(),
            original_file_name: None,
            recovery_effort: RecoveryEffort::High,
        })
        .await;

    assert_eq!(
        result.error(),
        Some("Original file content for recovery cannot be empty.")
    );
    assert_eq!(model.call_count(), 0);
}

// ============================================================================
// Action Tests
// ============================================================================

#[rstest]
#[tokio::test]
async fn test_wipe_accuracy_returns_model_answer(model: Arc<CannedModel>) {
    let result = AssessWipeAccuracyUseCase::new(context_with(&model))
        .execute(WipeAccuracyInput {
            wipe_log_data_uri: text_upload("[WIPE] pass 1/1 complete"),
        })
        .await;

    let output = result.data().unwrap();
    assert!(output.accuracy_assessment.overall_accuracy.starts_with("Medium"));
    assert_eq!(model.call_count(), 1);
    assert_eq!(model.last_request().unwrap().media_count(), 1);
}

#[rstest]
#[tokio::test]
async fn test_model_failure_becomes_failure_result() {
    let model = Arc::new(CannedModel::new().with_failure(THREAT_DETECTION_FLOW, "quota exceeded"));
    let result = DetectThreatsUseCase::new(context_with(&model))
        .execute(ThreatDetectionInput {
            extracted_data: "Contacts:".into(),
        })
        .await;

    assert_eq!(result, ActionResult::Failure("quota exceeded".into()));
}

#[rstest]
#[tokio::test]
async fn test_unregistered_flow_is_reported() {
    let model = Arc::new(CannedModel::new());
    let result = DetectThreatsUseCase::new(context_with(&model))
        .execute(ThreatDetectionInput {
            extracted_data: "Contacts:".into(),
        })
        .await;

    assert!(result.error().unwrap().contains(THREAT_DETECTION_FLOW));
}

#[rstest]
#[tokio::test]
async fn test_threat_scan_is_kept_in_session(model: Arc<CannedModel>) {
    let session = shared_session();
    let result = DetectThreatsUseCase::new(context_with(&model))
        .execute_for_session(
            &session,
            ThreatDetectionInput {
                extracted_data: MOCK_EXTRACTED_DATA.into(),
            },
        )
        .await;

    assert!(result.is_success());
    assert_eq!(
        session.lock().last_threat_scan(),
        result.data()
    );
}

// ============================================================================
// Simulation Workflow Tests
// ============================================================================

#[fixture]
fn simulation(model: Arc<CannedModel>) -> (ForensicSimulationUseCase, Arc<CannedModel>) {
    let use_case = ForensicSimulationUseCase::new(SimulateRecoveryUseCase::new(context_with(&model)));
    (use_case, model)
}

#[rstest]
#[tokio::test]
async fn test_low_effort_recovery_uses_model_output(
    simulation: (ForensicSimulationUseCase, Arc<CannedModel>),
) {
    let (simulation, model) = simulation;
    let session = shared_session();

    simulation
        .upload(&session, &text_upload("Contacts:\n- John: 555-1234"), Some("contacts.txt"))
        .unwrap();
    simulation.wipe(&session).unwrap();
    let view = simulation.recover(&session, RecoveryEffort::Low).await.unwrap();

    assert_eq!(
        view.phase,
        SimulationPhase::RecoveryComplete(RecoveryStatus::Success)
    );
    assert_eq!(
        view.recovered.unwrap().recovered_file_content,
        LOW_EFFORT_RECOVERY
    );
    assert_eq!(session.lock().recovered_data(), Some(LOW_EFFORT_RECOVERY));
    assert_eq!(
        simulation.proceed(&session).unwrap(),
        "/data-extraction?source=simulation"
    );

    let request = model.last_request().unwrap();
    assert!(request.prompt_text().contains("Recovery effort: low"));
    assert!(request.prompt_text().contains("'contacts.txt'"));
}

#[rstest]
#[tokio::test]
async fn test_upload_then_wipe_persists_content(
    simulation: (ForensicSimulationUseCase, Arc<CannedModel>),
) {
    let (simulation, _) = simulation;
    let session = shared_session();

    let view = simulation
        .upload(&session, &text_upload("secret"), None)
        .unwrap();
    assert_eq!(view.phase, SimulationPhase::FileLoaded);
    assert_eq!(view.file_name.as_deref(), Some("uploaded file"));
    assert_eq!(session.lock().original_data(), None);

    let view = simulation.wipe(&session).unwrap();
    assert!(view.wiped);
    assert!(!view.can_proceed);
    assert_eq!(session.lock().original_data(), Some("secret"));
}

#[rstest]
#[tokio::test]
async fn test_recover_before_wipe_is_rejected(
    simulation: (ForensicSimulationUseCase, Arc<CannedModel>),
) {
    let (simulation, model) = simulation;
    let session = shared_session();

    let err = simulation
        .recover(&session, RecoveryEffort::Medium)
        .await
        .unwrap_err();
    assert!(matches!(err, ActionError::Simulation(_)));
    assert_eq!(model.call_count(), 0);
}

#[rstest]
#[tokio::test]
async fn test_failed_recovery_is_stored_not_raised() {
    let model = Arc::new(CannedModel::new().with_failure(SIMULATE_RECOVERY_FLOW, "model offline"));
    let simulation = ForensicSimulationUseCase::new(SimulateRecoveryUseCase::new(context_with(&model)));
    let session = shared_session();

    simulation.upload(&session, &text_upload("data"), Some("a.txt")).unwrap();
    simulation.wipe(&session).unwrap();
    let view = simulation.recover(&session, RecoveryEffort::High).await.unwrap();

    assert_eq!(view.phase, SimulationPhase::RecoveryComplete(RecoveryStatus::Error));
    assert_eq!(view.recovery_error.as_deref(), Some("model offline"));
    assert!(!view.recovery_pending);
    assert!(simulation.proceed(&session).is_err());
}

/// Holds every answer until released
struct GatedModel {
    release: Arc<Notify>,
    answer: serde_json::Value,
}

#[async_trait]
impl LanguageModel for GatedModel {
    fn name(&self) -> &str {
        "gated"
    }

    async fn generate(&self, _request: ModelRequest) -> Result<serde_json::Value, ModelError> {
        self.release.notified().await;
        Ok(self.answer.clone())
    }
}

#[rstest]
#[tokio::test]
async fn test_workbench_is_frozen_while_recovery_runs() {
    let release = Arc::new(Notify::new());
    let model = Arc::new(GatedModel {
        release: release.clone(),
        answer: json!({
            "recoveredFileContent": "recovered A",
            "recoveryLog": "[INFO] done"
        }),
    });
    let simulation =
        ForensicSimulationUseCase::new(SimulateRecoveryUseCase::new(ActionContext::new(model)));
    let session = shared_session();

    simulation.upload(&session, &text_upload("file A"), Some("a.txt")).unwrap();
    simulation.wipe(&session).unwrap();

    let interfere = async {
        while !session.lock().workbench().is_pending() {
            tokio::task::yield_now().await;
        }
        let upload = simulation.upload(&session, &text_upload("file B"), Some("b.txt"));
        let wipe = simulation.wipe(&session);
        release.notify_one();
        (upload, wipe)
    };
    let (recovered, (upload, wipe)) =
        tokio::join!(simulation.recover(&session, RecoveryEffort::Low), interfere);

    assert!(matches!(
        upload,
        Err(ActionError::Simulation(SimulationError::RecoveryInProgress))
    ));
    assert!(matches!(
        wipe,
        Err(ActionError::Simulation(SimulationError::RecoveryInProgress))
    ));

    let view = recovered.unwrap();
    assert_eq!(view.file_name.as_deref(), Some("a.txt"));
    assert_eq!(view.phase, SimulationPhase::RecoveryComplete(RecoveryStatus::Success));

    let mut guard = session.lock();
    assert_eq!(guard.original_data(), Some("file A"));
    assert_eq!(guard.original_file_name(), Some("a.txt"));
    assert_eq!(guard.recovered_data(), Some("recovered A"));
    assert_eq!(guard.workbench().loaded().unwrap().content, "file A");
}

#[rstest]
#[tokio::test]
async fn test_invalid_upload_is_rejected(
    simulation: (ForensicSimulationUseCase, Arc<CannedModel>),
) {
    let (simulation, _) = simulation;
    let session = shared_session();

    let err = simulation
        .upload(&session, "data:text/plain,raw", Some("a.txt"))
        .unwrap_err();
    assert!(matches!(err, ActionError::Upload(_)));
    assert_eq!(simulation.view(&session).phase, SimulationPhase::NoFile);
}

// ============================================================================
// Extraction and Report Tests
// ============================================================================

#[rstest]
#[tokio::test]
async fn test_extraction_uses_recovered_content() {
    let session = shared_session();
    {
        let mut guard = session.lock();
        guard.load_file(Some(LoadedFile::new("a.txt", "x"))).unwrap();
        guard.wipe().unwrap();
        guard.begin_recovery().unwrap();
        guard.complete_recovery(Ok(SimulateRecoveryOutput {
            recovered_file_content: "recovered text".into(),
            recovery_log: String::new(),
        }));
    }
    let extraction = ExtractDataUseCase::new(Duration::from_millis(1));

    let simulated = extraction.execute(&session, ExtractionSource::Simulation);
    assert_eq!(simulated.extracted_data, "recovered text");

    let mock = extraction.execute(&session, ExtractionSource::Mock);
    assert_eq!(mock.extracted_data, MOCK_EXTRACTED_DATA);
}

#[rstest]
#[tokio::test]
async fn test_progress_stream_reaches_100() {
    let extraction = ExtractDataUseCase::new(Duration::from_millis(1));
    let steps: Vec<u8> = extraction.progress().collect().await;
    assert_eq!(steps.first(), Some(&0));
    assert_eq!(steps.last(), Some(&100));
    assert_eq!(steps.len(), 11);
}

#[rstest]
#[tokio::test]
async fn test_progress_stream_outlives_use_case() {
    let extraction = ExtractDataUseCase::new(Duration::from_millis(1));
    let progress = extraction.progress();
    drop(extraction);

    let steps: Vec<u8> = tokio::spawn(progress.collect()).await.unwrap();
    assert_eq!(steps.last(), Some(&100));
}

#[rstest]
fn test_report_needs_threat_scan() {
    let report = GenerateReportUseCase::new(1000);
    let err = report.execute(&Session::new()).unwrap_err();
    assert!(matches!(err, ActionError::Precondition(_)));
}

#[rstest]
#[tokio::test]
async fn test_report_after_full_workflow(
    simulation: (ForensicSimulationUseCase, Arc<CannedModel>),
) {
    let (simulation, model) = simulation;
    let session = shared_session();

    simulation
        .upload(&session, &text_upload("Contacts:\n- A: 555"), Some("phone.txt"))
        .unwrap();
    simulation.wipe(&session).unwrap();
    simulation.recover(&session, RecoveryEffort::Low).await.unwrap();

    let recovered = session.lock().recovered_data().unwrap_or_default().to_string();
    DetectThreatsUseCase::new(context_with(&model))
        .execute_for_session(&session, ThreatDetectionInput { extracted_data: recovered })
        .await;

    let rendered = GenerateReportUseCase::new(1000)
        .execute(&session.lock())
        .unwrap();
    assert_eq!(rendered.file_name, "Forensic-Report-for-phone.txt");
    assert!(rendered.content.contains("Contacts:\n- A: 555"));
    assert!(rendered.content.contains(LOW_EFFORT_RECOVERY));
    assert!(rendered.content.contains("  - Threat Name: Plain-text contact exposure\n"));
}
