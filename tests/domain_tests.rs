//! Domain layer unit tests
//!
//! Tests for entities, the session state machine, flows and domain services.

use forensics_hub::core::{FlowError, TemplateError};
use forensics_hub::domain::entities::{
    DataUri, ExtractionSource, LoadedFile, RecoveryEffort, RecoveryOutcome, RecoveryStatus,
    Session, SeverityBadge, SimulateRecoveryInput, SimulateRecoveryOutput, SimulationError,
    SimulationPhase, Threat, ThreatDetectionOutput, WipeAccuracyInput, progress_steps,
};
use forensics_hub::domain::repositories::PromptPart;
use forensics_hub::domain::services::{
    FlowCatalog, ForensicReport, MOCK_EXTRACTED_DATA, UNKNOWN_FILE_NAME, content_digest,
    decode_component, encode_component, extract, strip_extension, threat_detection_link,
};
use proptest::prelude::*;
use rstest::*;
use serde_json::json;

// ============================================================================
// Session Tests
// ============================================================================

#[fixture]
fn loaded_session() -> Session {
    let mut session = Session::new();
    session.load_file(Some(LoadedFile::new("notes.txt", "Contacts:\n- A: 555"))).unwrap();
    session
}

fn recovered(content: &str) -> SimulateRecoveryOutput {
    SimulateRecoveryOutput {
        recovered_file_content: content.to_string(),
        recovery_log: "[INFO] done".to_string(),
    }
}

#[rstest]
fn test_new_session_has_no_file() {
    let mut session = Session::new();
    assert!(!session.is_authenticated());
    assert_eq!(session.phase(), SimulationPhase::NoFile);
}

#[rstest]
fn test_login_and_logout_keep_artefacts(mut loaded_session: Session) {
    loaded_session.login();
    loaded_session.wipe().unwrap();
    loaded_session.logout();

    assert!(!loaded_session.is_authenticated());
    assert_eq!(loaded_session.original_data(), Some("Contacts:\n- A: 555"));
}

#[rstest]
fn test_wipe_persists_original_and_clears_recovered(mut loaded_session: Session) {
    loaded_session.wipe().unwrap();
    loaded_session.begin_recovery().unwrap();
    loaded_session.complete_recovery(Ok(recovered("partial")));
    assert_eq!(loaded_session.recovered_data(), Some("partial"));

    loaded_session.load_file(Some(LoadedFile::new("other.log", "second file"))).unwrap();
    loaded_session.wipe().unwrap();

    assert_eq!(loaded_session.original_data(), Some("second file"));
    assert_eq!(loaded_session.original_file_name(), Some("other.log"));
    assert_eq!(loaded_session.recovered_data(), None);
    assert_eq!(loaded_session.phase(), SimulationPhase::Wiped);
}

#[rstest]
fn test_wipe_requires_a_file() {
    let mut session = Session::new();
    let err = session.wipe().unwrap_err();
    assert_eq!(err, SimulationError::NoFileLoaded);
    assert_eq!(err.to_string(), "Please upload a file first.");
}

#[rstest]
fn test_wipe_twice_is_rejected(mut loaded_session: Session) {
    loaded_session.wipe().unwrap();
    assert_eq!(loaded_session.wipe().unwrap_err(), SimulationError::AlreadyWiped);
}

#[rstest]
fn test_recovery_requires_wipe(mut loaded_session: Session) {
    let err = loaded_session.begin_recovery().unwrap_err();
    assert_eq!(err.to_string(), "Please simulate a wipe first for a file.");
}

#[rstest]
fn test_one_recovery_in_flight(mut loaded_session: Session) {
    loaded_session.wipe().unwrap();
    let ticket = loaded_session.begin_recovery().unwrap();
    assert_eq!(ticket.original_data, "Contacts:\n- A: 555");
    assert_eq!(ticket.original_file_name.as_deref(), Some("notes.txt"));
    assert_eq!(loaded_session.phase(), SimulationPhase::RecoveryPending);

    assert_eq!(
        loaded_session.begin_recovery().unwrap_err(),
        SimulationError::RecoveryInProgress
    );
}

#[rstest]
#[case::upload_new_file(Some(LoadedFile::new("b.txt", "file B")))]
#[case::clear_file(None)]
fn test_load_is_rejected_while_recovery_pending(
    mut loaded_session: Session,
    #[case] file: Option<LoadedFile>,
) {
    loaded_session.wipe().unwrap();
    loaded_session.begin_recovery().unwrap();

    assert_eq!(
        loaded_session.load_file(file).unwrap_err(),
        SimulationError::RecoveryInProgress
    );
    assert_eq!(loaded_session.phase(), SimulationPhase::RecoveryPending);
    assert_eq!(loaded_session.workbench().loaded().unwrap().file_name, "notes.txt");
}

#[rstest]
fn test_wipe_is_rejected_while_recovery_pending(mut loaded_session: Session) {
    loaded_session.wipe().unwrap();
    loaded_session.begin_recovery().unwrap();

    assert_eq!(loaded_session.wipe().unwrap_err(), SimulationError::RecoveryInProgress);

    loaded_session.complete_recovery(Ok(recovered("partial")));
    assert_eq!(loaded_session.original_data(), Some("Contacts:\n- A: 555"));
    assert_eq!(loaded_session.recovered_data(), Some("partial"));
}

#[rstest]
fn test_load_is_allowed_after_recovery_completes(mut loaded_session: Session) {
    loaded_session.wipe().unwrap();
    loaded_session.begin_recovery().unwrap();
    loaded_session.complete_recovery(Err("model offline".to_string()));

    loaded_session.load_file(Some(LoadedFile::new("b.txt", "file B"))).unwrap();
    assert_eq!(loaded_session.phase(), SimulationPhase::FileLoaded);
}

#[rstest]
fn test_successful_recovery_enables_proceed(mut loaded_session: Session) {
    loaded_session.wipe().unwrap();
    assert_eq!(
        loaded_session.proceed_to_extraction().unwrap_err().to_string(),
        "Please simulate file recovery first or ensure recovery was successful."
    );

    loaded_session.begin_recovery().unwrap();
    loaded_session.complete_recovery(Ok(recovered("Contacts:\n- A: [REDACTED]")));

    assert_eq!(loaded_session.recovered_data(), Some("Contacts:\n- A: [REDACTED]"));
    assert_eq!(
        loaded_session.phase(),
        SimulationPhase::RecoveryComplete(RecoveryStatus::Success)
    );
    assert_eq!(
        loaded_session.proceed_to_extraction().unwrap(),
        "/data-extraction?source=simulation"
    );
}

#[rstest]
fn test_failed_recovery_keeps_error(mut loaded_session: Session) {
    loaded_session.wipe().unwrap();
    loaded_session.begin_recovery().unwrap();
    loaded_session.complete_recovery(Err("model offline".to_string()));

    assert_eq!(
        loaded_session.workbench().outcome(),
        Some(&RecoveryOutcome::Failed("model offline".to_string()))
    );
    assert_eq!(loaded_session.recovered_data(), None);
    assert!(loaded_session.proceed_to_extraction().is_err());
}

#[rstest]
fn test_workbench_restores_from_persisted_content(mut loaded_session: Session) {
    loaded_session.wipe().unwrap();
    loaded_session.load_file(None).unwrap();

    let workbench = loaded_session.workbench();
    let file = workbench.loaded().unwrap();
    assert_eq!(file.file_name, "notes.txt");
    assert!(workbench.is_wiped());
}

#[rstest]
fn test_preview_is_cut_at_200_chars() {
    let file = LoadedFile::new("big.txt", "é".repeat(250));
    let preview = file.preview();
    assert_eq!(preview.chars().count(), 203);
    assert!(preview.ends_with("..."));
}

// ============================================================================
// Threat Tests
// ============================================================================

#[rstest]
#[case("High", SeverityBadge::Destructive)]
#[case("medium", SeverityBadge::Secondary)]
#[case(" LOW ", SeverityBadge::Default)]
#[case("Critical", SeverityBadge::Outline)]
fn test_severity_badge(#[case] level: &str, #[case] expected: SeverityBadge) {
    let threat = Threat {
        threat_name: "x".into(),
        threat_level: level.into(),
        description: "y".into(),
    };
    assert_eq!(threat.severity_badge(), expected);
}

#[rstest]
fn test_missing_threat_list_decodes_as_clean() {
    let output: ThreatDetectionOutput =
        serde_json::from_value(json!({ "summary": "fine" })).unwrap();
    assert!(output.is_clean());
}

// ============================================================================
// RecoveryEffort Tests
// ============================================================================

#[rstest]
#[case("low", RecoveryEffort::Low)]
#[case("Medium", RecoveryEffort::Medium)]
#[case(" HIGH ", RecoveryEffort::High)]
fn test_effort_parsing(#[case] text: &str, #[case] expected: RecoveryEffort) {
    assert_eq!(text.parse::<RecoveryEffort>().unwrap(), expected);
}

#[rstest]
fn test_effort_ranges_increase() {
    let ranges: Vec<_> = RecoveryEffort::ALL.iter().map(|e| e.target_percent()).collect();
    assert!(ranges.windows(2).all(|w| w[0].end() < w[1].start()));
    assert!("maximum".parse::<RecoveryEffort>().is_err());
}

// ============================================================================
// Flow Tests
// ============================================================================

#[fixture]
fn catalog() -> FlowCatalog {
    FlowCatalog::standard()
}

#[rstest]
fn test_flow_names(catalog: FlowCatalog) {
    assert_eq!(
        catalog.names(),
        [
            "wipeAccuracyAssessmentFlow",
            "recoveryPotentialAnalysisFlow",
            "threatDetectionFlow",
            "simulateFileRecoveryFlow",
        ]
    );
}

#[rstest]
fn test_wipe_log_is_sent_as_media(catalog: FlowCatalog) {
    let uri = DataUri::for_file("wipe.log", b"pass 1 complete");
    let request = catalog
        .wipe_accuracy
        .build_request(&WipeAccuracyInput {
            wipe_log_data_uri: uri.to_string(),
        })
        .unwrap();

    assert_eq!(request.flow, "wipeAccuracyAssessmentFlow");
    assert_eq!(request.media_count(), 1);
    assert!(request.parts.contains(&PromptPart::Media {
        mime_type: "text/plain".into(),
        data: uri.payload().to_string(),
    }));
    assert_eq!(request.output_schema["required"][0], "accuracyAssessment");
}

#[rstest]
fn test_invalid_wipe_log_is_a_template_error(catalog: FlowCatalog) {
    let err = catalog
        .wipe_accuracy
        .build_request(&WipeAccuracyInput {
            wipe_log_data_uri: "not a uri".into(),
        })
        .unwrap_err();
    assert!(matches!(
        err,
        FlowError::Template(TemplateError::InvalidMedia { .. })
    ));
}

#[rstest]
#[case(Some("notes.txt"), "'notes.txt'")]
#[case(None, "'unknown file'")]
fn test_simulation_prompt_names_file(
    catalog: FlowCatalog,
    #[case] name: Option<&str>,
    #[case] expected: &str,
) {
    let input = SimulateRecoveryInput {
        original_data: "<contacts> & calls".into(),
        original_file_name: name.map(str::to_string),
        recovery_effort: RecoveryEffort::Low,
    };
    let prompt = catalog
        .simulate_recovery
        .build_request(&input)
        .unwrap()
        .prompt_text();

    assert!(prompt.contains(expected));
    assert!(prompt.contains("<contacts> & calls"));
    assert!(prompt.contains("Recovery effort: low"));
}

#[rstest]
fn test_malformed_answer_is_rejected(catalog: FlowCatalog) {
    let err = catalog
        .threat_detection
        .decode(json!({ "threatsIdentified": [] }))
        .unwrap_err();
    assert!(matches!(err, FlowError::MalformedOutput { .. }));
}

// ============================================================================
// Extraction Tests
// ============================================================================

#[rstest]
fn test_progress_steps() {
    let steps: Vec<u8> = progress_steps().collect();
    assert_eq!(steps, vec![0, 10, 20, 30, 40, 50, 60, 70, 80, 90, 100]);
}

#[rstest]
fn test_mock_extraction_link_round_trips() {
    let result = extract(ExtractionSource::Mock, None);
    let encoded = result
        .threat_detection_link
        .strip_prefix("/threat-detection?extractedData=")
        .unwrap();
    assert_eq!(decode_component(encoded).unwrap(), MOCK_EXTRACTED_DATA);
}

// ============================================================================
// Report Tests
// ============================================================================

#[rstest]
fn test_report_with_no_threats() {
    let scan = ThreatDetectionOutput {
        threats_identified: Vec::new(),
        summary: "No threats.".into(),
    };
    let report = ForensicReport {
        original_file_name: Some("contacts.txt"),
        original_data: Some("Contacts:\n- A: 555"),
        recovered_data: Some("Contacts:\n- A: [REDACTED]"),
        ..ForensicReport::new(&scan)
    };
    let text = report.render();

    assert!(text.starts_with(
        "Forensic Simulation & Threat Analysis Report\n============================================\n\n"
    ));
    assert!(text.contains("Original File: contacts.txt\n"));
    assert!(text.contains("Contacts:\n- A: 555"));
    assert!(text.contains("Contacts:\n- A: [REDACTED]"));
    assert!(text.contains("No specific threats identified"));
    assert!(text.contains(&format!(
        "Original Content SHA-256: {}",
        content_digest("Contacts:\n- A: 555")
    )));
    assert!(text.contains("Summary:\nNo threats.\n\nIdentified Threats:\n"));
    assert_eq!(report.download_name(), "Forensic-Report-for-contacts.txt");
}

#[rstest]
#[case("contacts.txt", "contacts")]
#[case("archive.tar.gz", "archive.tar")]
#[case(UNKNOWN_FILE_NAME, UNKNOWN_FILE_NAME)]
fn test_strip_extension(#[case] name: &str, #[case] expected: &str) {
    assert_eq!(strip_extension(name), expected);
}

// ============================================================================
// Threat Link Tests
// ============================================================================

#[rstest]
fn test_link_escapes_reserved_characters() {
    assert_eq!(
        threat_detection_link("a&b=c d"),
        "/threat-detection?extractedData=a%26b%3Dc%20d"
    );
}

proptest! {
    #[test]
    fn prop_printable_ascii_round_trips(text in "[ -~]*") {
        let encoded = encode_component(&text);
        prop_assert_eq!(decode_component(&encoded).unwrap(), text);
    }

    #[test]
    fn prop_unicode_round_trips(text in any::<String>()) {
        let encoded = encode_component(&text);
        prop_assert!(encoded.is_ascii());
        prop_assert!(!encoded.contains(['&', '=', '+', '#', '?', ' ']));
        prop_assert_eq!(decode_component(&encoded).unwrap(), text);
    }
}
