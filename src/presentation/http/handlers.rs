//! Analysis form handlers
//!
//! Each handler checks its form, runs the action and answers with the
//! action's result. Failures of any kind are reported in the body.

use super::AppState;
use super::forms::{RecoveryPotentialForm, ThreatDetectionForm, WipeAccuracyForm};
use super::session::VisitorSession;
use crate::application::dto::ActionResult;
use crate::domain::entities::{
    RecoveryPotentialOutput, SeverityBadge, ThreatDetectionOutput, WipeAccuracyOutput,
};
use crate::domain::services::{EXTRACTED_DATA_PARAM, decode_component};
use axum::Json;
use axum::extract::{Extension, RawQuery, State};
use serde::Serialize;

/// `POST /api/wipe-accuracy`
pub async fn assess_wipe_accuracy(
    State(state): State<AppState>,
    Json(form): Json<WipeAccuracyForm>,
) -> Json<ActionResult<WipeAccuracyOutput>> {
    let input = match form.validate() {
        Ok(input) => input,
        Err(e) => return Json(ActionResult::failure(e.to_string())),
    };
    Json(state.wipe_accuracy.execute(input).await)
}

/// `POST /api/recovery-potential`
pub async fn analyze_recovery_potential(
    State(state): State<AppState>,
    Json(form): Json<RecoveryPotentialForm>,
) -> Json<ActionResult<RecoveryPotentialOutput>> {
    let input = match form.validate() {
        Ok(input) => input,
        Err(e) => return Json(ActionResult::failure(e.to_string())),
    };
    Json(state.recovery_potential.execute(input).await)
}

/// A threat scan with a badge per threat
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreatScanView {
    #[serde(flatten)]
    pub scan: ThreatDetectionOutput,
    pub badges: Vec<SeverityBadge>,
}

impl From<ThreatDetectionOutput> for ThreatScanView {
    fn from(scan: ThreatDetectionOutput) -> Self {
        let badges = scan
            .threats_identified
            .iter()
            .map(|threat| threat.severity_badge())
            .collect();
        Self { scan, badges }
    }
}

/// `POST /api/threat-detection`
///
/// A successful scan is kept in the session for the report.
pub async fn detect_threats(
    State(state): State<AppState>,
    Extension(visitor): Extension<VisitorSession>,
    Json(form): Json<ThreatDetectionForm>,
) -> Json<ActionResult<ThreatScanView>> {
    let input = match form.validate() {
        Ok(input) => input,
        Err(e) => return Json(ActionResult::failure(e.to_string())),
    };
    let result = state
        .threats
        .execute_for_session(&visitor.session, input)
        .await;
    Json(result.map(ThreatScanView::from))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Prefill {
    pub extracted_data: String,
}

/// `GET /api/threat-detection/prefill?extractedData=`
///
/// The parameter is decoded once from the raw query. An absent parameter
/// yields an empty prefill.
pub async fn prefill_threat_detection(RawQuery(query): RawQuery) -> Json<ActionResult<Prefill>> {
    let raw = query.as_deref().and_then(|query| {
        query
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == EXTRACTED_DATA_PARAM)
            .map(|(_, value)| value.to_string())
    });

    let Some(raw) = raw else {
        return Json(ActionResult::Success(Prefill {
            extracted_data: String::new(),
        }));
    };

    match decode_component(&raw) {
        Ok(extracted_data) => Json(ActionResult::Success(Prefill { extracted_data })),
        Err(e) => {
            tracing::warn!(error = %e, "prefill could not be decoded");
            Json(ActionResult::failure("Failed to load pre-filled data."))
        }
    }
}
