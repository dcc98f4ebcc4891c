//! Forensic simulation handlers

use super::AppState;
use super::forms::{RecoverForm, UploadForm};
use super::session::VisitorSession;
use crate::application::ActionError;
use crate::application::dto::{ActionResult, SimulationView};
use axum::Json;
use axum::extract::{Extension, State};
use serde::Serialize;

fn respond<T>(outcome: Result<T, ActionError>) -> Json<ActionResult<T>> {
    match outcome {
        Ok(data) => Json(ActionResult::Success(data)),
        Err(e) => {
            tracing::warn!(reason = %e, "simulation step rejected");
            Json(ActionResult::failure(e.to_string()))
        }
    }
}

/// `GET /api/simulation`
pub async fn view(
    State(state): State<AppState>,
    Extension(visitor): Extension<VisitorSession>,
) -> Json<SimulationView> {
    Json(state.simulation.view(&visitor.session))
}

/// `POST /api/simulation/upload`
pub async fn upload(
    State(state): State<AppState>,
    Extension(visitor): Extension<VisitorSession>,
    Json(form): Json<UploadForm>,
) -> Json<ActionResult<SimulationView>> {
    respond(
        state
            .simulation
            .upload(&visitor.session, &form.data_uri, form.file_name.as_deref()),
    )
}

/// `POST /api/simulation/wipe`
pub async fn wipe(
    State(state): State<AppState>,
    Extension(visitor): Extension<VisitorSession>,
) -> Json<ActionResult<SimulationView>> {
    respond(state.simulation.wipe(&visitor.session))
}

/// `POST /api/simulation/recover`
pub async fn recover(
    State(state): State<AppState>,
    Extension(visitor): Extension<VisitorSession>,
    Json(form): Json<RecoverForm>,
) -> Json<ActionResult<SimulationView>> {
    respond(
        state
            .simulation
            .recover(&visitor.session, form.recovery_effort)
            .await,
    )
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Handoff {
    pub redirect_to: &'static str,
}

/// `POST /api/simulation/proceed`
pub async fn proceed(
    State(state): State<AppState>,
    Extension(visitor): Extension<VisitorSession>,
) -> Json<ActionResult<Handoff>> {
    respond(
        state
            .simulation
            .proceed(&visitor.session)
            .map(|redirect_to| Handoff { redirect_to }),
    )
}
