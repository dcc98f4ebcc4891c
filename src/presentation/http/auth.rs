//! Login gate
//!
//! Authentication is a flag on the session. Logging in needs an email and a
//! password but checks neither. A successful login is what makes a draft
//! session persistent.

use super::error::ApiError;
use super::forms::LoginForm;
use super::navigation::{DASHBOARD_ROUTE, LOGIN_ROUTE};
use super::session::VisitorSession;
use crate::application::dto::ActionResult;
use axum::Json;
use axum::extract::{Extension, Request};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatus {
    pub authenticated: bool,
    /// Where the visitor should be sent
    pub landing_route: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Redirect {
    pub redirect_to: &'static str,
}

/// `GET /api/session`
pub async fn session_status(Extension(visitor): Extension<VisitorSession>) -> Json<SessionStatus> {
    let authenticated = visitor.session.lock().is_authenticated();
    Json(SessionStatus {
        authenticated,
        landing_route: if authenticated { DASHBOARD_ROUTE } else { LOGIN_ROUTE },
    })
}

/// `POST /api/auth/login`
pub async fn login(
    Extension(visitor): Extension<VisitorSession>,
    Json(form): Json<LoginForm>,
) -> Json<ActionResult<Redirect>> {
    if let Err(e) = form.validate() {
        return Json(ActionResult::failure(e.to_string()));
    }
    visitor.session.lock().login();
    tracing::info!(session = %visitor.id, "logged in");
    Json(ActionResult::Success(Redirect {
        redirect_to: DASHBOARD_ROUTE,
    }))
}

/// `POST /api/auth/logout`
///
/// Simulation artefacts stay in the session.
pub async fn logout(Extension(visitor): Extension<VisitorSession>) -> Json<ActionResult<Redirect>> {
    visitor.session.lock().logout();
    tracing::info!(session = %visitor.id, "logged out");
    Json(ActionResult::Success(Redirect {
        redirect_to: LOGIN_ROUTE,
    }))
}

/// Middleware rejecting visitors that have not logged in
pub async fn require_auth(request: Request, next: Next) -> Response {
    let authenticated = request
        .extensions()
        .get::<VisitorSession>()
        .is_some_and(|visitor| visitor.session.lock().is_authenticated());

    if !authenticated {
        return ApiError::NotAuthenticated.into_response();
    }
    next.run(request).await
}
