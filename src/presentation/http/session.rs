//! Visitor sessions
//!
//! Every request under `/api` is bound to a [`Session`] through a cookie. A
//! request without a known cookie runs against a draft session that is only
//! stored, and the cookie only set, once the request has logged it in.
//! Anonymous traffic never grows the store.

use super::AppState;
use crate::domain::entities::Session;
use crate::domain::repositories::{SessionId, SharedSession};
use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::http::header::{COOKIE, HeaderValue, SET_COOKIE};
use axum::middleware::Next;
use axum::response::Response;
use parking_lot::Mutex;
use std::sync::Arc;

/// The session bound to the current request
#[derive(Clone)]
pub struct VisitorSession {
    pub id: SessionId,
    pub session: SharedSession,
}

/// Finds cookie `name` in the request headers
pub fn read_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim())
}

/// `Set-Cookie` value for a session
pub fn session_cookie(name: &str, id: &SessionId) -> String {
    format!("{name}={id}; Path=/; HttpOnly; SameSite=Lax")
}

/// Middleware binding a session to the request
pub async fn attach_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let known = read_cookie(request.headers(), &state.cookie_name)
        .and_then(|value| value.parse::<SessionId>().ok());
    let stored = known.and_then(|id| state.sessions.get(&id).map(|session| (id, session)));
    let draft = stored.is_none();
    let (id, session) = stored
        .unwrap_or_else(|| (SessionId::generate(), Arc::new(Mutex::new(Session::new()))));

    request.extensions_mut().insert(VisitorSession {
        id,
        session: Arc::clone(&session),
    });
    let mut response = next.run(request).await;

    if draft && session.lock().is_authenticated() {
        state.sessions.insert(id, session);
        match HeaderValue::from_str(&session_cookie(&state.cookie_name, &id)) {
            Ok(value) => {
                response.headers_mut().append(SET_COOKIE, value);
            }
            Err(e) => tracing::warn!(error = %e, "session cookie could not be encoded"),
        }
    }
    response
}
