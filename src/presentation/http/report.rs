//! Report download handler

use super::AppState;
use super::error::ApiError;
use super::session::VisitorSession;
use axum::extract::{Extension, State};
use axum::http::HeaderValue;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};

/// `GET /api/report`
///
/// Needs a threat scan stored in the session.
pub async fn download(
    State(state): State<AppState>,
    Extension(visitor): Extension<VisitorSession>,
) -> Result<Response, ApiError> {
    let rendered = {
        let session = visitor.session.lock();
        state.report.execute(&session)
    }
    .map_err(|e| ApiError::Conflict(e.to_string()))?;

    let disposition = HeaderValue::from_str(&format!(
        "attachment; filename=\"{}\"",
        header_safe(&rendered.file_name)
    ))
    .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok((
        [
            (
                CONTENT_TYPE,
                HeaderValue::from_static("text/plain; charset=utf-8"),
            ),
            (CONTENT_DISPOSITION, disposition),
        ],
        rendered.content,
    )
        .into_response())
}

/// Replaces characters that cannot appear in a quoted header parameter
fn header_safe(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c == ' ' || c.is_ascii_graphic() => c,
            _ => '_',
        })
        .collect()
}
