//! Data extraction handlers

use super::AppState;
use super::session::VisitorSession;
use crate::domain::entities::{ExtractionResult, ExtractionSource};
use axum::Json;
use axum::extract::{Extension, Query, State};
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::{self, Stream, StreamExt};
use serde::Deserialize;
use serde_json::json;
use std::convert::Infallible;

#[derive(Debug, Default, Deserialize)]
pub struct ExtractionQuery {
    #[serde(default)]
    pub source: ExtractionSource,
}

/// `POST /api/extraction?source=`
pub async fn extract(
    State(state): State<AppState>,
    Extension(visitor): Extension<VisitorSession>,
    Query(query): Query<ExtractionQuery>,
) -> Json<ExtractionResult> {
    Json(state.extraction.execute(&visitor.session, query.source))
}

/// `GET /api/extraction/stream?source=`
///
/// Emits `progress` events from 0 to 100 one tick apart, then a single
/// `result` event.
pub async fn extract_stream(
    State(state): State<AppState>,
    Extension(visitor): Extension<VisitorSession>,
    Query(query): Query<ExtractionQuery>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let extraction = state.extraction.clone();
    let session = visitor.session;
    let source = query.source;

    let progress = extraction.progress().map(|percent| {
        Ok::<_, Infallible>(
            Event::default()
                .event("progress")
                .data(json!({ "percent": percent }).to_string()),
        )
    });

    let result = stream::once(async move {
        let result = extraction.execute(&session, source);
        let event = match Event::default().event("result").json_data(&result) {
            Ok(event) => event,
            Err(e) => {
                tracing::error!(error = %e, "extraction result could not be encoded");
                Event::default().event("error").data("extraction result could not be encoded")
            }
        };
        Ok::<_, Infallible>(event)
    });

    Sse::new(progress.chain(result)).keep_alive(KeepAlive::default())
}
