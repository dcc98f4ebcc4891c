//! HTTP API
//!
//! One JSON endpoint per page action, all bound to a cookie session. Every
//! tool route is behind the login gate.

mod auth;
mod error;
mod extraction;
mod forms;
mod handlers;
mod navigation;
mod report;
mod session;
mod simulation;

pub use error::ApiError;
pub use forms::FormError;
pub use navigation::{
    DASHBOARD_ROUTE, LOGIN_ROUTE, NavItem, NavigationView, PageHeader, QUICK_LINKS, SIDEBAR_NAV,
    SITE_DESCRIPTION, SITE_NAME, is_active, page_header,
};
pub use session::VisitorSession;

use crate::application::{
    ActionContext, AnalyzeRecoveryPotentialUseCase, AssessWipeAccuracyUseCase,
    DetectThreatsUseCase, ExtractDataUseCase, ForensicSimulationUseCase, GenerateReportUseCase,
    SimulateRecoveryUseCase,
};
use crate::core::HubConfig;
use crate::domain::repositories::SessionStore;
use axum::routing::{get, post};
use axum::{Json, Router, middleware};
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<dyn SessionStore>,
    pub cookie_name: Arc<str>,
    pub wipe_accuracy: AssessWipeAccuracyUseCase,
    pub recovery_potential: AnalyzeRecoveryPotentialUseCase,
    pub threats: DetectThreatsUseCase,
    pub simulation: ForensicSimulationUseCase,
    pub extraction: ExtractDataUseCase,
    pub report: GenerateReportUseCase,
}

impl AppState {
    /// Wires every use case to `context`
    pub fn new(context: ActionContext, sessions: Arc<dyn SessionStore>, config: &HubConfig) -> Self {
        Self {
            sessions,
            cookie_name: Arc::from(config.session.cookie_name.as_str()),
            wipe_accuracy: AssessWipeAccuracyUseCase::new(context.clone()),
            recovery_potential: AnalyzeRecoveryPotentialUseCase::new(context.clone()),
            threats: DetectThreatsUseCase::new(context.clone()),
            simulation: ForensicSimulationUseCase::new(SimulateRecoveryUseCase::new(context)),
            extraction: ExtractDataUseCase::new(Duration::from_millis(
                config.workflow.extraction_tick_ms,
            )),
            report: GenerateReportUseCase::new(config.workflow.report_snapshot_chars),
        }
    }
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Builds the router
pub fn router(state: AppState) -> Router {
    let gated = Router::new()
        .route("/api/wipe-accuracy", post(handlers::assess_wipe_accuracy))
        .route("/api/recovery-potential", post(handlers::analyze_recovery_potential))
        .route(
            "/api/threat-detection/prefill",
            get(handlers::prefill_threat_detection),
        )
        .route("/api/threat-detection", post(handlers::detect_threats))
        .route("/api/simulation", get(simulation::view))
        .route("/api/simulation/upload", post(simulation::upload))
        .route("/api/simulation/wipe", post(simulation::wipe))
        .route("/api/simulation/recover", post(simulation::recover))
        .route("/api/simulation/proceed", post(simulation::proceed))
        .route("/api/extraction", post(extraction::extract))
        .route("/api/extraction/stream", get(extraction::extract_stream))
        .route("/api/report", get(report::download))
        .route_layer(middleware::from_fn(auth::require_auth));

    Router::new()
        .route("/api/session", get(auth::session_status))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/navigation", get(navigation::navigation))
        .merge(gated)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            session::attach_session,
        ))
        .route("/health", get(health))
        .with_state(state)
}

/// Serves the API until Ctrl-C or SIGTERM
pub async fn serve(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "listening");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "ctrl-c handler unavailable");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "SIGTERM handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
