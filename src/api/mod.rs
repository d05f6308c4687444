//! REST API for scenario results.
//!
//! Provides two GET endpoints:
//! - `/summary` — scenario config and headline figures
//! - `/cashflow` — year-by-year cashflow with optional range filtering

mod handlers;
mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;

use crate::config::ScenarioConfig;
use crate::model::finance::YearCashflow;
use crate::projection::Summary;

/// Immutable application state shared across all request handlers.
///
/// Built once from a finished projection; everything is read-only, so
/// handlers share it through `Arc` without locks.
pub struct AppState {
    /// Scenario configuration used for this projection.
    pub scenario: ScenarioConfig,
    /// Headline figures for the configured variant.
    pub summary: Summary,
    /// Year-by-year cashflow for the configured variant.
    pub cashflow: Vec<YearCashflow>,
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/summary", get(handlers::get_summary))
        .route("/cashflow", get(handlers::get_cashflow))
        .with_state(state)
}

/// Binds to the given address and serves the API.
///
/// # Panics
///
/// Panics if the TCP listener cannot bind to `addr`.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind to {addr}: {e}"));
    eprintln!("API server listening on http://{addr}");
    axum::serve(listener, app)
        .await
        .unwrap_or_else(|e| panic!("server error: {e}"));
}
