//! Read-only HTTP API endpoints.
//!
//! Used by dashboards and bridge clients that want the poll without a socket.

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::state::PollState;
use crate::types::{PollSnapshot, TallyEntry};

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub server_now: String,
}

/// GET /api/health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        server_now: chrono::Utc::now().to_rfc3339(),
    })
}

/// Current poll state.
///
/// GET /api/poll
pub async fn poll_snapshot(State(state): State<Arc<PollState>>) -> Json<PollSnapshot> {
    Json(state.snapshot().await)
}

/// Ranked tally, same ordering as the results command.
///
/// GET /api/results
pub async fn results(State(state): State<Arc<PollState>>) -> Json<Vec<TallyEntry>> {
    Json(state.tally().await)
}
