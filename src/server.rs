use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{api, state::PollState, ws};

/// All routes of the gateway
pub fn router(state: Arc<PollState>) -> Router {
    let api_routes = Router::new()
        .route("/api/health", get(api::health))
        .route("/api/poll", get(api::poll_snapshot))
        .route("/api/results", get(api::results));

    Router::new()
        .route("/ws", get(ws::ws_handler))
        .merge(api_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
