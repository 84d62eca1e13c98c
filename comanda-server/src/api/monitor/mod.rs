//! Monitor API module
//!
//! Read-only kitchen/customer views: one-shot snapshots and SSE feeds.

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/monitor", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/{status}", get(handler::snapshot))
        .route("/{status}/feed", get(handler::feed))
}
