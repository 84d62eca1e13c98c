//! Sales Report API module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route(
        "/api/report",
        get(handler::view).delete(handler::clear),
    )
}
