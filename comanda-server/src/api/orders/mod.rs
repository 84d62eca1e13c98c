//! Orders API module

mod handler;

use axum::{Router, routing::get, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route(
            "/",
            get(handler::list)
                .post(handler::create)
                .delete(handler::clear_all),
        )
        .route("/next-number", get(handler::next_number))
        .route("/number/{number}", get(handler::get_by_number))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::edit)
                .delete(handler::delete),
        )
        .route("/{id}/advance", post(handler::advance))
}
