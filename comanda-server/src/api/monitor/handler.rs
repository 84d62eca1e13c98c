//! Monitor API Handlers
//!
//! The SSE feed pushes the full sorted snapshot for one status on every
//! change — consumers re-render from scratch, no diffing. Dropping the
//! connection drops the watch receiver, which is the unsubscribe.

use std::convert::Infallible;

use axum::{
    Json,
    extract::{Path, State},
    response::sse::{Event, KeepAlive, Sse},
};
use futures::stream::{self, Stream};

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};
use shared::models::order::{Order, OrderStatus};

fn parse_status(s: &str) -> AppResult<OrderStatus> {
    s.parse::<OrderStatus>()
        .map_err(|e| AppError::validation(e.to_string()))
}

/// GET /api/monitor/:status - current snapshot, oldest first
pub async fn snapshot(
    State(state): State<ServerState>,
    Path(status): Path<String>,
) -> AppResult<Json<Vec<Order>>> {
    let status = parse_status(&status)?;
    let orders = state.feeds.snapshot(status).await?;
    Ok(Json(orders))
}

/// GET /api/monitor/:status/feed - SSE stream of full snapshots
pub async fn feed(
    State(state): State<ServerState>,
    Path(status): Path<String>,
) -> AppResult<Sse<impl Stream<Item = Result<Event, Infallible>>>> {
    let status = parse_status(&status)?;
    let rx = state.feeds.subscribe(status).await?;

    // Emit the current snapshot immediately, then one event per change;
    // the stream ends when the feed service goes away.
    let stream = stream::unfold(Some(rx), |rx| async move {
        let mut rx = rx?;
        let orders = rx.borrow_and_update().clone();
        let event = Event::default().json_data(&orders).ok()?;
        let next = match rx.changed().await {
            Ok(()) => Some(rx),
            Err(_) => None,
        };
        Some((Ok::<_, Infallible>(event), next))
    });

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}
