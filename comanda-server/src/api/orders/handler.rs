//! Orders API Handlers
//!
//! Totals are always recomputed server-side from the current catalog;
//! a client-sent total is never trusted.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};
use shared::draft::compute_total;
use shared::models::order::{Order, OrderCreate, OrderEdit, OrderStatus};

/// Query params for listing orders
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Filter by status; omitted = full history, newest first
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AdvanceRequest {
    /// Target status; must be the immediate successor of the current one
    pub to: String,
}

#[derive(Debug, Serialize)]
pub struct NextNumberResponse {
    pub number: i64,
}

#[derive(Debug, Serialize)]
pub struct ClearedResponse {
    pub deleted: usize,
}

fn parse_status(s: &str) -> AppResult<OrderStatus> {
    s.parse::<OrderStatus>()
        .map_err(|e| AppError::validation(e.to_string()))
}

/// GET /api/orders?status=X - list orders
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Order>>> {
    let repo = state.order_repository();
    let orders = match query.status.as_deref() {
        Some(status) => repo.find_by_status(parse_status(status)?).await?,
        None => repo.find_all().await?,
    };
    Ok(Json(orders))
}

/// GET /api/orders/next-number - preview the next sequential number
pub async fn next_number(
    State(state): State<ServerState>,
) -> AppResult<Json<NextNumberResponse>> {
    let number = state.order_repository().next_number().await?;
    Ok(Json(NextNumberResponse { number }))
}

/// GET /api/orders/:id - single order
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let order = state
        .order_repository()
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {} not found", id)))?;
    Ok(Json(order))
}

/// GET /api/orders/number/:number - not-yet-delivered order by number
pub async fn get_by_number(
    State(state): State<ServerState>,
    Path(number): Path<i64>,
) -> AppResult<Json<Order>> {
    let order = state
        .order_repository()
        .find_by_number(number)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order number {} not found", number)))?;
    Ok(Json(order))
}

/// POST /api/orders - create a new order
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<OrderCreate>,
) -> AppResult<Json<Order>> {
    let catalog = state.menu_repository().find_all().await?;
    let total_units = compute_total(&payload.line_items, &catalog);

    let order = state.order_repository().create(payload, total_units).await?;
    tracing::info!(number = order.number, total_units, "Order created");
    Ok(Json(order))
}

/// PUT /api/orders/:id - edit line items / customer name
pub async fn edit(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<OrderEdit>,
) -> AppResult<Json<Order>> {
    let catalog = state.menu_repository().find_all().await?;
    let total_units = compute_total(&payload.line_items, &catalog);

    let order = state
        .order_repository()
        .edit(&id, payload, total_units)
        .await?;
    Ok(Json(order))
}

/// POST /api/orders/:id/advance - move to the next workflow status
pub async fn advance(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<AdvanceRequest>,
) -> AppResult<Json<Order>> {
    let to = parse_status(&payload.to)?;
    let order = state.order_repository().advance_status(&id, to).await?;
    tracing::info!(number = order.number, status = %order.status, "Order advanced");
    Ok(Json(order))
}

/// DELETE /api/orders/:id - delete and reverse its report contribution
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ClearedResponse>> {
    state.order_repository().delete(&id).await?;
    Ok(Json(ClearedResponse { deleted: 1 }))
}

/// DELETE /api/orders - bulk reset, leaves the sales report alone
pub async fn clear_all(State(state): State<ServerState>) -> AppResult<Json<ClearedResponse>> {
    let deleted = state.order_repository().clear_all().await?;
    Ok(Json(ClearedResponse { deleted }))
}
