//! Sales Report API Handlers

use axum::{Json, extract::State};
use serde::Serialize;

use crate::core::ServerState;
use crate::utils::AppResult;
use shared::models::sales::{SalesReportView, build_report_view};

#[derive(Debug, Serialize)]
pub struct ClearedResponse {
    pub cleared: bool,
}

/// GET /api/report - per-item sales totals plus the orders-served count
pub async fn view(State(state): State<ServerState>) -> AppResult<Json<SalesReportView>> {
    let sales = state.sales_repository();
    let counters = sales.per_item_counts().await?;
    let orders_served = sales.orders_served().await?;
    let catalog = state.menu_repository().find_all().await?;

    Ok(Json(build_report_view(&counters, &catalog, orders_served)))
}

/// DELETE /api/report - reset per-item counters; orders served survives
pub async fn clear(State(state): State<ServerState>) -> AppResult<Json<ClearedResponse>> {
    state.sales_repository().clear_report().await?;
    Ok(Json(ClearedResponse { cleared: true }))
}
