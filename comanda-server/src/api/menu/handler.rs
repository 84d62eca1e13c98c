//! Menu API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};
use shared::models::menu_item::{MenuItem, MenuItemUpsert};

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub deleted: bool,
}

/// GET /api/menu - all menu items, ordered by name
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<MenuItem>>> {
    let items = state.menu_repository().find_all().await?;
    Ok(Json(items))
}

/// GET /api/menu/:name - single item, case-insensitive
pub async fn get_by_name(
    State(state): State<ServerState>,
    Path(name): Path<String>,
) -> AppResult<Json<MenuItem>> {
    let item = state
        .menu_repository()
        .find_by_name(&name)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Menu item {} not found", name)))?;
    Ok(Json(item))
}

/// PUT /api/menu - create or overwrite an item by name
pub async fn upsert(
    State(state): State<ServerState>,
    Json(payload): Json<MenuItemUpsert>,
) -> AppResult<Json<MenuItem>> {
    let item = state
        .menu_repository()
        .upsert(&payload.name, payload.unit_value)
        .await?;
    Ok(Json(item))
}

/// DELETE /api/menu/:name - remove an item
pub async fn delete(
    State(state): State<ServerState>,
    Path(name): Path<String>,
) -> AppResult<Json<DeletedResponse>> {
    let deleted = state.menu_repository().delete(&name).await?;
    if !deleted {
        return Err(AppError::not_found(format!("Menu item {} not found", name)));
    }
    Ok(Json(DeletedResponse { deleted }))
}
