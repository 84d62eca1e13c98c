//! Menu Item Model

use serde::{Deserialize, Serialize};

/// Menu item entity
///
/// Names are unique and uppercase-normalized; the store keys menu records
/// by the normalized name, so writing an existing name overwrites it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MenuItem {
    pub id: Option<String>,
    pub name: String,
    /// Price in units ("sementes")
    pub unit_value: i64,
}

/// Upsert menu item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemUpsert {
    pub name: String,
    pub unit_value: i64,
}

/// Normalize a menu item name: trimmed, uppercased.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_uppercase()
}
