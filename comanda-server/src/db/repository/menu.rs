//! Menu Repository
//!
//! Menu items are keyed by their uppercase-normalized name, so a write to
//! an existing name overwrites it instead of duplicating.

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult};
use shared::models::menu_item::{MenuItem, normalize_name};

const MENU_FIELDS: &str = "<string>id AS id, name, unit_value";

/// Default menu seeded on first run, price in units ("sementes")
const DEFAULT_MENU: [(&str, i64); 6] = [
    ("CARNE DE SOL+QUEIJO", 2),
    ("2 QUEIJOS", 2),
    ("FRANGO", 2),
    ("FRANGO+QUEIJO", 2),
    ("CHOCOLATE", 2),
    ("CARNE MOIDA", 2),
];

#[derive(Clone)]
pub struct MenuRepository {
    base: BaseRepository,
}

impl MenuRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Create or overwrite the item with this (normalized) name.
    pub async fn upsert(&self, name: &str, unit_value: i64) -> RepoResult<MenuItem> {
        let key = normalize_name(name);
        if key.is_empty() {
            return Err(RepoError::Validation(
                "Menu item name must not be empty".to_string(),
            ));
        }
        if unit_value < 1 {
            return Err(RepoError::Validation(format!(
                "Menu item value must be positive, got {}",
                unit_value
            )));
        }

        let mut result = self
            .base
            .db()
            .query(format!(
                r#"
                LET $written = UPSERT type::thing('menu_item', $key) SET
                    name = $key,
                    unit_value = $value;
                SELECT {MENU_FIELDS} FROM $written;
            "#
            ))
            .bind(("key", key))
            .bind(("value", unit_value))
            .await?;

        let items: Vec<MenuItem> = result.take(0)?;
        items
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::Database("Failed to upsert menu item".to_string()))
    }

    /// All menu items, ordered by name.
    pub async fn find_all(&self) -> RepoResult<Vec<MenuItem>> {
        let mut result = self
            .base
            .db()
            .query(format!(
                "SELECT {MENU_FIELDS} FROM menu_item ORDER BY name ASC"
            ))
            .await?;

        let items: Vec<MenuItem> = result.take(0)?;
        Ok(items)
    }

    /// Lookup by name, case-insensitive via normalization.
    pub async fn find_by_name(&self, name: &str) -> RepoResult<Option<MenuItem>> {
        let key = normalize_name(name);
        let mut result = self
            .base
            .db()
            .query(format!(
                "SELECT {MENU_FIELDS} FROM type::thing('menu_item', $key)"
            ))
            .bind(("key", key))
            .await?;

        let items: Vec<MenuItem> = result.take(0)?;
        Ok(items.into_iter().next())
    }

    /// Delete by name; returns false when no such item existed.
    pub async fn delete(&self, name: &str) -> RepoResult<bool> {
        let key = normalize_name(name);
        let mut result = self
            .base
            .db()
            .query(format!(
                r#"
                LET $gone = (DELETE type::thing('menu_item', $key) RETURN BEFORE);
                SELECT {MENU_FIELDS} FROM $gone;
            "#
            ))
            .bind(("key", key))
            .await?;

        let gone: Vec<MenuItem> = result.take(0)?;
        Ok(!gone.is_empty())
    }

    /// Seed the default menu. Only writes when the table is empty, so it is
    /// safe to call on every startup.
    pub async fn seed_defaults(&self) -> RepoResult<()> {
        if !self.find_all().await?.is_empty() {
            return Ok(());
        }

        for (name, unit_value) in DEFAULT_MENU {
            self.upsert(name, unit_value).await?;
        }
        tracing::info!(items = DEFAULT_MENU.len(), "Seeded default menu");
        Ok(())
    }
}
