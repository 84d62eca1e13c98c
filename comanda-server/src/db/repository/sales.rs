//! Sales Repository
//!
//! Cumulative per-item counters and the orders-served scalar. Counters
//! are one record per menu-item name, so every adjustment is a single
//! keyed UPSERT; batches run inside one `BEGIN/COMMIT` block.

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoResult};
use shared::models::order::OrderLineItem;
use shared::models::sales::SalesCounter;

#[derive(Clone)]
pub struct SalesRepository {
    base: BaseRepository,
}

impl SalesRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Fold a batch of line items into the per-item counters, atomically
    /// across the whole batch.
    ///
    /// Order creation folds its items inside its own transaction; this
    /// standalone entry point exists for aggregate repairs and tests.
    pub async fn record_sale(&self, line_items: &[OrderLineItem]) -> RepoResult<()> {
        if line_items.is_empty() {
            return Ok(());
        }

        self.base
            .db()
            .query(
                r#"
                BEGIN TRANSACTION;
                FOR $item IN $line_items {
                    UPSERT type::thing('sales_counter', $item.name) SET
                        name = $item.name,
                        units_sold = math::max([(units_sold OR 0) + $item.quantity, 0]);
                };
                COMMIT TRANSACTION;
            "#,
            )
            .bind(("line_items", line_items.to_vec()))
            .await?
            .check()?;

        Ok(())
    }

    /// All per-item counters, including zeroed ones.
    pub async fn per_item_counts(&self) -> RepoResult<Vec<SalesCounter>> {
        let mut result = self
            .base
            .db()
            .query("SELECT name, units_sold FROM sales_counter ORDER BY name ASC")
            .await?;

        let counters: Vec<SalesCounter> = result.take(0)?;
        Ok(counters)
    }

    /// Current orders-served count, 0 when the counter was never written.
    pub async fn orders_served(&self) -> RepoResult<i64> {
        let mut result = self
            .base
            .db()
            .query("SELECT VALUE orders_served FROM counters:global")
            .await?;

        let counts: Vec<i64> = result.take(0)?;
        Ok(counts.into_iter().next().unwrap_or(0))
    }

    pub async fn increment_orders_served(&self) -> RepoResult<i64> {
        self.adjust_orders_served(1).await
    }

    /// Decrement, floored at 0.
    pub async fn decrement_orders_served(&self) -> RepoResult<i64> {
        self.adjust_orders_served(-1).await
    }

    async fn adjust_orders_served(&self, delta: i64) -> RepoResult<i64> {
        let mut result = self
            .base
            .db()
            .query(
                r#"
                LET $updated = UPSERT counters:global SET
                    orders_served = math::max([(orders_served OR 0) + $delta, 0]);
                SELECT VALUE orders_served FROM $updated;
            "#,
            )
            .bind(("delta", delta))
            .await?;

        let counts: Vec<i64> = result.take(0)?;
        Ok(counts.into_iter().next().unwrap_or(0))
    }

    /// Reset the per-item counters. The orders-served count is a separate
    /// concern and survives.
    pub async fn clear_report(&self) -> RepoResult<()> {
        self.base.db().query("DELETE sales_counter").await?.check()?;
        tracing::info!("Cleared sales report counters");
        Ok(())
    }
}
