//! Order Repository
//!
//! Owns order numbering and status progression. Creation, edit and
//! deletion fold their sales-counter adjustments into the same
//! `BEGIN/COMMIT` block that mutates the order, so a lost update cannot
//! split an order from its aggregate contribution. Status advancement is
//! a compare-and-set against the stored status.

use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult};
use shared::draft::merge_line_items;
use shared::models::order::{Order, OrderCreate, OrderEdit, OrderLineItem, OrderStatus, StatusFlow};
use shared::util::now_millis;

const ORDER_FIELDS: &str = "<string>id AS id, number, customer_name, line_items, status, \
     created_at, served_at, ready_at, total_units";

fn parse_order_id(id: &str) -> RepoResult<RecordId> {
    let record_id: RecordId = id
        .parse()
        .map_err(|_| RepoError::Validation(format!("Invalid order ID format: {}", id)))?;
    if record_id.table() != "order" {
        return Err(RepoError::Validation(format!("Not an order ID: {}", id)));
    }
    Ok(record_id)
}

fn validate_line_items(line_items: &[OrderLineItem]) -> RepoResult<()> {
    if line_items.is_empty() {
        return Err(RepoError::Validation(
            "Order must contain at least one line item".to_string(),
        ));
    }
    for item in line_items {
        if item.name.trim().is_empty() {
            return Err(RepoError::Validation(
                "Line item name must not be empty".to_string(),
            ));
        }
        if item.quantity < 1 {
            return Err(RepoError::Validation(format!(
                "Line item quantity must be at least 1, got {} for {}",
                item.quantity, item.name
            )));
        }
    }
    Ok(())
}

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
    flow: StatusFlow,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>, flow: StatusFlow) -> Self {
        Self {
            base: BaseRepository::new(db),
            flow,
        }
    }

    /// Next sequential number: max existing + 1, or 1 when no orders exist.
    ///
    /// Read-only preview for the UI. The authoritative assignment happens
    /// inside [`create`](Self::create)'s transaction, so two clients
    /// previewing the same number cannot both persist it.
    pub async fn next_number(&self) -> RepoResult<i64> {
        // ORDER BY + LIMIT over an indexed field misbehaves in the embedded
        // SDK; the table stays small, so take the max client-side.
        let mut result = self
            .base
            .db()
            .query("SELECT VALUE number FROM order")
            .await?;

        let numbers: Vec<i64> = result.take(0)?;
        Ok(numbers.into_iter().max().unwrap_or(0) + 1)
    }

    /// Persist a new order with status OPEN and the next sequential number.
    ///
    /// One transaction assigns the number, creates the order, folds the
    /// line items into the sales counters and bumps the orders-served
    /// count — the aggregate increments fire exactly once per creation,
    /// never on later edits.
    pub async fn create(&self, data: OrderCreate, total_units: i64) -> RepoResult<Order> {
        validate_line_items(&data.line_items)?;
        let line_items = merge_line_items(data.line_items);

        let mut result = self
            .base
            .db()
            .query(format!(
                r#"
                BEGIN TRANSACTION;
                LET $next = (math::max((SELECT VALUE number FROM order)) OR 0) + 1;
                LET $created = CREATE order CONTENT {{
                    number: $next,
                    customer_name: $customer_name,
                    line_items: $line_items,
                    status: 'OPEN',
                    created_at: $now,
                    served_at: NONE,
                    ready_at: NONE,
                    total_units: $total_units
                }};
                SELECT {ORDER_FIELDS} FROM $created;
                FOR $item IN $line_items {{
                    UPSERT type::thing('sales_counter', $item.name) SET
                        name = $item.name,
                        units_sold = math::max([(units_sold OR 0) + $item.quantity, 0]);
                }};
                UPSERT counters:global SET
                    orders_served = math::max([(orders_served OR 0) + 1, 0]);
                COMMIT TRANSACTION;
            "#
            ))
            .bind(("customer_name", data.customer_name))
            .bind(("line_items", line_items))
            .bind(("now", now_millis()))
            .bind(("total_units", total_units))
            .await?;

        let orders: Vec<Order> = result.take(0)?;
        orders
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    /// Advance the order to the immediate successor of its current status.
    ///
    /// Anything else — skipping ahead, moving backward, leaving DELIVERED —
    /// is rejected before the write. The write itself is conditional on the
    /// status still being the one the decision was made against.
    pub async fn advance_status(&self, id: &str, to: OrderStatus) -> RepoResult<Order> {
        let record_id = parse_order_id(id)?;

        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))?;

        if !self.flow.can_advance(current.status, to) {
            return Err(RepoError::Validation(format!(
                "Illegal status transition: {} -> {}",
                current.status, to
            )));
        }

        let now = now_millis();
        let served_at = match to {
            OrderStatus::Preparing => current.served_at.or(Some(now)),
            _ => current.served_at,
        };
        let ready_at = match to {
            OrderStatus::Ready => current.ready_at.or(Some(now)),
            _ => current.ready_at,
        };

        let mut result = self
            .base
            .db()
            .query(format!(
                r#"
                LET $updated = UPDATE $id SET
                    status = $to,
                    served_at = $served_at,
                    ready_at = $ready_at
                    WHERE status = $from;
                SELECT {ORDER_FIELDS} FROM $updated;
            "#
            ))
            .bind(("id", record_id))
            .bind(("to", to))
            .bind(("from", current.status))
            .bind(("served_at", served_at))
            .bind(("ready_at", ready_at))
            .await?;

        let orders: Vec<Order> = result.take(0)?;
        orders.into_iter().next().ok_or_else(|| {
            RepoError::Conflict(format!("Order {} changed concurrently, retry", id))
        })
    }

    /// Overwrite line items, customer name and total without touching
    /// number, status or created_at.
    ///
    /// The transaction reads the old line items, subtracts them from the
    /// sales counters and adds the new ones; the orders-served count is
    /// not an edit concern. When the order does not exist the update
    /// matches nothing and both counter folds iterate empty lists.
    pub async fn edit(&self, id: &str, data: OrderEdit, total_units: i64) -> RepoResult<Order> {
        let record_id = parse_order_id(id)?;
        validate_line_items(&data.line_items)?;
        let line_items = merge_line_items(data.line_items);

        let mut result = self
            .base
            .db()
            .query(format!(
                r#"
                BEGIN TRANSACTION;
                LET $old = (SELECT VALUE line_items FROM $id)[0];
                LET $updated = UPDATE $id SET
                    line_items = $line_items,
                    customer_name = $customer_name,
                    total_units = $total_units;
                SELECT {ORDER_FIELDS} FROM $updated;
                FOR $item IN ($old OR []) {{
                    UPSERT type::thing('sales_counter', $item.name) SET
                        name = $item.name,
                        units_sold = math::max([(units_sold OR 0) - $item.quantity, 0]);
                }};
                FOR $item IN ($updated[0].line_items OR []) {{
                    UPSERT type::thing('sales_counter', $item.name) SET
                        name = $item.name,
                        units_sold = math::max([(units_sold OR 0) + $item.quantity, 0]);
                }};
                COMMIT TRANSACTION;
            "#
            ))
            .bind(("id", record_id))
            .bind(("line_items", line_items))
            .bind(("customer_name", data.customer_name))
            .bind(("total_units", total_units))
            .await?;

        let orders: Vec<Order> = result.take(0)?;
        orders
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }

    /// Delete the order and reverse its aggregate contribution: line items
    /// come back out of the sales counters and the orders-served count
    /// drops by one, both floored at zero.
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let record_id = parse_order_id(id)?;

        let mut result = self
            .base
            .db()
            .query(format!(
                r#"
                BEGIN TRANSACTION;
                LET $gone = (DELETE $id RETURN BEFORE);
                SELECT {ORDER_FIELDS} FROM $gone;
                FOR $item IN ($gone[0].line_items OR []) {{
                    UPSERT type::thing('sales_counter', $item.name) SET
                        name = $item.name,
                        units_sold = math::max([(units_sold OR 0) - $item.quantity, 0]);
                }};
                UPSERT counters:global SET
                    orders_served = math::max([
                        (orders_served OR 0) - math::min([array::len($gone), 1]),
                        0
                    ]);
                COMMIT TRANSACTION;
            "#
            ))
            .bind(("id", record_id))
            .await?;

        let orders: Vec<Order> = result.take(0)?;
        if orders.is_empty() {
            return Err(RepoError::NotFound(format!("Order {} not found", id)));
        }
        Ok(())
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let record_id = parse_order_id(id)?;

        let mut result = self
            .base
            .db()
            .query(format!("SELECT {ORDER_FIELDS} FROM $id"))
            .bind(("id", record_id))
            .await?;

        let orders: Vec<Order> = result.take(0)?;
        Ok(orders.into_iter().next())
    }

    /// Lookup a not-yet-delivered order by its number (the edit flow's
    /// entry point — numbers recycle across resets, delivered history
    /// does not shadow the live order).
    pub async fn find_by_number(&self, number: i64) -> RepoResult<Option<Order>> {
        let mut result = self
            .base
            .db()
            .query(format!(
                "SELECT {ORDER_FIELDS} FROM order \
                 WHERE number = $number AND status != 'DELIVERED' LIMIT 1"
            ))
            .bind(("number", number))
            .await?;

        let orders: Vec<Order> = result.take(0)?;
        Ok(orders.into_iter().next())
    }

    /// Orders in `status`, oldest first — first-in-first-served for the
    /// kitchen.
    pub async fn find_by_status(&self, status: OrderStatus) -> RepoResult<Vec<Order>> {
        let mut result = self
            .base
            .db()
            .query(format!(
                "SELECT {ORDER_FIELDS} FROM order \
                 WHERE status = $status ORDER BY created_at ASC"
            ))
            .bind(("status", status))
            .await?;

        let orders: Vec<Order> = result.take(0)?;
        Ok(orders)
    }

    /// Full history, newest first.
    pub async fn find_all(&self) -> RepoResult<Vec<Order>> {
        let mut result = self
            .base
            .db()
            .query(format!(
                "SELECT {ORDER_FIELDS} FROM order ORDER BY created_at DESC"
            ))
            .await?;

        let orders: Vec<Order> = result.take(0)?;
        Ok(orders)
    }

    /// Bulk reset: delete every order. The sales report is intentionally
    /// left alone; clearing it is a separate action.
    pub async fn clear_all(&self) -> RepoResult<usize> {
        let count = self.find_all().await?.len();

        self.base
            .db()
            .query("DELETE order")
            .await?
            .check()?;

        tracing::info!(deleted = count, "Cleared all orders");
        Ok(count)
    }
}
