//! Order Draft
//!
//! In-memory working set assembling a candidate order before submission.
//! Adding an existing name merges quantities instead of duplicating the
//! line; removing decrements and drops the line at zero.

use crate::models::menu_item::MenuItem;
use crate::models::order::OrderLineItem;

/// Σ quantity × unit_value over line items found in the catalog.
///
/// Line items with no catalog match contribute 0; they are not an error.
pub fn compute_total(line_items: &[OrderLineItem], catalog: &[MenuItem]) -> i64 {
    line_items
        .iter()
        .map(|item| {
            catalog
                .iter()
                .find(|m| m.name == item.name)
                .map(|m| m.unit_value * item.quantity)
                .unwrap_or(0)
        })
        .sum()
}

/// Collapse duplicate names into single line items, summing quantities.
///
/// Orders never carry two lines for the same name; submissions assembled
/// outside [`OrderDraft`] are normalized through this before persisting.
pub fn merge_line_items(line_items: Vec<OrderLineItem>) -> Vec<OrderLineItem> {
    let mut merged: Vec<OrderLineItem> = Vec::with_capacity(line_items.len());
    for item in line_items {
        match merged.iter_mut().find(|m| m.name == item.name) {
            Some(existing) => existing.quantity += item.quantity,
            None => merged.push(item),
        }
    }
    merged
}

/// Working set for an order being built
#[derive(Debug, Clone, Default)]
pub struct OrderDraft {
    items: Vec<OrderLineItem>,
}

impl OrderDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of `name`: merge into an existing line or append a new
    /// one with quantity 1. Always succeeds.
    pub fn add_item(&mut self, name: &str) {
        match self.items.iter_mut().find(|i| i.name == name) {
            Some(item) => item.quantity += 1,
            None => self.items.push(OrderLineItem::new(name, 1)),
        }
    }

    /// Remove one unit at `index`: decrement, or drop the line when its
    /// quantity reaches zero. Out-of-range indexes are a silent no-op.
    pub fn remove_item(&mut self, index: usize) {
        let Some(item) = self.items.get_mut(index) else {
            return;
        };
        if item.quantity > 1 {
            item.quantity -= 1;
        } else {
            self.items.remove(index);
        }
    }

    /// Running total against `catalog`.
    pub fn total(&self, catalog: &[MenuItem]) -> i64 {
        compute_total(&self.items, catalog)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[OrderLineItem] {
        &self.items
    }

    /// Consume the draft, yielding the final line items.
    pub fn into_items(self) -> Vec<OrderLineItem> {
        self.items
    }
}
