//! Sales Aggregate Models
//!
//! Cumulative per-item sales counters live independently of order
//! documents, so historical sales survive order edits and deletion. The
//! report view is derived on demand from the counters and the current
//! menu catalog.

use serde::{Deserialize, Serialize};

use super::menu_item::MenuItem;

/// Per-item cumulative sales counter, one record per menu item name
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SalesCounter {
    pub name: String,
    pub units_sold: i64,
}

/// One row of the sales report
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportRow {
    pub name: String,
    pub quantity_sold: i64,
    /// Unit price from the current catalog; 0 when the item no longer exists
    pub unit_value: i64,
    pub line_total: i64,
}

/// Computed sales report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesReportView {
    pub rows: Vec<ReportRow>,
    /// Grand total, Σ line_total
    pub total_units: i64,
    pub orders_served: i64,
}

/// Build the report view from raw counters and the menu catalog.
///
/// Zero-quantity counters are excluded; rows are sorted by quantity sold
/// descending (name ascending on ties); counters whose name is missing
/// from the catalog are valued at 0, not treated as an error.
pub fn build_report_view(
    counters: &[SalesCounter],
    catalog: &[MenuItem],
    orders_served: i64,
) -> SalesReportView {
    let mut rows: Vec<ReportRow> = counters
        .iter()
        .filter(|c| c.units_sold > 0)
        .map(|c| {
            let unit_value = catalog
                .iter()
                .find(|m| m.name == c.name)
                .map(|m| m.unit_value)
                .unwrap_or(0);
            ReportRow {
                name: c.name.clone(),
                quantity_sold: c.units_sold,
                unit_value,
                line_total: c.units_sold * unit_value,
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        b.quantity_sold
            .cmp(&a.quantity_sold)
            .then_with(|| a.name.cmp(&b.name))
    });

    let total_units = rows.iter().map(|r| r.line_total).sum();

    SalesReportView {
        rows,
        total_units,
        orders_served,
    }
}
