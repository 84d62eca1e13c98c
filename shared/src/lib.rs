//! Shared domain types for the Comanda order-management system
//!
//! Common types used by the server and any future clients: the menu
//! catalog, the order entity with its status state machine, the in-memory
//! order draft, and the sales report view computation.

pub mod draft;
pub mod models;
pub mod util;

// Re-exports
pub use draft::{OrderDraft, compute_total, merge_line_items};
pub use models::menu_item::{MenuItem, MenuItemUpsert};
pub use models::order::{Order, OrderCreate, OrderEdit, OrderLineItem, OrderStatus, StatusFlow};
pub use models::sales::{ReportRow, SalesCounter, SalesReportView, build_report_view};
