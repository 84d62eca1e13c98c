//! Domain Models

pub mod menu_item;
pub mod order;
pub mod sales;

pub use menu_item::{MenuItem, MenuItemUpsert};
pub use order::{Order, OrderCreate, OrderEdit, OrderLineItem, OrderStatus, StatusFlow};
pub use sales::{ReportRow, SalesCounter, SalesReportView, build_report_view};
