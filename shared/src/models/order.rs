//! Order Model
//!
//! The order entity, its embedded line items, and the kitchen status
//! state machine. Status legality is centralized in [`StatusFlow`]; the
//! store layer rejects any write that is not the immediate successor of
//! the current status.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kitchen workflow status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Open,
    Preparing,
    Ready,
    Delivered,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Open => "OPEN",
            OrderStatus::Preparing => "PREPARING",
            OrderStatus::Ready => "READY",
            OrderStatus::Delivered => "DELIVERED",
        }
    }

    /// All statuses, in workflow order.
    pub fn all() -> [OrderStatus; 4] {
        [
            OrderStatus::Open,
            OrderStatus::Preparing,
            OrderStatus::Ready,
            OrderStatus::Delivered,
        ]
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown status string.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error("Unknown order status: {0}")]
pub struct ParseStatusError(pub String);

impl FromStr for OrderStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "OPEN" => Ok(OrderStatus::Open),
            "PREPARING" => Ok(OrderStatus::Preparing),
            "READY" => Ok(OrderStatus::Ready),
            "DELIVERED" => Ok(OrderStatus::Delivered),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

/// Status transition table
///
/// Two configurations exist in the field: the four-stage flow
/// `OPEN → PREPARING → READY → DELIVERED` and a two-stage variant that
/// skips READY. Orders already in READY advance to DELIVERED under
/// either configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusFlow {
    two_stage: bool,
}

impl StatusFlow {
    pub const FOUR_STAGE: StatusFlow = StatusFlow { two_stage: false };
    pub const TWO_STAGE: StatusFlow = StatusFlow { two_stage: true };

    pub fn new(two_stage: bool) -> Self {
        Self { two_stage }
    }

    /// The single legal successor of `status`, if any.
    pub fn next(&self, status: OrderStatus) -> Option<OrderStatus> {
        match status {
            OrderStatus::Open => Some(OrderStatus::Preparing),
            OrderStatus::Preparing if self.two_stage => Some(OrderStatus::Delivered),
            OrderStatus::Preparing => Some(OrderStatus::Ready),
            OrderStatus::Ready => Some(OrderStatus::Delivered),
            OrderStatus::Delivered => None,
        }
    }

    pub fn can_advance(&self, from: OrderStatus, to: OrderStatus) -> bool {
        self.next(from) == Some(to)
    }

    pub fn is_terminal(&self, status: OrderStatus) -> bool {
        self.next(status).is_none()
    }
}

/// Order line item
///
/// References a menu item by name; no foreign key is enforced. Within one
/// order the same name never appears twice (quantities merge in the draft).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderLineItem {
    pub name: String,
    pub quantity: i64,
}

impl OrderLineItem {
    pub fn new(name: impl Into<String>, quantity: i64) -> Self {
        Self {
            name: name.into(),
            quantity,
        }
    }
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: Option<String>,
    /// Sequential number, assigned once at creation
    pub number: i64,
    pub customer_name: Option<String>,
    pub line_items: Vec<OrderLineItem>,
    pub status: OrderStatus,
    /// Epoch millis, never rewritten after creation
    pub created_at: i64,
    /// Stamped once, when status first becomes PREPARING
    #[serde(default)]
    pub served_at: Option<i64>,
    /// Stamped once, when status first becomes READY
    #[serde(default)]
    pub ready_at: Option<i64>,
    /// Σ quantity × unit_value at computation time
    pub total_units: i64,
}

/// Create order payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub customer_name: Option<String>,
    pub line_items: Vec<OrderLineItem>,
}

/// Edit order payload — never touches number, status or created_at
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderEdit {
    pub customer_name: Option<String>,
    pub line_items: Vec<OrderLineItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_stage_flow_walks_forward_only() {
        let flow = StatusFlow::FOUR_STAGE;
        assert_eq!(flow.next(OrderStatus::Open), Some(OrderStatus::Preparing));
        assert_eq!(flow.next(OrderStatus::Preparing), Some(OrderStatus::Ready));
        assert_eq!(flow.next(OrderStatus::Ready), Some(OrderStatus::Delivered));
        assert_eq!(flow.next(OrderStatus::Delivered), None);

        assert!(flow.can_advance(OrderStatus::Open, OrderStatus::Preparing));
        assert!(!flow.can_advance(OrderStatus::Open, OrderStatus::Ready));
        assert!(!flow.can_advance(OrderStatus::Preparing, OrderStatus::Open));
        assert!(!flow.can_advance(OrderStatus::Delivered, OrderStatus::Open));
    }

    #[test]
    fn two_stage_flow_skips_ready() {
        let flow = StatusFlow::TWO_STAGE;
        assert_eq!(
            flow.next(OrderStatus::Preparing),
            Some(OrderStatus::Delivered)
        );
        assert!(!flow.can_advance(OrderStatus::Preparing, OrderStatus::Ready));
        // Orders already READY still drain to DELIVERED
        assert!(flow.can_advance(OrderStatus::Ready, OrderStatus::Delivered));
    }

    #[test]
    fn delivered_is_terminal_in_both_flows() {
        assert!(StatusFlow::FOUR_STAGE.is_terminal(OrderStatus::Delivered));
        assert!(StatusFlow::TWO_STAGE.is_terminal(OrderStatus::Delivered));
        assert!(!StatusFlow::FOUR_STAGE.is_terminal(OrderStatus::Ready));
    }

    #[test]
    fn status_parses_case_insensitive() {
        assert_eq!("open".parse::<OrderStatus>().unwrap(), OrderStatus::Open);
        assert_eq!(
            "PREPARING".parse::<OrderStatus>().unwrap(),
            OrderStatus::Preparing
        );
        assert!("cancelled".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn status_serializes_screaming_snake_case() {
        let json = serde_json::to_string(&OrderStatus::Preparing).unwrap();
        assert_eq!(json, "\"PREPARING\"");
        let back: OrderStatus = serde_json::from_str("\"DELIVERED\"").unwrap();
        assert_eq!(back, OrderStatus::Delivered);
    }
}
