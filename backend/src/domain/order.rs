//! Order entity and its closed status set.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Fulfilment status of an order.
///
/// Parsing is case-sensitive: only the lowercase spellings are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Order paid and delivered.
    Completed,
    /// Order placed but not yet dispatched.
    Pending,
    /// Order dispatched to the carrier.
    Shipped,
}

impl OrderStatus {
    /// Every accepted status, in the order used by error messages.
    pub const ALL: [Self; 3] = [Self::Completed, Self::Pending, Self::Shipped];

    /// Canonical lowercase spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Pending => "pending",
            Self::Shipped => "shipped",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a status string is outside the closed set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown order status: {0}")]
pub struct UnknownOrderStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownOrderStatus;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == raw)
            .ok_or_else(|| UnknownOrderStatus(raw.to_owned()))
    }
}

/// An order imported from a bulk export.
///
/// `customer_id` refers to [`crate::domain::Customer::customer_id`] but is not
/// checked against stored customers at write time.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    /// Business identifier, unique across orders.
    pub order_id: i64,
    /// Identifier of the purchasing customer.
    pub customer_id: i64,
    /// Product label.
    pub product_name: String,
    /// Order value.
    pub amount: f64,
    /// Calendar date the order was placed.
    pub order_date: NaiveDate,
    /// Fulfilment status.
    pub status: OrderStatus,
}
