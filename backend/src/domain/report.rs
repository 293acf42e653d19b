//! Read-side projections built fresh for every report request.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::import::DATE_FORMAT;
use super::{Customer, Order, OrderStatus};

/// Customer as rendered in summaries and report rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSummary {
    /// Business id rendered as text.
    #[schema(example = "1")]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Country label.
    pub country: String,
    /// Signup date as `YYYY-MM-DD`.
    #[schema(example = "2024-01-15")]
    pub signup_date: String,
}

impl From<&Customer> for CustomerSummary {
    fn from(customer: &Customer) -> Self {
        Self {
            id: customer.customer_id.to_string(),
            name: customer.name.clone(),
            email: customer.email.clone(),
            country: customer.country.clone(),
            signup_date: customer.signup_date.format(DATE_FORMAT).to_string(),
        }
    }
}

/// Order as rendered in summaries and report rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    /// Business id rendered as text.
    #[schema(example = "101")]
    pub order_id: String,
    /// Product label.
    pub product_name: String,
    /// Order value.
    pub amount: f64,
    /// Order date as `YYYY-MM-DD`.
    #[schema(example = "2024-03-01")]
    pub order_date: String,
    /// Fulfilment status.
    pub status: OrderStatus,
}

impl From<&Order> for OrderSummary {
    fn from(order: &Order) -> Self {
        Self {
            order_id: order.order_id.to_string(),
            product_name: order.product_name.clone(),
            amount: order.amount,
            order_date: order.order_date.format(DATE_FORMAT).to_string(),
            status: order.status,
        }
    }
}

/// Totals and line items for one customer's orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummaryReport {
    /// Number of orders.
    pub total_orders: usize,
    /// Sum of order amounts; zero without orders.
    pub total_spent: f64,
    /// Orders in fetch order.
    pub orders: Vec<OrderSummary>,
}

impl OrderSummaryReport {
    /// Summarise `orders`.
    #[must_use]
    pub fn from_orders(orders: &[Order]) -> Self {
        Self {
            total_orders: orders.len(),
            // Folded from +0.0: an empty float `sum` yields -0.0.
            total_spent: orders.iter().fold(0.0, |total, order| total + order.amount),
            orders: orders.iter().map(OrderSummary::from).collect(),
        }
    }
}

/// A customer joined with their order summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSummaryResponse {
    /// Customer projection.
    pub customer: CustomerSummary,
    /// Order totals and line items.
    pub order_summary: OrderSummaryReport,
}

impl CustomerSummaryResponse {
    /// Join `customer` with `orders`.
    #[must_use]
    pub fn new(customer: &Customer, orders: &[Order]) -> Self {
        Self {
            customer: customer.into(),
            order_summary: OrderSummaryReport::from_orders(orders),
        }
    }

    /// Total spend used for filtering and sorting.
    #[must_use]
    pub fn total_spent(&self) -> f64 {
        self.order_summary.total_spent
    }
}

/// One row of the customer-orders report.
pub type ReportRow = CustomerSummaryResponse;

/// Optional filters for the customer-orders report.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportFilters {
    /// Keep only customers from this country.
    pub country: Option<String>,
    /// Drop customers whose total spend is below this value.
    pub min_spent: Option<f64>,
}

impl ReportFilters {
    /// Whether a customer with `total_spent` survives the spend filter.
    ///
    /// Equality is kept: only totals strictly below the minimum are dropped.
    #[must_use]
    pub fn admits(&self, total_spent: f64) -> bool {
        self.min_spent.is_none_or(|minimum| total_spent >= minimum)
    }
}
