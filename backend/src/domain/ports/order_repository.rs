//! Driven port for order persistence and per-customer aggregation.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::Order;

define_port_error! {
    /// Errors raised while reading or writing orders.
    pub enum OrderRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "order repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "order repository query failed: {message}",
        /// An order id in the batch already exists or repeats.
        DuplicateId { message: String } => "duplicate order id: {message}",
        /// Another uniqueness constraint rejected the batch.
        Conflict { message: String } => "order uniqueness conflict: {message}",
    }
}

/// Order totals grouped by customer.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerOrderTotals {
    /// Customer the totals belong to.
    pub customer_id: i64,
    /// Number of orders placed.
    pub total_orders: usize,
    /// Sum of order amounts.
    pub total_spent: f64,
}

/// Port for storing, scanning, and aggregating orders.
///
/// Scans return orders ordered by `order_id`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Look up one order by business id.
    async fn find_by_order_id(&self, order_id: i64) -> Result<Option<Order>, OrderRepositoryError>;

    /// Return every stored order.
    async fn find_all(&self) -> Result<Vec<Order>, OrderRepositoryError>;

    /// Return the orders placed by one customer.
    async fn find_by_customer_id(&self, customer_id: i64)
    -> Result<Vec<Order>, OrderRepositoryError>;

    /// Insert a batch atomically and return the number of rows written.
    ///
    /// Either every order is written or none is; a uniqueness collision rolls
    /// back the whole batch.
    async fn insert_many(&self, orders: &[Order]) -> Result<usize, OrderRepositoryError>;

    /// Remove every order and return how many were deleted.
    async fn delete_all(&self) -> Result<usize, OrderRepositoryError>;

    /// Group orders by customer, ordered by `customer_id`.
    async fn aggregate_by_customer(&self)
    -> Result<Vec<CustomerOrderTotals>, OrderRepositoryError>;
}
