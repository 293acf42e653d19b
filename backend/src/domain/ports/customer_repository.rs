//! Driven port for customer persistence.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::Customer;

define_port_error! {
    /// Errors raised while reading or writing customers.
    pub enum CustomerRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "customer repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "customer repository query failed: {message}",
        /// A customer id in the batch already exists or repeats.
        DuplicateId { message: String } => "duplicate customer id: {message}",
        /// Another uniqueness constraint rejected the batch.
        Conflict { message: String } => "customer uniqueness conflict: {message}",
    }
}

/// Port for storing and scanning customers.
///
/// Scans return customers ordered by `customer_id`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Look up one customer by business id.
    async fn find_by_customer_id(
        &self,
        customer_id: i64,
    ) -> Result<Option<Customer>, CustomerRepositoryError>;

    /// Return every stored customer.
    async fn find_all(&self) -> Result<Vec<Customer>, CustomerRepositoryError>;

    /// Return customers whose country matches exactly.
    async fn find_by_country(&self, country: &str)
    -> Result<Vec<Customer>, CustomerRepositoryError>;

    /// Insert a batch atomically and return the number of rows written.
    ///
    /// Either every customer is written or none is; a uniqueness collision
    /// rolls back the whole batch.
    async fn insert_many(&self, customers: &[Customer]) -> Result<usize, CustomerRepositoryError>;

    /// Remove every customer and return how many were deleted.
    async fn delete_all(&self) -> Result<usize, CustomerRepositoryError>;
}
