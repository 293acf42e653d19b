//! In-memory repository adapters.
//!
//! Used by tests and as the fallback when no database is configured. Each
//! store keeps one lock; a batch insert checks every key and then writes the
//! whole batch while holding it, so concurrent readers never observe half a
//! batch.

use std::collections::{BTreeMap, HashSet};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::domain::ports::{
    CustomerOrderTotals, CustomerRepository, CustomerRepositoryError, OrderRepository,
    OrderRepositoryError,
};
use crate::domain::{Customer, Order};

/// Return the first id that repeats within `ids` or already exists in `stored`.
fn first_duplicate<V>(stored: &BTreeMap<i64, V>, ids: impl Iterator<Item = i64>) -> Option<i64> {
    let mut seen = HashSet::new();
    ids.into_iter()
        .find(|id| stored.contains_key(id) || !seen.insert(*id))
}

/// Customers keyed by `customer_id`.
#[derive(Debug, Default)]
pub struct InMemoryCustomerRepository {
    rows: RwLock<BTreeMap<i64, Customer>>,
}

impl InMemoryCustomerRepository {
    /// Create a store pre-populated with `customers`; later duplicates win.
    pub fn with_customers(customers: impl IntoIterator<Item = Customer>) -> Self {
        let rows = customers
            .into_iter()
            .map(|customer| (customer.customer_id, customer))
            .collect();
        Self {
            rows: RwLock::new(rows),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, BTreeMap<i64, Customer>>, CustomerRepositoryError> {
        self.rows
            .read()
            .map_err(|_| CustomerRepositoryError::query("customer store lock poisoned"))
    }

    fn write(
        &self,
    ) -> Result<RwLockWriteGuard<'_, BTreeMap<i64, Customer>>, CustomerRepositoryError> {
        self.rows
            .write()
            .map_err(|_| CustomerRepositoryError::query("customer store lock poisoned"))
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn find_by_customer_id(
        &self,
        customer_id: i64,
    ) -> Result<Option<Customer>, CustomerRepositoryError> {
        Ok(self.read()?.get(&customer_id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Customer>, CustomerRepositoryError> {
        Ok(self.read()?.values().cloned().collect())
    }

    async fn find_by_country(
        &self,
        country: &str,
    ) -> Result<Vec<Customer>, CustomerRepositoryError> {
        Ok(self
            .read()?
            .values()
            .filter(|customer| customer.country == country)
            .cloned()
            .collect())
    }

    async fn insert_many(&self, customers: &[Customer]) -> Result<usize, CustomerRepositoryError> {
        let mut rows = self.write()?;
        if let Some(id) = first_duplicate(&rows, customers.iter().map(|c| c.customer_id)) {
            return Err(CustomerRepositoryError::duplicate_id(format!(
                "customer_id {id}"
            )));
        }
        rows.extend(
            customers
                .iter()
                .map(|customer| (customer.customer_id, customer.clone())),
        );
        Ok(customers.len())
    }

    async fn delete_all(&self) -> Result<usize, CustomerRepositoryError> {
        let mut rows = self.write()?;
        let removed = rows.len();
        rows.clear();
        Ok(removed)
    }
}

/// Orders keyed by `order_id`.
#[derive(Debug, Default)]
pub struct InMemoryOrderRepository {
    rows: RwLock<BTreeMap<i64, Order>>,
}

impl InMemoryOrderRepository {
    /// Create a store pre-populated with `orders`; later duplicates win.
    pub fn with_orders(orders: impl IntoIterator<Item = Order>) -> Self {
        let rows = orders
            .into_iter()
            .map(|order| (order.order_id, order))
            .collect();
        Self {
            rows: RwLock::new(rows),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, BTreeMap<i64, Order>>, OrderRepositoryError> {
        self.rows
            .read()
            .map_err(|_| OrderRepositoryError::query("order store lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, BTreeMap<i64, Order>>, OrderRepositoryError> {
        self.rows
            .write()
            .map_err(|_| OrderRepositoryError::query("order store lock poisoned"))
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn find_by_order_id(&self, order_id: i64) -> Result<Option<Order>, OrderRepositoryError> {
        Ok(self.read()?.get(&order_id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Order>, OrderRepositoryError> {
        Ok(self.read()?.values().cloned().collect())
    }

    async fn find_by_customer_id(
        &self,
        customer_id: i64,
    ) -> Result<Vec<Order>, OrderRepositoryError> {
        Ok(self
            .read()?
            .values()
            .filter(|order| order.customer_id == customer_id)
            .cloned()
            .collect())
    }

    async fn insert_many(&self, orders: &[Order]) -> Result<usize, OrderRepositoryError> {
        let mut rows = self.write()?;
        if let Some(id) = first_duplicate(&rows, orders.iter().map(|o| o.order_id)) {
            return Err(OrderRepositoryError::duplicate_id(format!("order_id {id}")));
        }
        rows.extend(orders.iter().map(|order| (order.order_id, order.clone())));
        Ok(orders.len())
    }

    async fn delete_all(&self) -> Result<usize, OrderRepositoryError> {
        let mut rows = self.write()?;
        let removed = rows.len();
        rows.clear();
        Ok(removed)
    }

    async fn aggregate_by_customer(&self) -> Result<Vec<CustomerOrderTotals>, OrderRepositoryError> {
        let rows = self.read()?;
        let mut totals: BTreeMap<i64, CustomerOrderTotals> = BTreeMap::new();
        for order in rows.values() {
            let entry = totals
                .entry(order.customer_id)
                .or_insert_with(|| CustomerOrderTotals {
                    customer_id: order.customer_id,
                    total_orders: 0,
                    total_spent: 0.0,
                });
            entry.total_orders += 1;
            entry.total_spent += order.amount;
        }
        Ok(totals.into_values().collect())
    }
}
