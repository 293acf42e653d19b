//! PostgreSQL-backed order repository.

use async_trait::async_trait;
use diesel::dsl::count_star;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::Order;
use crate::domain::ports::{CustomerOrderTotals, OrderRepository, OrderRepositoryError};

use super::diesel_basic_error_mapping::{
    INSERT_CHUNK_ROWS, UniqueViolation, classify_unique_violation, map_basic_diesel_error,
    map_basic_pool_error,
};
use super::models::{NewOrderRow, OrderRow};
use super::pool::{DbPool, PoolError};
use super::schema::orders;

/// Unique constraint guarding `orders.order_id`.
pub(crate) const ORDER_ID_CONSTRAINT: &str = "orders_order_id_key";

/// Diesel-backed implementation of [`OrderRepository`].
#[derive(Clone)]
pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> OrderRepositoryError {
    map_basic_pool_error(error, OrderRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error, operation: &'static str) -> OrderRepositoryError {
    map_basic_diesel_error(
        error,
        operation,
        OrderRepositoryError::query,
        OrderRepositoryError::connection,
    )
}

fn map_insert_error(error: diesel::result::Error) -> OrderRepositoryError {
    match classify_unique_violation(&error, ORDER_ID_CONSTRAINT) {
        Some(UniqueViolation::BusinessId(detail)) => OrderRepositoryError::duplicate_id(detail),
        Some(UniqueViolation::Other(detail)) => OrderRepositoryError::conflict(detail),
        None => map_diesel_error(error, "insert orders"),
    }
}

fn into_orders(rows: Vec<OrderRow>) -> Result<Vec<Order>, OrderRepositoryError> {
    rows.into_iter()
        .map(|row| {
            let order_id = row.order_id;
            Order::try_from(row).map_err(|err| {
                OrderRepositoryError::query(format!("order {order_id} has {err}"))
            })
        })
        .collect()
}

fn into_totals((customer_id, count, total): (i64, i64, Option<f64>)) -> CustomerOrderTotals {
    CustomerOrderTotals {
        customer_id,
        total_orders: usize::try_from(count).unwrap_or_default(),
        total_spent: total.unwrap_or_default(),
    }
}

#[async_trait]
impl OrderRepository for DieselOrderRepository {
    async fn find_by_order_id(&self, order_id: i64) -> Result<Option<Order>, OrderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = orders::table
            .filter(orders::order_id.eq(order_id))
            .select(OrderRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, "find order"))?;
        Ok(into_orders(row.into_iter().collect())?.pop())
    }

    async fn find_all(&self) -> Result<Vec<Order>, OrderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = orders::table
            .select(OrderRow::as_select())
            .order(orders::order_id.asc())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "load orders"))?;
        into_orders(rows)
    }

    async fn find_by_customer_id(
        &self,
        customer_id: i64,
    ) -> Result<Vec<Order>, OrderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = orders::table
            .filter(orders::customer_id.eq(customer_id))
            .select(OrderRow::as_select())
            .order(orders::order_id.asc())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "load orders by customer"))?;
        into_orders(rows)
    }

    async fn insert_many(&self, orders: &[Order]) -> Result<usize, OrderRepositoryError> {
        use diesel_async::AsyncConnection as _;
        use diesel_async::scoped_futures::ScopedFutureExt as _;

        if orders.is_empty() {
            return Ok(0);
        }
        let rows: Vec<NewOrderRow<'_>> = orders.iter().map(NewOrderRow::from).collect();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction(|conn| {
            async move {
                let mut written = 0;
                for chunk in rows.chunks(INSERT_CHUNK_ROWS) {
                    written += diesel::insert_into(orders::table)
                        .values(chunk)
                        .execute(conn)
                        .await?;
                }
                Ok::<usize, diesel::result::Error>(written)
            }
            .scope_boxed()
        })
        .await
        .map_err(map_insert_error)
    }

    async fn delete_all(&self) -> Result<usize, OrderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::delete(orders::table)
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "delete orders"))
    }

    async fn aggregate_by_customer(
        &self,
    ) -> Result<Vec<CustomerOrderTotals>, OrderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<(i64, i64, Option<f64>)> = orders::table
            .group_by(orders::customer_id)
            .select((orders::customer_id, count_star(), diesel::dsl::sum(orders::amount)))
            .order(orders::customer_id.asc())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "aggregate orders"))?;
        Ok(rows.into_iter().map(into_totals).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rstest::rstest;

    fn row(status: &str) -> OrderRow {
        OrderRow {
            order_id: 42,
            customer_id: 1,
            product_name: "Laptop".to_owned(),
            amount: 999.99,
            order_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap_or_default(),
            status: status.to_owned(),
        }
    }

    #[rstest]
    fn stored_rows_become_orders() {
        let orders = into_orders(vec![row("shipped")]).expect("valid status");
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].status, crate::domain::OrderStatus::Shipped);
    }

    #[rstest]
    fn unknown_stored_status_is_a_query_error() {
        let err = into_orders(vec![row("lost")]).expect_err("status rejected");
        assert!(matches!(
            err,
            OrderRepositoryError::Query { message } if message.contains("order 42")
        ));
    }

    #[rstest]
    #[case((3, 2, Some(120.5)), 2, 120.5)]
    #[case((3, 0, None), 0, 0.0)]
    fn aggregate_rows_become_totals(
        #[case] input: (i64, i64, Option<f64>),
        #[case] orders: usize,
        #[case] spent: f64,
    ) {
        let totals = into_totals(input);
        assert_eq!(totals.customer_id, 3);
        assert_eq!(totals.total_orders, orders);
        assert!((totals.total_spent - spent).abs() < f64::EPSILON);
    }
}
