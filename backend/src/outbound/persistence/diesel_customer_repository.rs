//! PostgreSQL-backed customer repository.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::Customer;
use crate::domain::ports::{CustomerRepository, CustomerRepositoryError};

use super::diesel_basic_error_mapping::{
    INSERT_CHUNK_ROWS, UniqueViolation, classify_unique_violation, map_basic_diesel_error,
    map_basic_pool_error,
};
use super::models::{CustomerRow, NewCustomerRow};
use super::pool::{DbPool, PoolError};
use super::schema::customers;

/// Unique constraint guarding `customers.customer_id`.
pub(crate) const CUSTOMER_ID_CONSTRAINT: &str = "customers_customer_id_key";

/// Diesel-backed implementation of [`CustomerRepository`].
#[derive(Clone)]
pub struct DieselCustomerRepository {
    pool: DbPool,
}

impl DieselCustomerRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CustomerRepositoryError {
    map_basic_pool_error(error, CustomerRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error, operation: &'static str) -> CustomerRepositoryError {
    map_basic_diesel_error(
        error,
        operation,
        CustomerRepositoryError::query,
        CustomerRepositoryError::connection,
    )
}

fn map_insert_error(error: diesel::result::Error) -> CustomerRepositoryError {
    match classify_unique_violation(&error, CUSTOMER_ID_CONSTRAINT) {
        Some(UniqueViolation::BusinessId(detail)) => CustomerRepositoryError::duplicate_id(detail),
        Some(UniqueViolation::Other(detail)) => CustomerRepositoryError::conflict(detail),
        None => map_diesel_error(error, "insert customers"),
    }
}

#[async_trait]
impl CustomerRepository for DieselCustomerRepository {
    async fn find_by_customer_id(
        &self,
        customer_id: i64,
    ) -> Result<Option<Customer>, CustomerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = customers::table
            .filter(customers::customer_id.eq(customer_id))
            .select(CustomerRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, "find customer"))?;
        Ok(row.map(Customer::from))
    }

    async fn find_all(&self) -> Result<Vec<Customer>, CustomerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<CustomerRow> = customers::table
            .select(CustomerRow::as_select())
            .order(customers::customer_id.asc())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "load customers"))?;
        Ok(rows.into_iter().map(Customer::from).collect())
    }

    async fn find_by_country(
        &self,
        country: &str,
    ) -> Result<Vec<Customer>, CustomerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<CustomerRow> = customers::table
            .filter(customers::country.eq(country))
            .select(CustomerRow::as_select())
            .order(customers::customer_id.asc())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "load customers by country"))?;
        Ok(rows.into_iter().map(Customer::from).collect())
    }

    async fn insert_many(&self, customers: &[Customer]) -> Result<usize, CustomerRepositoryError> {
        use diesel_async::AsyncConnection as _;
        use diesel_async::scoped_futures::ScopedFutureExt as _;

        if customers.is_empty() {
            return Ok(0);
        }
        let rows: Vec<NewCustomerRow<'_>> = customers.iter().map(NewCustomerRow::from).collect();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction(|conn| {
            async move {
                let mut written = 0;
                for chunk in rows.chunks(INSERT_CHUNK_ROWS) {
                    written += diesel::insert_into(customers::table)
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

    async fn delete_all(&self) -> Result<usize, CustomerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::delete(customers::table)
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "delete customers"))
    }
}
