//! Customer summaries and the spend-ordered customer-orders report.
//!
//! Customers and orders are joined in memory. Per-customer order lookups are
//! independent reads, so the report issues them concurrently with a bounded
//! fan-out and joins the results in candidate order before filtering.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::{StreamExt as _, TryStreamExt as _, stream};
use tracing::error;

use super::ports::{
    CustomerReportQuery, CustomerRepository, CustomerRepositoryError, OrderRepository,
    OrderRepositoryError,
};
use super::{CustomerSummaryResponse, ReportFilters, ReportRow, ResponseStatus, ServiceResponse};

/// Maximum number of in-flight order lookups per report.
const ORDER_LOOKUP_FAN_OUT: usize = 8;

#[derive(Debug, thiserror::Error)]
enum ReportError {
    #[error(transparent)]
    Customers(#[from] CustomerRepositoryError),
    #[error(transparent)]
    Orders(#[from] OrderRepositoryError),
}

/// Report service over customer and order repositories.
pub struct ReportService<C, O> {
    customers: Arc<C>,
    orders: Arc<O>,
}

impl<C, O> ReportService<C, O>
where
    C: CustomerRepository,
    O: OrderRepository,
{
    /// Create a service reading from both repositories.
    pub fn new(customers: Arc<C>, orders: Arc<O>) -> Self {
        Self { customers, orders }
    }

    async fn summarise(
        &self,
        customer_id: i64,
    ) -> Result<Option<CustomerSummaryResponse>, ReportError> {
        let Some(customer) = self.customers.find_by_customer_id(customer_id).await? else {
            return Ok(None);
        };
        let orders = self.orders.find_by_customer_id(customer_id).await?;
        Ok(Some(CustomerSummaryResponse::new(&customer, &orders)))
    }

    async fn build_report(&self, filters: &ReportFilters) -> Result<Vec<ReportRow>, ReportError> {
        let candidates = match filters.country.as_deref() {
            Some(country) => self.customers.find_by_country(country).await?,
            None => self.customers.find_all().await?,
        };

        let ids: Vec<i64> = candidates.iter().map(|customer| customer.customer_id).collect();
        let order_sets: Vec<_> = stream::iter(ids)
            .map(|customer_id| self.orders.find_by_customer_id(customer_id))
            .buffered(ORDER_LOOKUP_FAN_OUT)
            .try_collect()
            .await?;

        let mut rows: Vec<ReportRow> = candidates
            .iter()
            .zip(&order_sets)
            .map(|(customer, orders)| ReportRow::new(customer, orders))
            .filter(|row| filters.admits(row.total_spent()))
            .collect();
        // Stable: equal totals keep candidate order.
        rows.sort_by(|left, right| right.total_spent().total_cmp(&left.total_spent()));
        Ok(rows)
    }
}

#[async_trait]
impl<C, O> CustomerReportQuery for ReportService<C, O>
where
    C: CustomerRepository,
    O: OrderRepository,
{
    async fn customer_summary(&self, customer_id: i64) -> ServiceResponse<CustomerSummaryResponse> {
        match self.summarise(customer_id).await {
            Ok(Some(summary)) => {
                ServiceResponse::success("Customer summary found", summary, ResponseStatus::Ok)
            }
            Ok(None) => {
                ServiceResponse::failure("Customer not found", None, ResponseStatus::NotFound)
            }
            Err(err) => {
                error!(
                    operation = "customer_summary",
                    customer_id,
                    error = %err,
                    "customer summary lookup failed"
                );
                ServiceResponse::failure(
                    "An error occurred while fetching customer summary",
                    None,
                    ResponseStatus::InternalError,
                )
            }
        }
    }

    async fn customer_orders_report(
        &self,
        filters: ReportFilters,
    ) -> ServiceResponse<Vec<ReportRow>> {
        match self.build_report(&filters).await {
            Ok(rows) => {
                ServiceResponse::success("Customer orders report generated", rows, ResponseStatus::Ok)
            }
            Err(err) => {
                error!(
                    operation = "customer_orders_report",
                    country = filters.country.as_deref(),
                    min_spent = filters.min_spent,
                    error = %err,
                    "customer orders report failed"
                );
                ServiceResponse::failure(
                    "An error occurred while generating report",
                    Some(Vec::new()),
                    ResponseStatus::InternalError,
                )
            }
        }
    }
}

#[cfg(test)]
#[path = "report_service_tests.rs"]
mod tests;
