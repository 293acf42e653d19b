//! Driving port for customer spending reports.

use async_trait::async_trait;

use crate::domain::{CustomerSummaryResponse, ReportFilters, ReportRow, ServiceResponse};

/// Read-side use-case port for customer summaries and reports.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CustomerReportQuery: Send + Sync {
    /// Summarise one customer and their orders.
    async fn customer_summary(&self, customer_id: i64)
    -> ServiceResponse<CustomerSummaryResponse>;

    /// Build the filtered report, sorted by total spend descending.
    async fn customer_orders_report(&self, filters: ReportFilters)
    -> ServiceResponse<Vec<ReportRow>>;
}
