//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only see driving ports, so
//! they can be exercised against in-memory repositories or mocks.

use std::sync::Arc;

use crate::domain::ports::{CsvImportCommand, CustomerReportQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Import pipeline for `POST /api/upload/customers`.
    pub customer_import: Arc<dyn CsvImportCommand>,
    /// Import pipeline for `POST /api/upload/orders`.
    pub order_import: Arc<dyn CsvImportCommand>,
    /// Summary and report queries.
    pub reports: Arc<dyn CustomerReportQuery>,
}

impl HttpState {
    /// Bundle the three driving ports.
    ///
    /// ```
    /// use std::sync::Arc;
    ///
    /// use backoffice::domain::{CsvImportService, CustomerImport, OrderImport, ReportService};
    /// use backoffice::inbound::http::state::HttpState;
    /// use backoffice::outbound::memory::{InMemoryCustomerRepository, InMemoryOrderRepository};
    ///
    /// let customers = Arc::new(InMemoryCustomerRepository::default());
    /// let orders = Arc::new(InMemoryOrderRepository::default());
    /// let state = HttpState::new(
    ///     Arc::new(CsvImportService::new(CustomerImport::new(customers.clone()))),
    ///     Arc::new(CsvImportService::new(OrderImport::new(orders.clone()))),
    ///     Arc::new(ReportService::new(customers, orders)),
    /// );
    /// let _reports = state.reports.clone();
    /// ```
    pub fn new(
        customer_import: Arc<dyn CsvImportCommand>,
        order_import: Arc<dyn CsvImportCommand>,
        reports: Arc<dyn CustomerReportQuery>,
    ) -> Self {
        Self {
            customer_import,
            order_import,
            reports,
        }
    }
}
