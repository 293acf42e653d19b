//! Builders wiring repositories into the HTTP state.

use std::sync::Arc;

use actix_web::web;

use backoffice::domain::import::BulkWriter;
use backoffice::domain::ports::{CustomerRepository, OrderRepository};
use backoffice::domain::{CsvImportService, CustomerImport, OrderImport, ReportService};
use backoffice::inbound::http::state::HttpState;
use backoffice::outbound::memory::{InMemoryCustomerRepository, InMemoryOrderRepository};
use backoffice::outbound::persistence::{DieselCustomerRepository, DieselOrderRepository};

use super::ServerConfig;

/// Build import and report services over one pair of repositories.
fn wire_services<C, O>(customers: Arc<C>, orders: Arc<O>, writer: BulkWriter) -> HttpState
where
    C: CustomerRepository + 'static,
    O: OrderRepository + 'static,
{
    HttpState::new(
        Arc::new(CsvImportService::with_writer(
            CustomerImport::new(customers.clone()),
            writer,
        )),
        Arc::new(CsvImportService::with_writer(
            OrderImport::new(orders.clone()),
            writer,
        )),
        Arc::new(ReportService::new(customers, orders)),
    )
}

/// Diesel repositories when a pool is configured, in-memory ones otherwise.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let writer = config.bulk_writer();
    let state = match &config.db_pool {
        Some(pool) => wire_services(
            Arc::new(DieselCustomerRepository::new(pool.clone())),
            Arc::new(DieselOrderRepository::new(pool.clone())),
            writer,
        ),
        None => wire_services(
            Arc::new(InMemoryCustomerRepository::default()),
            Arc::new(InMemoryOrderRepository::default()),
            writer,
        ),
    };
    web::Data::new(state)
}
