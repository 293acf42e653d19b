//! Domain ports for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) are implemented by outbound adapters; driving
//! ports (`*Command`, `*Query`) are implemented by domain services and
//! consumed by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod csv_import_command;
mod customer_report_query;
mod customer_repository;
mod order_repository;

#[cfg(test)]
pub use csv_import_command::MockCsvImportCommand;
pub use csv_import_command::CsvImportCommand;
#[cfg(test)]
pub use customer_report_query::MockCustomerReportQuery;
pub use customer_report_query::CustomerReportQuery;
#[cfg(test)]
pub use customer_repository::MockCustomerRepository;
pub use customer_repository::{CustomerRepository, CustomerRepositoryError};
#[cfg(test)]
pub use order_repository::MockOrderRepository;
pub use order_repository::{CustomerOrderTotals, OrderRepository, OrderRepositoryError};
