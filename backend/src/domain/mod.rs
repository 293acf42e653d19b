//! Domain entities, services, and ports.
//!
//! Purpose: hold the import pipeline and report aggregation independent of
//! HTTP and storage. Adapters depend on this module, never the reverse.
//!
//! Public surface:
//! - `Customer`, `Order`, `OrderStatus`: imported entities.
//! - `import`: CSV parsing, row validation, and atomic batch import.
//! - `ReportService`: customer summaries and the spend-ordered report.
//! - `ServiceResponse`: the envelope every operation returns.
//! - `Error` / `ErrorCode`: transport-agnostic failures.

pub mod customer;
pub mod envelope;
pub mod error;
pub mod import;
pub mod order;
pub mod ports;
pub mod report;
pub mod report_service;

pub use self::customer::Customer;
pub use self::envelope::{ResponseStatus, ServiceResponse, UnsupportedStatusCode};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::import::{
    CsvImportService, CustomerImport, CustomerImportService, ImportResult, OrderImport,
    OrderImportService, ParsedRow,
};
pub use self::order::{Order, OrderStatus, UnknownOrderStatus};
pub use self::report::{
    CustomerSummary, CustomerSummaryResponse, OrderSummary, OrderSummaryReport, ReportFilters,
    ReportRow,
};
pub use self::report_service::ReportService;
