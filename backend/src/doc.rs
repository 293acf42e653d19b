//! OpenAPI document for the back-office API.
//!
//! Registers the upload, report, and health paths plus the envelope schemas
//! from [`crate::inbound::http::schemas`]. Served by Swagger UI in debug
//! builds and printed by the `openapi-dump` binary.

use utoipa::OpenApi;

use crate::domain::{
    CustomerSummary, CustomerSummaryResponse, ErrorCode, ImportResult, OrderStatus, OrderSummary,
    OrderSummaryReport,
};
use crate::inbound::http::schemas::{
    CsvUploadSchema, CustomerOrdersReportEnvelopeSchema, CustomerSummaryEnvelopeSchema,
    ErrorEnvelopeSchema, ImportEnvelopeSchema,
};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Back-office API",
        description = "CSV import of customers and orders, and customer spending reports."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::uploads::upload_customers,
        crate::inbound::http::uploads::upload_orders,
        crate::inbound::http::reports::customer_summary,
        crate::inbound::http::reports::customer_orders_report,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        CsvUploadSchema,
        ImportEnvelopeSchema,
        CustomerSummaryEnvelopeSchema,
        CustomerOrdersReportEnvelopeSchema,
        ErrorEnvelopeSchema,
        ImportResult,
        CustomerSummaryResponse,
        CustomerSummary,
        OrderSummaryReport,
        OrderSummary,
        OrderStatus,
        ErrorCode,
    )),
    tags(
        (name = "uploads", description = "Bulk CSV imports"),
        (name = "reports", description = "Customer summaries and spending reports"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
