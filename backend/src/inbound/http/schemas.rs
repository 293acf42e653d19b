//! OpenAPI schema definitions for the response envelope.
//!
//! `ServiceResponse<T>` is generic, so each endpoint's concrete envelope is
//! described here with the payload type it carries.

use utoipa::ToSchema;

use crate::domain::{CustomerSummaryResponse, ImportResult, ReportRow};

/// Multipart body of the CSV upload endpoints.
#[derive(ToSchema)]
#[schema(as = CsvUploadForm)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct CsvUploadSchema {
    /// CSV document with a header row; at most 10MB, `.csv` extension.
    #[schema(value_type = String, format = Binary)]
    file: Vec<u8>,
}

/// Envelope returned by the CSV upload endpoints.
#[derive(ToSchema)]
#[schema(as = ImportEnvelope)]
#[schema(rename_all = "camelCase")]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct ImportEnvelopeSchema {
    /// Whether the whole batch was written.
    success: bool,
    /// Human-readable outcome.
    #[schema(example = "Successfully imported 2 customers")]
    message: String,
    /// Import counters; present on success and failure.
    response_object: Option<ImportResult>,
    /// Mirrors the HTTP status.
    #[schema(example = 201)]
    status_code: u16,
}

/// Envelope returned by `GET /api/customers/{customerId}/summary`.
#[derive(ToSchema)]
#[schema(as = CustomerSummaryEnvelope)]
#[schema(rename_all = "camelCase")]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct CustomerSummaryEnvelopeSchema {
    /// Whether the customer was found.
    success: bool,
    /// Human-readable outcome.
    #[schema(example = "Customer summary found")]
    message: String,
    /// Customer and order summary; null unless found.
    response_object: Option<CustomerSummaryResponse>,
    /// Mirrors the HTTP status.
    #[schema(example = 200)]
    status_code: u16,
}

/// Envelope returned by `GET /api/reports/customer-orders`.
#[derive(ToSchema)]
#[schema(as = CustomerOrdersReportEnvelope)]
#[schema(rename_all = "camelCase")]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct CustomerOrdersReportEnvelopeSchema {
    /// Whether the report was generated.
    success: bool,
    /// Human-readable outcome.
    #[schema(example = "Customer orders report generated")]
    message: String,
    /// Rows sorted by total spend, highest first; empty on failure.
    response_object: Option<Vec<ReportRow>>,
    /// Mirrors the HTTP status.
    #[schema(example = 200)]
    status_code: u16,
}

/// Envelope returned when a request is rejected before reaching a service.
#[derive(ToSchema)]
#[schema(as = ErrorEnvelope)]
#[schema(rename_all = "camelCase")]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct ErrorEnvelopeSchema {
    /// Always false.
    success: bool,
    /// Caller-facing reason.
    #[schema(example = "Invalid input: customerId must be a positive integer")]
    message: String,
    /// Always null.
    #[schema(value_type = Option<Object>)]
    response_object: Option<serde_json::Value>,
    /// Mirrors the HTTP status.
    #[schema(example = 400)]
    status_code: u16,
}
