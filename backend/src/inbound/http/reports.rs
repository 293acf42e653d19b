//! Customer summary and spending report endpoints.
//!
//! ```text
//! GET /api/customers/{customerId}/summary
//! GET /api/reports/customer-orders?country=USA&minSpent=100
//! ```

use actix_web::{HttpResponse, get, web};

use crate::domain::ReportFilters;
use crate::inbound::http::schemas::{
    CustomerOrdersReportEnvelopeSchema, CustomerSummaryEnvelopeSchema, ErrorEnvelopeSchema,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{ReportQuery, parse_customer_id};
use crate::inbound::http::{ApiResult, envelope_response};

/// Summarise one customer and their orders.
#[utoipa::path(
    get,
    path = "/api/customers/{customerId}/summary",
    params(("customerId" = i64, Path, description = "Customer business id, at least 1")),
    responses(
        (status = 200, description = "Customer summary found", body = CustomerSummaryEnvelopeSchema),
        (status = 400, description = "customerId is not a positive integer", body = ErrorEnvelopeSchema),
        (status = 404, description = "Customer not found", body = CustomerSummaryEnvelopeSchema),
        (status = 500, description = "Lookup failed", body = CustomerSummaryEnvelopeSchema)
    ),
    tags = ["reports"],
    operation_id = "getCustomerSummary"
)]
#[get("/customers/{customerId}/summary")]
pub async fn customer_summary(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let customer_id = parse_customer_id(&path)?;
    let response = state.reports.customer_summary(customer_id).await;
    Ok(envelope_response(&response))
}

/// Customers with their order totals, highest spend first.
#[utoipa::path(
    get,
    path = "/api/reports/customer-orders",
    params(ReportQuery),
    responses(
        (status = 200, description = "Customer orders report generated", body = CustomerOrdersReportEnvelopeSchema),
        (status = 400, description = "minSpent is not a non-negative number", body = ErrorEnvelopeSchema),
        (status = 500, description = "Report failed", body = CustomerOrdersReportEnvelopeSchema)
    ),
    tags = ["reports"],
    operation_id = "getCustomerOrdersReport"
)]
#[get("/reports/customer-orders")]
pub async fn customer_orders_report(
    state: web::Data<HttpState>,
    query: web::Query<ReportQuery>,
) -> ApiResult<HttpResponse> {
    let filters = ReportFilters::try_from(query.into_inner())?;
    let response = state.reports.customer_orders_report(filters).await;
    Ok(envelope_response(&response))
}

#[cfg(test)]
#[path = "reports_tests.rs"]
mod tests;
