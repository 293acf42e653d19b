//! Handler tests for the summary and report endpoints.

use std::sync::Arc;

use actix_web::test::TestRequest;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use crate::domain::ports::{MockCsvImportCommand, MockCustomerReportQuery};
use crate::domain::{ResponseStatus, ServiceResponse};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::test_utils::{MemoryBackend, call_json, customer, init_api, order};
use crate::inbound::http::validation::{INVALID_CUSTOMER_ID, INVALID_MIN_SPENT};

#[fixture]
fn backend() -> MemoryBackend {
    MemoryBackend::new(
        vec![
            customer(1, "John Doe", "USA"),
            customer(2, "Jane Smith", "UK"),
            customer(3, "Zed Quiet", "USA"),
        ],
        vec![
            order(101, 1, 999.99),
            order(102, 1, 29.99),
            order(103, 2, 79.99),
        ],
    )
}

fn get(uri: &str) -> actix_http::Request {
    TestRequest::get().uri(uri).to_request()
}

fn names(body: &Value) -> Vec<String> {
    body["responseObject"]
        .as_array()
        .expect("rows")
        .iter()
        .map(|row| row["customer"]["name"].as_str().expect("name").to_owned())
        .collect()
}

#[rstest]
#[actix_web::test]
async fn summary_joins_customer_and_orders(backend: MemoryBackend) {
    let app = init_api(backend.state()).await;

    let (status, body) = call_json(&app, get("/api/customers/1/summary")).await;

    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Customer summary found");
    assert_eq!(body["statusCode"], 200);
    let summary = &body["responseObject"];
    assert_eq!(summary["customer"]["id"], "1");
    assert_eq!(summary["customer"]["signupDate"], "2024-01-15");
    assert_eq!(summary["orderSummary"]["totalOrders"], 2);
    let total = summary["orderSummary"]["totalSpent"].as_f64().expect("total");
    assert!((total - 1029.98).abs() < 1e-9);
    assert_eq!(summary["orderSummary"]["orders"][0]["orderId"], "101");
}

#[rstest]
#[actix_web::test]
async fn unknown_customer_is_not_found(backend: MemoryBackend) {
    let app = init_api(backend.state()).await;

    let (status, body) = call_json(&app, get("/api/customers/999/summary")).await;

    assert_eq!(status, 404);
    assert_eq!(
        body,
        json!({
            "success": false,
            "message": "Customer not found",
            "responseObject": null,
            "statusCode": 404,
        })
    );
}

#[rstest]
#[case("0")]
#[case("-1")]
#[case("abc")]
#[case("2.5")]
#[actix_web::test]
async fn malformed_customer_id_is_rejected(#[case] raw: &str) {
    let app = init_api(MemoryBackend::empty().state()).await;

    let (status, body) = call_json(&app, get(&format!("/api/customers/{raw}/summary"))).await;

    assert_eq!(status, 400);
    assert_eq!(body["message"], INVALID_CUSTOMER_ID);
    assert_eq!(body["responseObject"], Value::Null);
}

#[rstest]
#[actix_web::test]
async fn report_sorts_by_total_spent(backend: MemoryBackend) {
    let app = init_api(backend.state()).await;

    let (status, body) = call_json(&app, get("/api/reports/customer-orders")).await;

    assert_eq!(status, 200);
    assert_eq!(body["message"], "Customer orders report generated");
    assert_eq!(names(&body), ["John Doe", "Jane Smith", "Zed Quiet"]);
}

#[rstest]
#[case("?country=USA", &["John Doe", "Zed Quiet"])]
#[case("?country=", &["John Doe", "Jane Smith", "Zed Quiet"])]
#[case("?minSpent=79.99", &["John Doe", "Jane Smith"])]
#[case("?country=UK&minSpent=80", &[])]
#[actix_web::test]
async fn report_applies_filters(
    backend: MemoryBackend,
    #[case] query: &str,
    #[case] expected: &[&str],
) {
    let app = init_api(backend.state()).await;

    let (status, body) =
        call_json(&app, get(&format!("/api/reports/customer-orders{query}"))).await;

    assert_eq!(status, 200);
    assert_eq!(names(&body), expected);
}

#[rstest]
#[case("?minSpent=-5")]
#[case("?minSpent=plenty")]
#[actix_web::test]
async fn report_rejects_bad_min_spent(#[case] query: &str) {
    let app = init_api(MemoryBackend::empty().state()).await;

    let (status, body) =
        call_json(&app, get(&format!("/api/reports/customer-orders{query}"))).await;

    assert_eq!(status, 400);
    assert_eq!(body["message"], INVALID_MIN_SPENT);
}

#[actix_web::test]
async fn report_failure_keeps_an_empty_payload() {
    let mut reports = MockCustomerReportQuery::new();
    reports.expect_customer_orders_report().times(1).return_once(|_| {
        ServiceResponse::failure(
            "An error occurred while generating report",
            Some(Vec::new()),
            ResponseStatus::InternalError,
        )
    });
    let state = HttpState::new(
        Arc::new(MockCsvImportCommand::new()),
        Arc::new(MockCsvImportCommand::new()),
        Arc::new(reports),
    );
    let app = init_api(state).await;

    let (status, body) = call_json(&app, get("/api/reports/customer-orders")).await;

    assert_eq!(status, 500);
    assert_eq!(body["responseObject"], json!([]));
}
