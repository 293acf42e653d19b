//! Helpers shared by the HTTP handler tests.

use std::sync::Arc;

use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{App, test, web};
use chrono::NaiveDate;
use serde_json::Value;

use super::configure_api;
use super::state::HttpState;
use crate::domain::{
    CsvImportService, Customer, CustomerImport, Order, OrderImport, OrderStatus, ReportService,
};
use crate::outbound::memory::{InMemoryCustomerRepository, InMemoryOrderRepository};

pub(crate) const BOUNDARY: &str = "----backoffice-test-boundary";

/// HTTP state wired to in-memory repositories, plus handles to inspect them.
pub(crate) struct MemoryBackend {
    pub customers: Arc<InMemoryCustomerRepository>,
    pub orders: Arc<InMemoryOrderRepository>,
}

impl MemoryBackend {
    pub(crate) fn new(customers: Vec<Customer>, orders: Vec<Order>) -> Self {
        Self {
            customers: Arc::new(InMemoryCustomerRepository::with_customers(customers)),
            orders: Arc::new(InMemoryOrderRepository::with_orders(orders)),
        }
    }

    pub(crate) fn empty() -> Self {
        Self::new(Vec::new(), Vec::new())
    }

    pub(crate) fn state(&self) -> HttpState {
        HttpState::new(
            Arc::new(CsvImportService::new(CustomerImport::new(self.customers.clone()))),
            Arc::new(CsvImportService::new(OrderImport::new(self.orders.clone()))),
            Arc::new(ReportService::new(self.customers.clone(), self.orders.clone())),
        )
    }
}

/// Initialise the `/api` routes over `state`.
pub(crate) async fn init_api(
    state: HttpState,
) -> impl Service<actix_http::Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>
{
    test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(configure_api),
    )
    .await
}

/// Build a multipart body with one file part.
pub(crate) fn multipart_file(field: &str, file_name: &str, contents: &str) -> Vec<u8> {
    format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n\
         Content-Type: text/csv\r\n\r\n\
         {contents}\r\n\
         --{BOUNDARY}--\r\n"
    )
    .into_bytes()
}

/// Build a multipart body with one plain text part and no file.
pub(crate) fn multipart_text(field: &str, value: &str) -> Vec<u8> {
    format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"{field}\"\r\n\r\n\
         {value}\r\n\
         --{BOUNDARY}--\r\n"
    )
    .into_bytes()
}

/// `multipart/form-data` content type matching [`BOUNDARY`].
pub(crate) fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={BOUNDARY}")
}

/// Call `req` and decode the JSON body.
pub(crate) async fn call_json<S>(app: &S, req: actix_http::Request) -> (u16, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let res = test::call_service(app, req).await;
    let status = res.status().as_u16();
    let body: Value = test::read_body_json(res).await;
    (status, body)
}

pub(crate) fn date(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").expect("valid date")
}

pub(crate) fn customer(customer_id: i64, name: &str, country: &str) -> Customer {
    Customer {
        customer_id,
        name: name.to_owned(),
        email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        country: country.to_owned(),
        signup_date: date("2024-01-15"),
    }
}

pub(crate) fn order(order_id: i64, customer_id: i64, amount: f64) -> Order {
    Order {
        order_id,
        customer_id,
        product_name: format!("Product {order_id}"),
        amount,
        order_date: date("2024-03-01"),
        status: OrderStatus::Completed,
    }
}
