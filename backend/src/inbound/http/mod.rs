//! HTTP inbound adapter exposing the upload, report, and health endpoints.

pub mod error;
pub mod health;
pub mod reports;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub(crate) mod test_utils;
pub mod uploads;
pub mod validation;

use actix_web::web;
use tracing::debug;

pub use error::{ApiResult, envelope_response};

use crate::domain::Error;

/// Register the `/api` routes and their extractor configuration.
///
/// Callers supply `web::Data<HttpState>` on the enclosing `App`.
///
/// ```
/// use actix_web::App;
/// use backoffice::inbound::http::configure_api;
///
/// let _app = App::new().configure(configure_api);
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    let query_config = web::QueryConfig::default().error_handler(|err, _req| {
        debug!(error = %err, "query string rejected");
        Error::invalid_request(format!("Invalid input: {err}")).into()
    });

    cfg.service(
        web::scope("/api")
            .app_data(uploads::multipart_config())
            .app_data(query_config)
            .service(uploads::upload_customers)
            .service(uploads::upload_orders)
            .service(reports::customer_summary)
            .service(reports::customer_orders_report),
    );
}
