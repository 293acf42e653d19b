//! Envelope rendering for handler results and domain errors.
//!
//! Every response body is a [`ServiceResponse`] whose `statusCode` matches the
//! HTTP status line. Errors raised before a service runs (bad path or query
//! parameters, malformed uploads) render as a failure envelope with a null
//! payload.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use tracing::error;

use crate::domain::{Error, ErrorCode, ResponseStatus, ServiceResponse};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn http_status(status: ResponseStatus) -> StatusCode {
    StatusCode::from_u16(status.code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

/// Render `response` with the HTTP status carried in its envelope.
pub fn envelope_response<T: Serialize>(response: &ServiceResponse<T>) -> HttpResponse {
    HttpResponse::build(http_status(response.status())).json(response)
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        http_status(self.code().into())
    }

    fn error_response(&self) -> HttpResponse {
        if self.code() == ErrorCode::InternalError {
            error!(message = self.message(), "request failed with internal error");
        }
        envelope_response(&ServiceResponse::<()>::from_error(self, None))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("Internal server error")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use rstest::rstest;
    use serde_json::{Value, json};

    async fn body_of(response: HttpResponse) -> Value {
        let bytes = to_bytes(response.into_body()).await.expect("body bytes");
        serde_json::from_slice(&bytes).expect("json body")
    }

    #[rstest]
    #[case(Error::invalid_request("Invalid input: bad"), 400)]
    #[case(Error::conflict("Duplicate data detected"), 400)]
    #[case(Error::not_found("Customer not found"), 404)]
    #[case(Error::internal("Internal server error"), 500)]
    #[actix_web::test]
    async fn errors_render_as_failure_envelopes(#[case] error: Error, #[case] status: u16) {
        let response = error.error_response();
        assert_eq!(response.status().as_u16(), status);
        let body = body_of(response).await;
        assert_eq!(
            body,
            json!({
                "success": false,
                "message": error.message(),
                "responseObject": null,
                "statusCode": status,
            })
        );
    }

    #[actix_web::test]
    async fn envelope_status_drives_the_http_status() {
        let response = envelope_response(&ServiceResponse::success(
            "Successfully imported 1 customers",
            1_u32,
            ResponseStatus::Created,
        ));
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_of(response).await;
        assert_eq!(body["responseObject"], json!(1));
    }

    #[rstest]
    fn actix_errors_do_not_leak_detail() {
        let actix = actix_web::error::ErrorBadGateway("upstream exploded");
        let error = Error::from(actix);
        assert_eq!(error.code(), ErrorCode::InternalError);
        assert_eq!(error.message(), "Internal server error");
    }
}
