//! CSV upload endpoints.
//!
//! ```text
//! POST /api/upload/customers   multipart field `file`
//! POST /api/upload/orders      multipart field `file`
//! ```
//!
//! Both hand the uploaded bytes to a [`CsvImportCommand`] and render its
//! envelope. Rejections that happen before the import runs still answer with
//! an [`ImportResult`] payload so clients can read one shape.

use actix_multipart::MultipartError;
use actix_multipart::form::bytes::Bytes;
use actix_multipart::form::{MultipartForm, MultipartFormConfig};
use actix_web::{
    HttpMessage as _, HttpRequest, HttpResponse, ResponseError, http::StatusCode, mime, post, web,
};
use tracing::{info, warn};

use crate::domain::ports::CsvImportCommand;
use crate::domain::{ImportResult, ResponseStatus, ServiceResponse};
use crate::inbound::http::envelope_response;
use crate::inbound::http::schemas::{CsvUploadSchema, ImportEnvelopeSchema};
use crate::inbound::http::state::HttpState;

/// Largest accepted file.
pub const UPLOAD_LIMIT_BYTES: usize = 10 * 1024 * 1024;
// Multipart boundaries and part headers on top of the file itself.
const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

pub(crate) const NO_FILE: &str = "No file uploaded";
pub(crate) const NOT_CSV: &str = "Only CSV files are allowed";
pub(crate) const BAD_UPLOAD: &str = "Invalid file upload. Send one CSV file of at most 10MB in the `file` field";

/// Multipart body accepted by the upload endpoints.
#[derive(MultipartForm)]
pub struct CsvUploadForm {
    /// The CSV document.
    #[multipart(limit = "10MiB")]
    pub file: Option<Bytes>,
}

/// An upload refused before it reached the import pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct UploadRejection {
    message: &'static str,
}

impl UploadRejection {
    const fn new(message: &'static str) -> Self {
        Self { message }
    }
}

impl ResponseError for UploadRejection {
    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    fn error_response(&self) -> HttpResponse {
        envelope_response(&ServiceResponse::failure(
            self.message,
            Some(ImportResult::failed(self.message)),
            ResponseStatus::BadRequest,
        ))
    }
}

/// Multipart limits and rejection rendering shared by both upload routes.
pub fn multipart_config() -> MultipartFormConfig {
    MultipartFormConfig::default()
        .total_limit(UPLOAD_LIMIT_BYTES + FORM_OVERHEAD_BYTES)
        .memory_limit(UPLOAD_LIMIT_BYTES + FORM_OVERHEAD_BYTES)
        .error_handler(reject_multipart)
}

fn reject_multipart(error: MultipartError, req: &HttpRequest) -> actix_web::Error {
    let rejection = match &error {
        MultipartError::ContentTypeMissing | MultipartError::ContentTypeIncompatible => {
            UploadRejection::new(NO_FILE)
        }
        _ => UploadRejection::new(BAD_UPLOAD),
    };
    warn!(%error, path = req.path(), "multipart upload rejected");
    rejection.into()
}

fn has_csv_extension(file_name: &str) -> bool {
    file_name.to_ascii_lowercase().ends_with(".csv")
}

fn is_multipart_form(req: &HttpRequest) -> bool {
    matches!(
        req.mime_type(),
        Ok(Some(content_type))
            if content_type.type_() == mime::MULTIPART && content_type.subtype() == mime::FORM_DATA
    )
}

/// Unwrap the extracted form, turning extractor failures into rejections.
///
/// Requests that are not `multipart/form-data` carry no file at all; other
/// failures were already classified by [`reject_multipart`].
fn accept_form(
    req: &HttpRequest,
    form: Result<MultipartForm<CsvUploadForm>, actix_web::Error>,
) -> Result<CsvUploadForm, UploadRejection> {
    match form {
        Ok(MultipartForm(form)) => Ok(form),
        Err(_) if !is_multipart_form(req) => Err(UploadRejection::new(NO_FILE)),
        Err(error) => Err(error
            .as_error::<UploadRejection>()
            .copied()
            .unwrap_or(UploadRejection::new(BAD_UPLOAD))),
    }
}

fn accept_csv(form: CsvUploadForm) -> Result<Bytes, UploadRejection> {
    let file = form.file.ok_or(UploadRejection::new(NO_FILE))?;
    match file.file_name.as_deref() {
        Some(name) if has_csv_extension(name) => Ok(file),
        _ => Err(UploadRejection::new(NOT_CSV)),
    }
}

async fn import_upload(
    entity: &'static str,
    command: &dyn CsvImportCommand,
    req: &HttpRequest,
    form: Result<MultipartForm<CsvUploadForm>, actix_web::Error>,
) -> HttpResponse {
    let file = match accept_form(req, form).and_then(accept_csv) {
        Ok(file) => file,
        Err(rejection) => {
            warn!(entity, reason = rejection.message, "upload rejected");
            return rejection.error_response();
        }
    };
    info!(
        entity,
        file_name = file.file_name.as_deref().unwrap_or_default(),
        bytes = file.data.len(),
        "csv upload received"
    );
    let response = command.import_csv(&file.data).await;
    envelope_response(&response)
}

/// Import a customer CSV.
#[utoipa::path(
    post,
    path = "/api/upload/customers",
    request_body(content = CsvUploadSchema, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "All rows imported", body = ImportEnvelopeSchema),
        (status = 400, description = "Missing or non-CSV file, parse, validation, or duplicate failure", body = ImportEnvelopeSchema),
        (status = 500, description = "Import failed", body = ImportEnvelopeSchema)
    ),
    tags = ["uploads"],
    operation_id = "uploadCustomers"
)]
#[post("/upload/customers")]
pub async fn upload_customers(
    state: web::Data<HttpState>,
    req: HttpRequest,
    form: Result<MultipartForm<CsvUploadForm>, actix_web::Error>,
) -> HttpResponse {
    import_upload("customers", state.customer_import.as_ref(), &req, form).await
}

/// Import an order CSV.
#[utoipa::path(
    post,
    path = "/api/upload/orders",
    request_body(content = CsvUploadSchema, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "All rows imported", body = ImportEnvelopeSchema),
        (status = 400, description = "Missing or non-CSV file, parse, validation, or duplicate failure", body = ImportEnvelopeSchema),
        (status = 500, description = "Import failed", body = ImportEnvelopeSchema)
    ),
    tags = ["uploads"],
    operation_id = "uploadOrders"
)]
#[post("/upload/orders")]
pub async fn upload_orders(
    state: web::Data<HttpState>,
    req: HttpRequest,
    form: Result<MultipartForm<CsvUploadForm>, actix_web::Error>,
) -> HttpResponse {
    import_upload("orders", state.order_import.as_ref(), &req, form).await
}

#[cfg(test)]
#[path = "uploads_tests.rs"]
mod tests;
