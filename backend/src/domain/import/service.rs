//! Import pipeline: parse, validate, write atomically, report.

use async_trait::async_trait;
use tracing::{error, info, warn};

use super::{
    BatchWriteError, BulkWriter, ImportResult, ImportTarget, RowError, parse_csv, validate_rows,
};
use crate::domain::ports::CsvImportCommand;
use crate::domain::{Error, ResponseStatus, ServiceResponse};

/// Why an import was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportFailure {
    /// The buffer contained malformed lines.
    Parse(Vec<String>),
    /// At least one row failed validation.
    Validation(Vec<RowError>),
    /// The atomic write failed.
    Write(BatchWriteError),
}

/// Import service shared by every [`ImportTarget`].
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use backoffice::domain::import::{CsvImportService, CustomerImport};
/// use backoffice::outbound::memory::InMemoryCustomerRepository;
///
/// let repository = Arc::new(InMemoryCustomerRepository::default());
/// let _service = CsvImportService::new(CustomerImport::new(repository));
/// ```
pub struct CsvImportService<T> {
    target: T,
    writer: BulkWriter,
}

impl<T: ImportTarget> CsvImportService<T> {
    /// Create a service with the default transaction time bound.
    pub fn new(target: T) -> Self {
        Self::with_writer(target, BulkWriter::default())
    }

    /// Create a service with an explicit writer.
    pub fn with_writer(target: T, writer: BulkWriter) -> Self {
        Self { target, writer }
    }

    /// Run the pipeline and return the number of records written.
    ///
    /// Parsing and validation never touch persisted state.
    ///
    /// # Errors
    ///
    /// Returns the first stage that rejected the batch.
    pub async fn import(&self, payload: &[u8]) -> Result<usize, ImportFailure> {
        let parsed = parse_csv(payload);
        if !parsed.is_clean() {
            return Err(ImportFailure::Parse(parsed.errors));
        }
        let records = validate_rows(&parsed.rows, T::parse_row).map_err(ImportFailure::Validation)?;
        self.writer
            .write(&self.target, &records)
            .await
            .map_err(ImportFailure::Write)
    }

    fn failure_response(failure: &ImportFailure) -> ServiceResponse<ImportResult> {
        let labels = T::LABELS;
        let (error, summary) = match failure {
            ImportFailure::Parse(errors) => {
                warn!(entity = labels.plural, errors = errors.len(), "CSV parsing failed");
                (
                    Error::invalid_request(format!("CSV parsing errors: {}", errors.join(", "))),
                    "CSV parsing failed".to_owned(),
                )
            }
            ImportFailure::Validation(errors) => {
                warn!(entity = labels.plural, errors = errors.len(), "CSV validation failed");
                let joined = errors
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                (
                    Error::invalid_request(format!("Validation errors: {joined}")),
                    "Validation failed".to_owned(),
                )
            }
            ImportFailure::Write(BatchWriteError::DuplicateId { message }) => {
                warn!(entity = labels.plural, %message, "duplicate ids rejected the batch");
                (
                    Error::conflict(labels.duplicate_id_message()),
                    format!("Duplicate {} IDs detected", labels.singular),
                )
            }
            ImportFailure::Write(BatchWriteError::DuplicateData { message }) => {
                warn!(entity = labels.plural, %message, "uniqueness conflict rejected the batch");
                (
                    Error::conflict(labels.duplicate_data_message()),
                    "Duplicate data detected".to_owned(),
                )
            }
            ImportFailure::Write(BatchWriteError::Failed { message }) => {
                error!(
                    operation = "import_csv",
                    entity = labels.plural,
                    %message,
                    "bulk import failed"
                );
                (
                    Error::internal(format!(
                        "An error occurred while importing {}",
                        labels.plural
                    )),
                    "Import failed".to_owned(),
                )
            }
        };
        ServiceResponse::from_error(&error, Some(ImportResult::failed(summary)))
    }
}

#[async_trait]
impl<T: ImportTarget> CsvImportCommand for CsvImportService<T> {
    async fn import_csv(&self, payload: &[u8]) -> ServiceResponse<ImportResult> {
        match self.import(payload).await {
            Ok(count) => {
                info!(entity = T::LABELS.plural, records = count, "CSV import committed");
                let result = ImportResult::imported(count, T::LABELS.plural);
                ServiceResponse::success(result.message.clone(), result, ResponseStatus::Created)
            }
            Err(failure) => Self::failure_response(&failure),
        }
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
