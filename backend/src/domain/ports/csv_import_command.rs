//! Driving port for bulk CSV imports.

use async_trait::async_trait;

use crate::domain::{ImportResult, ServiceResponse};

/// Use-case port that imports one uploaded CSV payload.
///
/// Implementations never return `Err`: every failure is reported inside the
/// envelope, with an [`ImportResult`] payload describing it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CsvImportCommand: Send + Sync {
    /// Parse, validate, and atomically persist `payload`.
    async fn import_csv(&self, payload: &[u8]) -> ServiceResponse<ImportResult>;
}
