//! Atomic batch persistence with bounded lifetime.
//!
//! Targets own the transaction boundary (a database transaction, or a single
//! lock for in-memory stores). [`BulkWriter`] adds the time bound: when it
//! elapses the write future is dropped, which releases the connection and
//! rolls back the open transaction.

use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use super::{EntityLabels, ParsedRow};

/// Classified failure of an atomic batch write.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BatchWriteError {
    /// The batch repeats a business id or collides with a stored one.
    #[error("duplicate id: {message}")]
    DuplicateId {
        /// Adapter detail, for logs only.
        message: String,
    },
    /// Some other uniqueness constraint rejected the batch.
    #[error("duplicate data: {message}")]
    DuplicateData {
        /// Adapter detail, for logs only.
        message: String,
    },
    /// Any other failure, including an elapsed time bound.
    #[error("batch write failed: {message}")]
    Failed {
        /// Adapter detail, for logs only.
        message: String,
    },
}

/// An entity that can be imported from CSV and written in one atomic batch.
#[async_trait]
pub trait ImportTarget: Send + Sync {
    /// Typed record produced from one valid row.
    type Record: Send + Sync;

    /// Naming used in caller-facing messages.
    const LABELS: EntityLabels;

    /// Validate and coerce one row.
    ///
    /// # Errors
    ///
    /// Returns every problem found in the row.
    fn parse_row(row: &ParsedRow) -> Result<Self::Record, Vec<String>>;

    /// Persist `records` atomically: all or nothing.
    async fn write_batch(&self, records: &[Self::Record]) -> Result<usize, BatchWriteError>;
}

/// Applies the transaction time bound to [`ImportTarget::write_batch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulkWriter {
    timeout: Duration,
}

impl Default for BulkWriter {
    fn default() -> Self {
        Self::new(Duration::from_secs(30))
    }
}

impl BulkWriter {
    /// Create a writer bounding each batch by `timeout`.
    #[must_use]
    pub const fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Configured time bound.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Write `records` through `target`, failing when the bound elapses.
    ///
    /// Empty batches succeed without touching the target.
    ///
    /// # Errors
    ///
    /// Propagates the target's classified error, or
    /// [`BatchWriteError::Failed`] on timeout.
    pub async fn write<T: ImportTarget>(
        &self,
        target: &T,
        records: &[T::Record],
    ) -> Result<usize, BatchWriteError> {
        if records.is_empty() {
            return Ok(0);
        }
        match tokio::time::timeout(self.timeout, target.write_batch(records)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    entity = T::LABELS.plural,
                    batch_size = records.len(),
                    timeout_ms = self.timeout.as_millis(),
                    "bulk write exceeded its time bound; transaction abandoned"
                );
                Err(BatchWriteError::Failed {
                    message: format!("transaction exceeded {:?}", self.timeout),
                })
            }
        }
    }
}
