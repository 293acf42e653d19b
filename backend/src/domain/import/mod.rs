//! CSV ingestion of customers and orders.
//!
//! Uploaded bytes flow through [`parse_csv`], then [`validate_rows`], then a
//! [`BulkWriter`] into the entity repository. A batch is all or nothing.

mod bulk_writer;
mod customer;
mod order;
mod parser;
mod service;
mod validation;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub use bulk_writer::{BatchWriteError, BulkWriter, ImportTarget};
pub use customer::CustomerImport;
pub use order::OrderImport;
pub use parser::{CsvParseOutcome, ParsedRow, parse_csv};
pub use service::{CsvImportService, ImportFailure};
pub use validation::{DATE_FORMAT, RowError, validate_rows};

/// Import service for customers.
pub type CustomerImportService<R> = CsvImportService<CustomerImport<R>>;
/// Import service for orders.
pub type OrderImportService<R> = CsvImportService<OrderImport<R>>;

/// Names used when describing an entity in import messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityLabels {
    /// Singular noun, e.g. `order`.
    pub singular: &'static str,
    /// Plural noun, e.g. `orders`.
    pub plural: &'static str,
    /// Business id column, e.g. `order_id`.
    pub id_column: &'static str,
}

impl EntityLabels {
    pub(crate) fn duplicate_id_message(self) -> String {
        format!(
            "Duplicate {singular} IDs found. Each {singular} must have a unique {column}. \
             Please check your CSV file for duplicate entries or remove existing data first.",
            singular = self.singular,
            column = self.id_column,
        )
    }

    pub(crate) fn duplicate_data_message(self) -> String {
        format!(
            "Duplicate data detected. Please ensure all {} IDs and other unique fields are unique.",
            self.singular
        )
    }
}

/// Outcome payload of one import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImportResult {
    /// Whether the batch was committed.
    pub success: bool,
    /// Number of records written; zero on failure.
    #[schema(example = 2)]
    pub records_imported: usize,
    /// Short outcome description.
    #[schema(example = "Successfully imported 2 customers")]
    pub message: String,
}

impl ImportResult {
    /// Successful import of `count` records.
    #[must_use]
    pub fn imported(count: usize, plural: &str) -> Self {
        Self {
            success: true,
            records_imported: count,
            message: format!("Successfully imported {count} {plural}"),
        }
    }

    /// Rejected import.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            records_imported: 0,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn order_duplicate_message_matches_remediation_text() {
        let labels = EntityLabels {
            singular: "order",
            plural: "orders",
            id_column: "order_id",
        };
        assert_eq!(
            labels.duplicate_id_message(),
            "Duplicate order IDs found. Each order must have a unique order_id. Please check \
             your CSV file for duplicate entries or remove existing data first."
        );
    }

    #[rstest]
    fn import_result_serialises_in_camel_case() {
        let value = serde_json::to_value(ImportResult::imported(2, "customers"))
            .expect("serialise import result");
        assert_eq!(value["recordsImported"], 2);
        assert_eq!(value["message"], "Successfully imported 2 customers");
    }
}
