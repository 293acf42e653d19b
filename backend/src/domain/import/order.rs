//! Order CSV layout and import target.
//!
//! Columns: `order_id,customer_id,product_name,amount,order_date,status`.

use std::sync::Arc;

use async_trait::async_trait;

use super::validation::FieldReader;
use super::{BatchWriteError, EntityLabels, ImportTarget, ParsedRow};
use crate::domain::ports::{OrderRepository, OrderRepositoryError};
use crate::domain::{Order, OrderStatus};

const INVALID_STATUS: &str = "Invalid status. Must be one of: completed, pending, shipped";
const INVALID_AMOUNT: &str = "Amount must be a valid number";

/// Imports orders into an [`OrderRepository`].
pub struct OrderImport<R> {
    repository: Arc<R>,
}

impl<R> OrderImport<R> {
    /// Create a target writing through `repository`.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

impl From<OrderRepositoryError> for BatchWriteError {
    fn from(error: OrderRepositoryError) -> Self {
        match error {
            OrderRepositoryError::DuplicateId { message } => Self::DuplicateId { message },
            OrderRepositoryError::Conflict { message } => Self::DuplicateData { message },
            other => Self::Failed {
                message: other.to_string(),
            },
        }
    }
}

#[async_trait]
impl<R> ImportTarget for OrderImport<R>
where
    R: OrderRepository + 'static,
{
    type Record = Order;

    const LABELS: EntityLabels = EntityLabels {
        singular: "order",
        plural: "orders",
        id_column: "order_id",
    };

    fn parse_row(row: &ParsedRow) -> Result<Order, Vec<String>> {
        let mut reader = FieldReader::new(row);
        let order_id = reader.integer("order_id");
        let customer_id = reader.integer("customer_id");
        let product_name = reader.text("product_name");
        // Non-negativity is deliberately not enforced.
        let amount = reader.decimal("amount", INVALID_AMOUNT);
        let order_date = reader.date("order_date");
        let status = reader
            .text("status")
            .and_then(|raw| raw.parse::<OrderStatus>().ok());
        if row.field("status").is_some() {
            reader.check(status.is_some(), INVALID_STATUS);
        }

        reader.finish(|| {
            Some(Order {
                order_id: order_id?,
                customer_id: customer_id?,
                product_name: product_name?.to_owned(),
                amount: amount?,
                order_date: order_date?,
                status: status?,
            })
        })
    }

    async fn write_batch(&self, records: &[Order]) -> Result<usize, BatchWriteError> {
        Ok(self.repository.insert_many(records).await?)
    }
}
