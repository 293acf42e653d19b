//! Customer CSV layout and import target.
//!
//! Columns: `customer_id,name,email,country,signup_date`.

use std::sync::Arc;

use async_trait::async_trait;

use super::validation::{FieldReader, is_valid_email};
use super::{BatchWriteError, EntityLabels, ImportTarget, ParsedRow};
use crate::domain::Customer;
use crate::domain::ports::{CustomerRepository, CustomerRepositoryError};

/// Imports customers into a [`CustomerRepository`].
pub struct CustomerImport<R> {
    repository: Arc<R>,
}

impl<R> CustomerImport<R> {
    /// Create a target writing through `repository`.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

impl From<CustomerRepositoryError> for BatchWriteError {
    fn from(error: CustomerRepositoryError) -> Self {
        match error {
            CustomerRepositoryError::DuplicateId { message } => Self::DuplicateId { message },
            CustomerRepositoryError::Conflict { message } => Self::DuplicateData { message },
            other => Self::Failed {
                message: other.to_string(),
            },
        }
    }
}

#[async_trait]
impl<R> ImportTarget for CustomerImport<R>
where
    R: CustomerRepository + 'static,
{
    type Record = Customer;

    const LABELS: EntityLabels = EntityLabels {
        singular: "customer",
        plural: "customers",
        id_column: "customer_id",
    };

    fn parse_row(row: &ParsedRow) -> Result<Customer, Vec<String>> {
        let mut reader = FieldReader::new(row);
        let customer_id = reader.integer("customer_id");
        let name = reader.text("name");
        let email = reader.text("email");
        if let Some(email) = email {
            reader.check(is_valid_email(email), "Invalid email format");
        }
        let country = reader.text("country");
        let signup_date = reader.date("signup_date");

        reader.finish(|| {
            Some(Customer {
                customer_id: customer_id?,
                name: name?.to_owned(),
                email: email?.to_owned(),
                country: country?.to_owned(),
                signup_date: signup_date?,
            })
        })
    }

    async fn write_batch(&self, records: &[Customer]) -> Result<usize, BatchWriteError> {
        Ok(self.repository.insert_many(records).await?)
    }
}
