//! Customer entity.

use chrono::NaiveDate;

/// A customer imported from a bulk export.
///
/// `customer_id` is the business identifier supplied by the CSV file and is
/// unique across the collection; storage-assigned keys never leave the
/// persistence adapter.
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    /// Business identifier, unique across customers.
    pub customer_id: i64,
    /// Display name.
    pub name: String,
    /// Contact email in `local@domain.tld` shape.
    pub email: String,
    /// Country label used for report filtering.
    pub country: String,
    /// Calendar date the customer signed up.
    pub signup_date: NaiveDate,
}
