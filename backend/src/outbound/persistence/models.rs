//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::NaiveDate;
use diesel::prelude::*;

use super::schema::{customers, orders};
use crate::domain::{Customer, Order};

/// Row struct for reading from the customers table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = customers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CustomerRow {
    pub customer_id: i64,
    pub name: String,
    pub email: String,
    pub country: String,
    pub signup_date: NaiveDate,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Self {
            customer_id: row.customer_id,
            name: row.name,
            email: row.email,
            country: row.country,
            signup_date: row.signup_date,
        }
    }
}

/// Insertable struct for creating customer records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = customers)]
pub(crate) struct NewCustomerRow<'a> {
    pub customer_id: i64,
    pub name: &'a str,
    pub email: &'a str,
    pub country: &'a str,
    pub signup_date: NaiveDate,
}

impl<'a> From<&'a Customer> for NewCustomerRow<'a> {
    fn from(customer: &'a Customer) -> Self {
        Self {
            customer_id: customer.customer_id,
            name: &customer.name,
            email: &customer.email,
            country: &customer.country,
            signup_date: customer.signup_date,
        }
    }
}

/// Row struct for reading from the orders table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct OrderRow {
    pub order_id: i64,
    pub customer_id: i64,
    pub product_name: String,
    pub amount: f64,
    pub order_date: NaiveDate,
    pub status: String,
}

impl TryFrom<OrderRow> for Order {
    type Error = crate::domain::UnknownOrderStatus;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        Ok(Self {
            order_id: row.order_id,
            customer_id: row.customer_id,
            product_name: row.product_name,
            amount: row.amount,
            order_date: row.order_date,
            status: row.status.parse()?,
        })
    }
}

/// Insertable struct for creating order records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = orders)]
pub(crate) struct NewOrderRow<'a> {
    pub order_id: i64,
    pub customer_id: i64,
    pub product_name: &'a str,
    pub amount: f64,
    pub order_date: NaiveDate,
    pub status: &'static str,
}

impl<'a> From<&'a Order> for NewOrderRow<'a> {
    fn from(order: &'a Order) -> Self {
        Self {
            order_id: order.order_id,
            customer_id: order.customer_id,
            product_name: &order.product_name,
            amount: order.amount,
            order_date: order.order_date,
            status: order.status.as_str(),
        }
    }
}
