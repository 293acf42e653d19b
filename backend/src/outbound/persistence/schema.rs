//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `migrations/` exactly. Surrogate `id` keys
//! stay inside the adapter; the domain only sees business ids.

diesel::table! {
    /// Imported customers.
    customers (id) {
        /// Surrogate key.
        id -> Int8,
        /// Business id, unique (`customers_customer_id_key`).
        customer_id -> Int8,
        /// Display name.
        name -> Text,
        /// Contact email.
        email -> Text,
        /// Country label, indexed for report filtering.
        country -> Text,
        /// Signup date.
        signup_date -> Date,
    }
}

diesel::table! {
    /// Imported orders.
    orders (id) {
        /// Surrogate key.
        id -> Int8,
        /// Business id, unique (`orders_order_id_key`).
        order_id -> Int8,
        /// Purchasing customer business id, indexed; not a foreign key.
        customer_id -> Int8,
        /// Product label.
        product_name -> Text,
        /// Order value.
        amount -> Float8,
        /// Order date.
        order_date -> Date,
        /// One of `completed`, `pending`, `shipped`.
        status -> Text,
    }
}

diesel::allow_tables_to_appear_in_same_query!(customers, orders);
