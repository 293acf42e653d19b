//! PostgreSQL persistence adapters using Diesel.
//!
//! Repository implementations translate between Diesel rows and domain types
//! and contain no business logic. Row structs and `schema.rs` never leave this
//! module. Connections come from a shared `bb8` pool driven by `diesel-async`.
//!
//! ```no_run
//! use backoffice::outbound::persistence::{
//!     DbPool, DieselCustomerRepository, PoolConfig, run_pending_migrations,
//! };
//!
//! # async fn wire() -> Result<(), Box<dyn std::error::Error>> {
//! let url = "postgres://localhost/backoffice";
//! run_pending_migrations(url).await?;
//! let pool = DbPool::new(PoolConfig::new(url)).await?;
//! let customers = DieselCustomerRepository::new(pool);
//! # let _ = customers;
//! # Ok(())
//! # }
//! ```

mod diesel_basic_error_mapping;
mod diesel_customer_repository;
mod diesel_order_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_customer_repository::DieselCustomerRepository;
pub use diesel_order_repository::DieselOrderRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
