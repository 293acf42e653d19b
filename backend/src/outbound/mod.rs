//! Outbound adapters implementing the repository ports.
//!
//! - **persistence**: PostgreSQL repositories using Diesel
//! - **memory**: process-local repositories used when no database is
//!   configured and in tests

pub mod memory;
pub mod persistence;
