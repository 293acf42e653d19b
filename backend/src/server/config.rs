//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::time::Duration;

use backoffice::domain::import::BulkWriter;
use backoffice::inbound::http::health::StorageMode;
use backoffice::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) transaction_timeout: Duration,
}

impl ServerConfig {
    /// Configuration binding `bind_addr` with in-memory storage.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            db_pool: None,
            transaction_timeout: BulkWriter::default().timeout(),
        }
    }

    /// Attach a database pool; repositories become Diesel-backed.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Bound each import transaction by `timeout`.
    #[must_use]
    pub fn with_transaction_timeout(mut self, timeout: Duration) -> Self {
        self.transaction_timeout = timeout;
        self
    }

    /// Storage backend the server will wire.
    #[must_use]
    pub fn storage_mode(&self) -> StorageMode {
        if self.db_pool.is_some() {
            StorageMode::Postgres
        } else {
            StorageMode::Memory
        }
    }

    /// Writer applying the configured transaction bound.
    #[must_use]
    pub fn bulk_writer(&self) -> BulkWriter {
        BulkWriter::new(self.transaction_timeout)
    }
}
