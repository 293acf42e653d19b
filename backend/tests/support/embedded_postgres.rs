//! Fresh, migrated databases on an embedded cluster.
//!
//! `CREATE DATABASE` goes through the synchronous `postgres` client since it
//! cannot run inside a transaction. The schema comes from the crate's own
//! embedded Diesel migrations.

use backoffice::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use pg_embedded_setup_unpriv::TestCluster;
use postgres::{Client, NoTls};
use tokio::runtime::Runtime;
use uuid::Uuid;

use super::format_postgres_error;

/// Maintenance database every cluster ships with.
const ADMIN_DATABASE: &str = "postgres";

/// Create an empty database with a unique name and return its URL.
///
/// # Errors
///
/// Returns a rendered `postgres` error when the connection or DDL fails.
pub fn create_database(cluster: &TestCluster) -> Result<String, String> {
    let connection = cluster.connection();
    let name = format!("backoffice_test_{}", Uuid::new_v4().simple());
    let mut client = Client::connect(&connection.database_url(ADMIN_DATABASE), NoTls)
        .map_err(|err| format_postgres_error(&err))?;
    client
        .batch_execute(&format!("CREATE DATABASE \"{name}\";"))
        .map_err(|err| format_postgres_error(&err))?;
    Ok(connection.database_url(&name))
}

/// Create a database, apply migrations, and open a small pool on it.
///
/// # Errors
///
/// Returns the first failure rendered as text.
pub fn migrated_pool(cluster: &TestCluster, runtime: &Runtime) -> Result<DbPool, String> {
    let url = create_database(cluster)?;
    runtime.block_on(async {
        run_pending_migrations(&url)
            .await
            .map_err(|err| err.to_string())?;
        DbPool::new(PoolConfig::new(&url).with_max_size(2))
            .await
            .map_err(|err| err.to_string())
    })
}
