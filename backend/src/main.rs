//! Back-office server entry point: loads settings, prepares storage, and
//! serves the import and report API.

mod server;

use std::io;

use actix_web::web;
use ortho_config::OrthoConfig as _;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backoffice::config::AppSettings;
use backoffice::inbound::http::health::HealthState;
use backoffice::outbound::persistence::{DbPool, run_pending_migrations};
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|err| io::Error::other(format!("load settings: {err}")))?;

    let mut config = ServerConfig::new(settings.bind_addr())
        .with_transaction_timeout(settings.transaction_timeout());

    match settings.pool_config() {
        Some(pool_config) => {
            info!(pool = ?pool_config, "connecting to PostgreSQL");
            let applied = run_pending_migrations(pool_config.database_url())
                .await
                .map_err(io::Error::other)?;
            info!(applied, "schema bootstrap complete");
            let pool = DbPool::new(pool_config)
                .await
                .map_err(|err| io::Error::other(format!("create database pool: {err}")))?;
            config = config.with_db_pool(pool);
        }
        None => warn!("no database URL configured; imported data is kept in memory only"),
    }

    let health_state = web::Data::new(HealthState::new(config.storage_mode()));
    let server = create_server(health_state.clone(), config)?;
    let result = server.await;
    health_state.mark_unhealthy();
    info!("server stopped");
    result
}
