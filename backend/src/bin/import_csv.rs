//! Bulk-import a customer or order CSV file into PostgreSQL.
//!
//! Runs the same parse, validate, and atomic write pipeline as the upload
//! endpoints and prints the resulting envelope as JSON.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use backoffice::domain::import::BulkWriter;
use backoffice::domain::ports::{CsvImportCommand, CustomerRepository, OrderRepository};
use backoffice::domain::{CsvImportService, CustomerImport, ImportResult, OrderImport, ServiceResponse};
use backoffice::outbound::persistence::{
    DbPool, DieselCustomerRepository, DieselOrderRepository, PoolConfig, run_pending_migrations,
};
use clap::{Parser, ValueEnum};
use color_eyre::eyre::{Result, WrapErr, eyre};
use tokio::runtime::Builder;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

const DATABASE_URL_VARS: [&str; 2] = ["BACKOFFICE_DATABASE_URL", "DATABASE_URL"];

/// Which table the file feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Entity {
    Customers,
    Orders,
}

/// `import-csv` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "import-csv",
    about = "Import a customer or order CSV file as one all-or-nothing batch",
    version
)]
struct CliArgs {
    /// Kind of records in the file.
    #[arg(long, value_enum)]
    entity: Entity,
    /// Path to the CSV file (header row required).
    #[arg(value_name = "path")]
    file: PathBuf,
    /// Database connection URL. Falls back to `BACKOFFICE_DATABASE_URL`, then
    /// `DATABASE_URL`.
    #[arg(long = "database-url", value_name = "url")]
    database_url: Option<String>,
    /// Delete every existing row of the entity before importing.
    #[arg(long)]
    replace: bool,
    /// Upper bound on the import transaction, in seconds.
    #[arg(long = "transaction-timeout-secs", default_value_t = 30)]
    transaction_timeout_secs: u64,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init()
    {
        eprintln!("tracing init failed: {e}");
    }

    let args = CliArgs::parse();
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("create Tokio runtime")?;
    runtime.block_on(async_main(args))
}

async fn async_main(args: CliArgs) -> Result<()> {
    let payload = fs::read(&args.file)
        .wrap_err_with(|| format!("read CSV file '{}'", args.file.display()))?;
    let database_url = resolve_database_url(args.database_url.clone(), |var| env::var(var).ok())?;

    run_pending_migrations(&database_url)
        .await
        .wrap_err("apply schema migrations")?;
    let pool = DbPool::new(PoolConfig::new(&database_url).with_max_size(2))
        .await
        .wrap_err("create database pool")?;
    let writer = BulkWriter::new(Duration::from_secs(args.transaction_timeout_secs.max(1)));

    let command: Arc<dyn CsvImportCommand> = match args.entity {
        Entity::Customers => {
            let repository = Arc::new(DieselCustomerRepository::new(pool));
            if args.replace {
                let removed = repository
                    .delete_all()
                    .await
                    .wrap_err("delete existing customers")?;
                warn!(removed, "existing customers deleted before import");
            }
            Arc::new(CsvImportService::with_writer(CustomerImport::new(repository), writer))
        }
        Entity::Orders => {
            let repository = Arc::new(DieselOrderRepository::new(pool));
            if args.replace {
                let removed = repository
                    .delete_all()
                    .await
                    .wrap_err("delete existing orders")?;
                warn!(removed, "existing orders deleted before import");
            }
            Arc::new(CsvImportService::with_writer(OrderImport::new(repository), writer))
        }
    };

    let response = command.import_csv(&payload).await;
    println!(
        "{}",
        serde_json::to_string_pretty(&response).wrap_err("serialise import outcome")?
    );
    into_outcome(response)
}

fn into_outcome(response: ServiceResponse<ImportResult>) -> Result<()> {
    if response.is_success() {
        let imported = response
            .response_object()
            .map_or(0, |result| result.records_imported);
        info!(imported, "import committed");
        Ok(())
    } else {
        Err(eyre!(
            "import failed ({}): {}",
            response.status().code(),
            response.message()
        ))
    }
}

fn resolve_database_url(
    explicit: Option<String>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<String> {
    if let Some(value) = explicit {
        if value.trim().is_empty() {
            return Err(eyre!("--database-url must not be empty when provided"));
        }
        return Ok(value);
    }
    DATABASE_URL_VARS
        .iter()
        .filter_map(|var| lookup(var))
        .find(|value| !value.trim().is_empty())
        .ok_or_else(|| {
            eyre!("database URL missing: set --database-url, BACKOFFICE_DATABASE_URL, or DATABASE_URL")
        })
}

#[cfg(test)]
mod tests {
    //! Unit tests for argument handling and outcome reporting.

    use std::collections::HashMap;

    use backoffice::domain::ResponseStatus;
    use backoffice::outbound::memory::InMemoryCustomerRepository;
    use rstest::rstest;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[rstest]
    fn parses_entity_and_flags() {
        let args = CliArgs::try_parse_from([
            "import-csv",
            "--entity",
            "orders",
            "--replace",
            "orders.csv",
        ])
        .expect("valid arguments");
        assert_eq!(args.entity, Entity::Orders);
        assert!(args.replace);
        assert_eq!(args.file, PathBuf::from("orders.csv"));
        assert_eq!(args.transaction_timeout_secs, 30);
    }

    #[rstest]
    fn rejects_unknown_entity() {
        let result = CliArgs::try_parse_from(["import-csv", "--entity", "invoices", "x.csv"]);
        assert!(result.is_err());
    }

    #[rstest]
    fn explicit_url_wins() {
        let url = resolve_database_url(
            Some("postgres://cli/db".to_owned()),
            lookup(&[("DATABASE_URL", "postgres://env/db")]),
        )
        .expect("url");
        assert_eq!(url, "postgres://cli/db");
    }

    #[rstest]
    fn prefixed_variable_precedes_generic_one() {
        let url = resolve_database_url(
            None,
            lookup(&[
                ("BACKOFFICE_DATABASE_URL", "postgres://prefixed/db"),
                ("DATABASE_URL", "postgres://generic/db"),
            ]),
        )
        .expect("url");
        assert_eq!(url, "postgres://prefixed/db");
    }

    #[rstest]
    fn blank_values_are_skipped() {
        let url = resolve_database_url(
            None,
            lookup(&[("BACKOFFICE_DATABASE_URL", " "), ("DATABASE_URL", "postgres://generic/db")]),
        )
        .expect("url");
        assert_eq!(url, "postgres://generic/db");
    }

    #[rstest]
    fn missing_url_is_an_error() {
        assert!(resolve_database_url(None, lookup(&[])).is_err());
        assert!(resolve_database_url(Some("   ".to_owned()), lookup(&[])).is_err());
    }

    #[rstest]
    #[tokio::test]
    async fn successful_import_is_ok() {
        let service =
            CsvImportService::new(CustomerImport::new(Arc::new(InMemoryCustomerRepository::default())));
        let response = service
            .import_csv(b"customer_id,name,email,country,signup_date\n1,Ada,ada@example.com,UK,2024-01-15\n")
            .await;
        assert!(into_outcome(response).is_ok());
    }

    #[rstest]
    fn failed_import_reports_status_and_message() {
        let response = ServiceResponse::failure(
            "Validation errors: Row 0: Invalid email format",
            Some(ImportResult::failed("Validation failed")),
            ResponseStatus::BadRequest,
        );
        let err = into_outcome(response).expect_err("failure");
        assert!(err.to_string().contains("(400)"));
        assert!(err.to_string().contains("Invalid email format"));
    }
}
