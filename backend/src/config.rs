//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `BACKOFFICE_*` environment variables, or a
//! configuration file, in the usual OrthoConfig precedence.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::persistence::PoolConfig;

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

/// Settings shared by the server and the `import-csv` tool.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BACKOFFICE")]
pub struct AppSettings {
    /// Interface to bind; defaults to all interfaces.
    pub host: Option<IpAddr>,
    /// TCP port to bind.
    #[ortho_config(default = 8080)]
    pub port: u16,
    /// PostgreSQL connection string. Without one, data lives in memory.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    #[ortho_config(default = 10)]
    pub pool_max_size: u32,
    /// Upper bound on one import transaction, in seconds.
    #[ortho_config(default = 30)]
    pub transaction_timeout_secs: u64,
}

impl AppSettings {
    /// Address the HTTP server binds to.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host.unwrap_or(DEFAULT_HOST), self.port)
    }

    /// Configured database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Pool configuration when a database is configured.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        self.database_url()
            .map(|url| PoolConfig::new(url).with_max_size(self.pool_max_size))
    }

    /// Time bound applied to each bulk import.
    pub fn transaction_timeout(&self) -> Duration {
        Duration::from_secs(self.transaction_timeout_secs.max(1))
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 5] = [
        "BACKOFFICE_HOST",
        "BACKOFFICE_PORT",
        "BACKOFFICE_DATABASE_URL",
        "BACKOFFICE_POOL_MAX_SIZE",
        "BACKOFFICE_TRANSACTION_TIMEOUT_SECS",
    ];

    fn load_from_args(args: &[&str]) -> AppSettings {
        let argv = std::iter::once(OsString::from("backoffice"))
            .chain(args.iter().map(OsString::from));
        AppSettings::load_from_iter(argv).expect("config should load")
    }

    #[rstest]
    fn defaults_are_used_when_missing() {
        let _guard = lock_env(VARS.map(|var| (var, None::<String>)));

        let settings = load_from_args(&[]);
        assert_eq!(settings.bind_addr(), "0.0.0.0:8080".parse().expect("addr"));
        assert!(settings.database_url().is_none());
        assert!(settings.pool_config().is_none());
        assert_eq!(settings.pool_max_size, 10);
        assert_eq!(settings.transaction_timeout(), Duration::from_secs(30));
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("BACKOFFICE_HOST", Some("127.0.0.1".to_owned())),
            ("BACKOFFICE_PORT", Some("9090".to_owned())),
            (
                "BACKOFFICE_DATABASE_URL",
                Some("postgres://app@localhost/backoffice".to_owned()),
            ),
            ("BACKOFFICE_POOL_MAX_SIZE", Some("4".to_owned())),
            ("BACKOFFICE_TRANSACTION_TIMEOUT_SECS", Some("5".to_owned())),
        ]);

        let settings = load_from_args(&[]);
        assert_eq!(settings.bind_addr(), "127.0.0.1:9090".parse().expect("addr"));
        let pool = settings.pool_config().expect("pool configured");
        assert_eq!(pool.database_url(), "postgres://app@localhost/backoffice");
        assert_eq!(pool.max_size(), 4);
        assert_eq!(settings.transaction_timeout(), Duration::from_secs(5));
    }

    #[rstest]
    fn blank_database_url_means_in_memory() {
        let _guard = lock_env(VARS.map(|var| {
            let value = (var == "BACKOFFICE_DATABASE_URL").then(|| "   ".to_owned());
            (var, value)
        }));

        let settings = load_from_args(&[]);
        assert!(settings.database_url().is_none());
    }

    #[rstest]
    fn cli_flags_override_environment() {
        let _guard = lock_env([
            ("BACKOFFICE_HOST", None::<String>),
            ("BACKOFFICE_PORT", Some("9090".to_owned())),
            ("BACKOFFICE_DATABASE_URL", None),
            ("BACKOFFICE_POOL_MAX_SIZE", None),
            ("BACKOFFICE_TRANSACTION_TIMEOUT_SECS", None),
        ]);

        let settings = load_from_args(&["--port", "7070"]);
        assert_eq!(settings.port, 7070);
    }
}
