//! Application settings loaded via OrthoConfig.
//!
//! Values come from `CAR_RENTAL_*` environment variables, command-line flags,
//! and configuration files, in OrthoConfig's usual precedence.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::password::DEFAULT_BCRYPT_COST;

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// Settings that shape the running server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CAR_RENTAL")]
pub struct AppSettings {
    /// Interface to bind.
    pub host: Option<IpAddr>,
    /// TCP port to bind.
    pub port: Option<u16>,
    /// PostgreSQL connection string. Without it the server keeps all state
    /// in memory.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Apply embedded migrations at startup.
    pub run_migrations: Option<bool>,
    /// bcrypt work factor for new password hashes.
    pub bcrypt_cost: Option<u32>,
    /// JSON file of cars to seed into the in-memory store.
    pub car_fixtures: Option<PathBuf>,
}

impl AppSettings {
    /// Socket address the HTTP server binds to.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(
            self.host.unwrap_or(DEFAULT_HOST),
            self.port.unwrap_or(DEFAULT_PORT),
        )
    }

    /// PostgreSQL URL, or `None` when unset or blank.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref().filter(|url| !url.trim().is_empty())
    }

    /// Pool size, 10 unless configured.
    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections.unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }

    /// Whether to apply pending migrations at startup; on unless disabled.
    pub fn run_migrations(&self) -> bool {
        self.run_migrations.unwrap_or(true)
    }

    /// bcrypt work factor for new hashes.
    pub fn bcrypt_cost(&self) -> u32 {
        self.bcrypt_cost.unwrap_or(DEFAULT_BCRYPT_COST)
    }

    /// Optional JSON file of cars to seed the in-memory store with.
    pub fn car_fixtures(&self) -> Option<&Path> {
        self.car_fixtures.as_deref()
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 7] = [
        "CAR_RENTAL_HOST",
        "CAR_RENTAL_PORT",
        "CAR_RENTAL_DATABASE_URL",
        "CAR_RENTAL_DB_MAX_CONNECTIONS",
        "CAR_RENTAL_RUN_MIGRATIONS",
        "CAR_RENTAL_BCRYPT_COST",
        "CAR_RENTAL_CAR_FIXTURES",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("car-rental")]).expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();

        assert_eq!(settings.bind_addr(), "0.0.0.0:8080".parse().expect("addr"));
        assert_eq!(settings.database_url(), None);
        assert_eq!(settings.db_max_connections(), 10);
        assert!(settings.run_migrations());
        assert_eq!(settings.bcrypt_cost(), 10);
        assert_eq!(settings.car_fixtures(), None);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("CAR_RENTAL_HOST", Some("127.0.0.1".to_owned())),
            ("CAR_RENTAL_PORT", Some("9000".to_owned())),
            (
                "CAR_RENTAL_DATABASE_URL",
                Some("postgres://localhost/rentals".to_owned()),
            ),
            ("CAR_RENTAL_DB_MAX_CONNECTIONS", Some("4".to_owned())),
            ("CAR_RENTAL_RUN_MIGRATIONS", Some("false".to_owned())),
            ("CAR_RENTAL_BCRYPT_COST", Some("12".to_owned())),
            ("CAR_RENTAL_CAR_FIXTURES", Some("/tmp/cars.json".to_owned())),
        ]);

        let settings = load_from_empty_args();

        assert_eq!(settings.bind_addr(), "127.0.0.1:9000".parse().expect("addr"));
        assert_eq!(
            settings.database_url(),
            Some("postgres://localhost/rentals")
        );
        assert_eq!(settings.db_max_connections(), 4);
        assert!(!settings.run_migrations());
        assert_eq!(settings.bcrypt_cost(), 12);
        assert_eq!(settings.car_fixtures(), Some(Path::new("/tmp/cars.json")));
    }

    #[rstest]
    fn blank_database_url_selects_memory_store() {
        let mut vars = VARS.map(|name| (name, None::<String>));
        vars[2] = ("CAR_RENTAL_DATABASE_URL", Some("  ".to_owned()));
        let _guard = lock_env(vars);

        assert_eq!(load_from_empty_args().database_url(), None);
    }
}
