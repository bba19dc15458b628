//! Process configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, `DEENIFY_*` environment variables and config
//! files, in that order of precedence.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// Top-level server settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "DEENIFY")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. Courses are kept in memory when absent.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Apply embedded migrations at startup.
    #[ortho_config(default = true)]
    pub run_migrations: bool,
}

impl AppSettings {
    /// Parsed listen address, falling back to the default.
    pub fn bind_addr(&self) -> std::io::Result<SocketAddr> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|err| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid DEENIFY_BIND_ADDR '{raw}': {err}"),
            )
        })
    }

    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
            .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }

    /// Database URL with blank values treated as unset.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 4] = [
        "DEENIFY_BIND_ADDR",
        "DEENIFY_DATABASE_URL",
        "DEENIFY_DB_MAX_CONNECTIONS",
        "DEENIFY_RUN_MIGRATIONS",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("deenify-backend")])
            .expect("config should load")
    }

    #[rstest]
    fn defaults_use_memory_storage() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("default address parses"),
            DEFAULT_BIND_ADDR.parse::<SocketAddr>().expect("valid literal")
        );
        assert!(settings.database_url().is_none());
        assert_eq!(settings.db_max_connections(), DEFAULT_DB_MAX_CONNECTIONS);
        assert!(settings.run_migrations);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("DEENIFY_BIND_ADDR", Some("127.0.0.1:9090".to_owned())),
            (
                "DEENIFY_DATABASE_URL",
                Some("postgres://localhost/deenify".to_owned()),
            ),
            ("DEENIFY_DB_MAX_CONNECTIONS", Some("4".to_owned())),
            ("DEENIFY_RUN_MIGRATIONS", Some("false".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("override parses").port(),
            9090
        );
        assert_eq!(
            settings.database_url(),
            Some("postgres://localhost/deenify")
        );
        assert_eq!(settings.db_max_connections(), 4);
        assert!(!settings.run_migrations);
    }

    #[rstest]
    fn invalid_bind_addr_is_reported() {
        let _guard = lock_env([
            ("DEENIFY_BIND_ADDR", Some("not-an-address".to_owned())),
            ("DEENIFY_DATABASE_URL", None),
            ("DEENIFY_DB_MAX_CONNECTIONS", None),
            ("DEENIFY_RUN_MIGRATIONS", None),
        ]);

        let settings = load_from_empty_args();
        assert!(settings.bind_addr().is_err());
    }
}
