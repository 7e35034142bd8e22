//! Process configuration from environment variables.
//!
//! | Variable | Default |
//! |---|---|
//! | `DATABASE_URL` | unset; takes precedence over the `DB_*` parts |
//! | `DB_HOST` / `DB_PORT` | `localhost` / `5432` |
//! | `DB_USERNAME` / `DB_PASSWORD` / `DB_NAME` | required without `DATABASE_URL` |
//! | `LISTEN_ADDR` | `0.0.0.0:8000` |
//! | `DB_MAX_CONNECTIONS` | `5` |
//! | `BODY_LIMIT_BYTES` | `65536` |
//! | `AUTO_MIGRATE` | `false` |

use crate::error::ConfigError;
use crate::routes::DEFAULT_BODY_LIMIT;
use sqlx::postgres::{PgConnectOptions, PgSslMode};
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

#[derive(Clone)]
pub enum DatabaseConfig {
    Url(String),
    Parts {
        host: String,
        port: u16,
        username: String,
        password: String,
        database: String,
    },
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatabaseConfig::Url(_) => f.write_str("DatabaseConfig::Url(..)"),
            DatabaseConfig::Parts {
                host,
                port,
                username,
                database,
                ..
            } => f
                .debug_struct("DatabaseConfig::Parts")
                .field("host", host)
                .field("port", port)
                .field("username", username)
                .field("database", database)
                .finish_non_exhaustive(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub listen_addr: SocketAddr,
    pub max_connections: u32,
    pub body_limit: usize,
    pub auto_migrate: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let database = match get("DATABASE_URL") {
            Some(url) => DatabaseConfig::Url(url),
            None => DatabaseConfig::Parts {
                host: get("DB_HOST").unwrap_or_else(|| "localhost".into()),
                port: parse_or("DB_PORT", get("DB_PORT"), 5432)?,
                username: required("DB_USERNAME")?,
                password: required("DB_PASSWORD")?,
                database: required("DB_NAME")?,
            },
        };

        Ok(AppConfig {
            database,
            listen_addr: parse_or(
                "LISTEN_ADDR",
                get("LISTEN_ADDR"),
                SocketAddr::from(([0, 0, 0, 0], 8000)),
            )?,
            max_connections: parse_or("DB_MAX_CONNECTIONS", get("DB_MAX_CONNECTIONS"), 5)?,
            body_limit: parse_or("BODY_LIMIT_BYTES", get("BODY_LIMIT_BYTES"), DEFAULT_BODY_LIMIT)?,
            auto_migrate: parse_flag("AUTO_MIGRATE", get("AUTO_MIGRATE"))?,
        })
    }

    /// Connection options for the pool. Parts-based connections never use TLS.
    pub fn connect_options(&self) -> Result<PgConnectOptions, ConfigError> {
        match &self.database {
            DatabaseConfig::Url(url) => {
                PgConnectOptions::from_str(url).map_err(|e| ConfigError::Invalid {
                    key: "DATABASE_URL",
                    value: e.to_string(),
                })
            }
            DatabaseConfig::Parts {
                host,
                port,
                username,
                password,
                database,
            } => Ok(PgConnectOptions::new()
                .host(host)
                .port(*port)
                .username(username)
                .password(password)
                .database(database)
                .ssl_mode(PgSslMode::Disable)),
        }
    }
}

fn parse_or<T: FromStr>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(v) => v
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value: v }),
    }
}

fn parse_flag(key: &'static str, raw: Option<String>) -> Result<bool, ConfigError> {
    match raw.as_deref().map(|v| v.trim().to_ascii_lowercase()) {
        None => Ok(false),
        Some(v) => match v.as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::Invalid { key, value: v }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn parts_with_defaults() {
        let cfg = AppConfig::from_lookup(lookup(&[
            ("DB_USERNAME", "postgres"),
            ("DB_PASSWORD", "secret"),
            ("DB_NAME", "events"),
        ]))
        .unwrap();
        assert_matches!(
            cfg.database,
            DatabaseConfig::Parts { ref host, port: 5432, ref database, .. }
                if host == "localhost" && database == "events"
        );
        assert_eq!(cfg.listen_addr, "0.0.0.0:8000".parse().unwrap());
        assert_eq!(cfg.max_connections, 5);
        assert_eq!(cfg.body_limit, DEFAULT_BODY_LIMIT);
        assert!(!cfg.auto_migrate);
    }

    #[test]
    fn url_wins_over_parts() {
        let cfg = AppConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://u:p@db:5433/shop"),
            ("DB_NAME", "ignored"),
        ]))
        .unwrap();
        assert_matches!(cfg.database, DatabaseConfig::Url(_));
        let opts = cfg.connect_options().unwrap();
        assert_eq!(opts.get_host(), "db");
        assert_eq!(opts.get_port(), 5433);
        assert_eq!(opts.get_database(), Some("shop"));
    }

    #[test]
    fn missing_credentials_reported_by_name() {
        let err = AppConfig::from_lookup(lookup(&[("DB_USERNAME", "postgres")])).unwrap_err();
        assert_matches!(err, ConfigError::Missing("DB_PASSWORD"));
    }

    #[test]
    fn invalid_numbers_and_flags() {
        let base = [("DATABASE_URL", "postgres://localhost/events")];
        let err = AppConfig::from_lookup(lookup(&[base[0], ("DB_MAX_CONNECTIONS", "many")])).unwrap_err();
        assert_matches!(err, ConfigError::Invalid { key: "DB_MAX_CONNECTIONS", .. });

        let err = AppConfig::from_lookup(lookup(&[base[0], ("AUTO_MIGRATE", "maybe")])).unwrap_err();
        assert_matches!(err, ConfigError::Invalid { key: "AUTO_MIGRATE", .. });

        let cfg = AppConfig::from_lookup(lookup(&[base[0], ("AUTO_MIGRATE", "TRUE")])).unwrap();
        assert!(cfg.auto_migrate);
    }

    #[test]
    fn debug_hides_password() {
        let cfg = AppConfig::from_lookup(lookup(&[
            ("DB_USERNAME", "postgres"),
            ("DB_PASSWORD", "hunter2"),
            ("DB_NAME", "events"),
        ]))
        .unwrap();
        assert!(!format!("{cfg:?}").contains("hunter2"));
    }
}
