//! Till API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults. Only the signing secret is mandatory.
//!
//! | Variable | Default |
//! |---|---|
//! | `TILL_BIND_ADDR` | `0.0.0.0:5000` |
//! | `TILL_DATABASE_PATH` | `./till.db` |
//! | `TILL_DB_MAX_CONNECTIONS` | `5` |
//! | `JWT_SECRET_KEY` | required |
//! | `JWT_ACCESS_LIFETIME_SECS` | `28800` (8 hours) |
//! | `TILL_STOCK_POLICY` | `enforce` |
//! | `TILL_TOTAL_POLICY` | `trust` |
//! | `TILL_UTC_OFFSET_MINUTES` | unset: host local time |

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use till_core::{OrderPolicy, StockPolicy, StoreCalendar, TotalPolicy};

/// Till API configuration.
#[derive(Clone)]
pub struct AppConfig {
    /// HTTP listen address
    pub bind_addr: SocketAddr,

    /// SQLite database file
    pub database_path: PathBuf,

    /// Connection pool size
    pub db_max_connections: u32,

    /// JWT secret key for signing tokens
    pub jwt_secret: String,

    /// JWT access token lifetime in seconds
    pub jwt_access_lifetime_secs: i64,

    /// Stock floor and declared-total rules for new orders
    pub order_policy: OrderPolicy,

    /// Business-day boundary for orders and reports
    pub calendar: StoreCalendar,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup (tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let jwt_secret = lookup("JWT_SECRET_KEY")
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingRequired("JWT_SECRET_KEY".to_string()))?;

        let calendar = match lookup("TILL_UTC_OFFSET_MINUTES") {
            Some(raw) => {
                let minutes: i32 = parse_value("TILL_UTC_OFFSET_MINUTES", &raw)?;
                StoreCalendar::from_offset_minutes(minutes)
                    .ok_or_else(|| ConfigError::InvalidValue("TILL_UTC_OFFSET_MINUTES".to_string()))?
            }
            None => StoreCalendar::local(),
        };

        let config = AppConfig {
            bind_addr: parse_value(
                "TILL_BIND_ADDR",
                &lookup("TILL_BIND_ADDR").unwrap_or_else(|| "0.0.0.0:5000".to_string()),
            )?,

            database_path: PathBuf::from(
                lookup("TILL_DATABASE_PATH").unwrap_or_else(|| "./till.db".to_string()),
            ),

            db_max_connections: parse_value(
                "TILL_DB_MAX_CONNECTIONS",
                &lookup("TILL_DB_MAX_CONNECTIONS").unwrap_or_else(|| "5".to_string()),
            )?,

            jwt_secret,

            jwt_access_lifetime_secs: parse_value(
                "JWT_ACCESS_LIFETIME_SECS",
                &lookup("JWT_ACCESS_LIFETIME_SECS").unwrap_or_else(|| "28800".to_string()), // 8 hours
            )?,

            order_policy: OrderPolicy {
                stock: parse_value::<StockPolicy>(
                    "TILL_STOCK_POLICY",
                    &lookup("TILL_STOCK_POLICY").unwrap_or_else(|| "enforce".to_string()),
                )?,
                total: parse_value::<TotalPolicy>(
                    "TILL_TOTAL_POLICY",
                    &lookup("TILL_TOTAL_POLICY").unwrap_or_else(|| "trust".to_string()),
                )?,
            },

            calendar,
        };

        if config.db_max_connections == 0 {
            return Err(ConfigError::InvalidValue("TILL_DB_MAX_CONNECTIONS".to_string()));
        }

        if config.jwt_access_lifetime_secs <= 0 {
            return Err(ConfigError::InvalidValue("JWT_ACCESS_LIFETIME_SECS".to_string()));
        }

        Ok(config)
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("bind_addr", &self.bind_addr)
            .field("database_path", &self.database_path)
            .field("db_max_connections", &self.db_max_connections)
            .field("jwt_secret", &"<redacted>")
            .field("jwt_access_lifetime_secs", &self.jwt_access_lifetime_secs)
            .field("order_policy", &self.order_policy)
            .field("calendar", &self.calendar)
            .finish()
    }
}

fn parse_value<T: FromStr>(key: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue(key.to_string()))
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[("JWT_SECRET_KEY", "s3cret")])).unwrap();

        assert_eq!(config.bind_addr, "0.0.0.0:5000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.database_path, PathBuf::from("./till.db"));
        assert_eq!(config.db_max_connections, 5);
        assert_eq!(config.jwt_access_lifetime_secs, 8 * 3600);
        assert_eq!(config.order_policy, OrderPolicy::default());
        assert_eq!(config.calendar, StoreCalendar::local());
    }

    #[test]
    fn test_secret_is_required() {
        let err = AppConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingRequired(_)));

        let err = AppConfig::from_lookup(lookup_from(&[("JWT_SECRET_KEY", "  ")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingRequired(_)));
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("JWT_SECRET_KEY", "s3cret"),
            ("TILL_BIND_ADDR", "127.0.0.1:8080"),
            ("TILL_DATABASE_PATH", "/var/lib/till/till.db"),
            ("TILL_DB_MAX_CONNECTIONS", "8"),
            ("JWT_ACCESS_LIFETIME_SECS", "600"),
            ("TILL_STOCK_POLICY", "allow_negative"),
            ("TILL_TOTAL_POLICY", "verify"),
            ("TILL_UTC_OFFSET_MINUTES", "-300"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.db_max_connections, 8);
        assert_eq!(config.jwt_access_lifetime_secs, 600);
        assert_eq!(config.order_policy.stock, StockPolicy::AllowNegative);
        assert_eq!(config.order_policy.total, TotalPolicy::Verify);
        assert_eq!(config.calendar, StoreCalendar::from_offset_minutes(-300).unwrap());
    }

    #[test]
    fn test_invalid_values() {
        for (key, value) in [
            ("TILL_BIND_ADDR", "not-an-addr"),
            ("TILL_DB_MAX_CONNECTIONS", "0"),
            ("JWT_ACCESS_LIFETIME_SECS", "-5"),
            ("TILL_STOCK_POLICY", "sometimes"),
            ("TILL_TOTAL_POLICY", "maybe"),
            ("TILL_UTC_OFFSET_MINUTES", "99999"),
        ] {
            let result = AppConfig::from_lookup(lookup_from(&[("JWT_SECRET_KEY", "s3cret"), (key, value)]));
            assert!(
                matches!(result, Err(ConfigError::InvalidValue(ref k)) if k == key),
                "{key}={value} should be rejected"
            );
        }
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = AppConfig::from_lookup(lookup_from(&[("JWT_SECRET_KEY", "s3cret")])).unwrap();
        let printed = format!("{:?}", config);
        assert!(!printed.contains("s3cret"));
    }
}
