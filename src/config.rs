use std::env;
use thiserror::Error;

use crate::auth::MAX_PASSWORD_BYTES;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://tasks.db?mode=rwc";
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:5002";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be a number, got {value:?}")]
    NotANumber { name: &'static str, value: String },

    #[error("BCRYPT_COST must be between 4 and 31, got {0}")]
    CostOutOfRange(u32),

    #[error("ADMIN_PASSWORD must be between 1 and {} bytes", MAX_PASSWORD_BYTES)]
    AdminPasswordLength,
}

/// Runtime settings, read from the environment once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_address: String,
    pub max_connections: u32,
    pub admin_password: String,
    pub bcrypt_cost: u32,
    /// Origins allowed by CORS; empty means any origin.
    pub cors_allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bcrypt_cost = parse_number(&lookup, "BCRYPT_COST", bcrypt::DEFAULT_COST)?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(ConfigError::CostOutOfRange(bcrypt_cost));
        }

        let admin_password =
            lookup("ADMIN_PASSWORD").unwrap_or_else(|| DEFAULT_ADMIN_PASSWORD.into());
        if admin_password.is_empty() || admin_password.len() > MAX_PASSWORD_BYTES {
            return Err(ConfigError::AdminPasswordLength);
        }

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .map(|origins| {
                origins
                    .split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Config {
            database_url: lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into()),
            bind_address: lookup("BIND_ADDRESS").unwrap_or_else(|| DEFAULT_BIND_ADDRESS.into()),
            max_connections: parse_number(&lookup, "MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?,
            admin_password,
            bcrypt_cost,
            cors_allowed_origins,
        })
    }
}

fn parse_number<F>(lookup: &F, name: &'static str, default: u32) -> Result<u32, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::NotANumber { name, value }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.bind_address, DEFAULT_BIND_ADDRESS);
        assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
        assert_eq!(config.admin_password, "admin");
        assert_eq!(config.bcrypt_cost, bcrypt::DEFAULT_COST);
        assert!(config.cors_allowed_origins.is_empty());
    }

    #[test]
    fn overrides_are_read() {
        let config = config_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("MAX_CONNECTIONS", "1"),
            ("BCRYPT_COST", "4"),
        ])
        .unwrap();
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.max_connections, 1);
        assert_eq!(config.bcrypt_cost, 4);
    }

    #[test]
    fn cors_origins_are_comma_separated() {
        let config = config_from(&[(
            "CORS_ALLOWED_ORIGINS",
            "http://localhost:3000, https://tasks.example.com,",
        )])
        .unwrap();
        assert_eq!(
            config.cors_allowed_origins,
            vec!["http://localhost:3000", "https://tasks.example.com"]
        );
    }

    #[test]
    fn admin_password_must_fit_bcrypt() {
        let long = "a".repeat(MAX_PASSWORD_BYTES + 1);
        assert!(matches!(
            config_from(&[("ADMIN_PASSWORD", long.as_str())]),
            Err(ConfigError::AdminPasswordLength)
        ));
        assert!(matches!(
            config_from(&[("ADMIN_PASSWORD", "")]),
            Err(ConfigError::AdminPasswordLength)
        ));
        let exact = "a".repeat(MAX_PASSWORD_BYTES);
        assert!(config_from(&[("ADMIN_PASSWORD", exact.as_str())]).is_ok());
    }

    #[test]
    fn rejects_bad_numbers() {
        assert!(matches!(
            config_from(&[("MAX_CONNECTIONS", "five")]),
            Err(ConfigError::NotANumber { name: "MAX_CONNECTIONS", .. })
        ));
        assert!(matches!(
            config_from(&[("BCRYPT_COST", "2")]),
            Err(ConfigError::CostOutOfRange(2))
        ));
    }
}
