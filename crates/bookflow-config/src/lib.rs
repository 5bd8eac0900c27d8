//! # BookFlow Config
//!
//! Configuration types for the BookFlow API, loaded from environment variables:
//!
//! - [`server`]: listen host and port
//! - [`database`]: PostgreSQL connection settings
//! - [`jwt`]: session token signing configuration
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//!
//! Every loader has a `from_lookup` twin that takes a key lookup function,
//! so configuration can be built without touching the process environment.
//!
//! # Example
//!
//! ```ignore
//! use bookflow_config::AppConfig;
//!
//! let config = AppConfig::from_env()?;
//! ```

pub mod cors;
pub mod database;
pub mod error;
pub mod jwt;
pub mod server;

use std::str::FromStr;

pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use jwt::JwtConfig;
pub use server::ServerConfig;

/// Everything the server needs to start.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub cors: CorsConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            server: ServerConfig::from_lookup(&lookup)?,
            database: DatabaseConfig::from_lookup(&lookup)?,
            jwt: JwtConfig::from_lookup(&lookup)?,
            cors: CorsConfig::from_lookup(&lookup),
        })
    }
}

pub(crate) fn required<F>(lookup: &F, name: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .filter(|value| !value.trim().is_empty())
        .ok_or(ConfigError::Missing(name))
}

pub(crate) fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        Some(raw) if !raw.trim().is_empty() => {
            raw.trim().parse().map_err(|_| ConfigError::Invalid { name, value: raw })
        }
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_requires_secret() {
        let result = AppConfig::from_lookup(|key| match key {
            "DATABASE_URL" => Some("postgres://localhost/bookflow".into()),
            _ => None,
        });
        assert_eq!(result.unwrap_err(), ConfigError::Missing("JWT_SECRET"));
    }

    #[test]
    fn test_app_config_from_lookup() {
        let config = AppConfig::from_lookup(|key| match key {
            "DATABASE_URL" => Some("postgres://localhost/bookflow".into()),
            "JWT_SECRET" => Some("s3cret".into()),
            "PORT" => Some("8080".into()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.jwt.access_token_expiry, 3600);
    }

    #[test]
    fn test_parse_or_ignores_blank() {
        let value: u16 = parse_or(&|_: &str| Some("  ".to_string()), "PORT", 5000).unwrap();
        assert_eq!(value, 5000);
    }
}
