use std::fmt;

use crate::error::ConfigError;
use crate::{parse_or, required};

/// Default access token lifetime: one hour.
pub const DEFAULT_ACCESS_TOKEN_EXPIRY: i64 = 3600;

/// Signing configuration for session tokens.
///
/// There is no fallback secret: startup fails when `JWT_SECRET` is missing
/// or empty.
#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    /// Token lifetime in seconds
    pub access_token_expiry: i64,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>, access_token_expiry: i64) -> Result<Self, ConfigError> {
        let secret = secret.into();
        if secret.trim().is_empty() {
            return Err(ConfigError::Missing("JWT_SECRET"));
        }
        if access_token_expiry <= 0 {
            return Err(ConfigError::Invalid {
                name: "JWT_ACCESS_EXPIRY",
                value: access_token_expiry.to_string(),
            });
        }

        Ok(Self {
            secret,
            access_token_expiry,
        })
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = required(&lookup, "JWT_SECRET")?;
        let expiry = parse_or(&lookup, "JWT_ACCESS_EXPIRY", DEFAULT_ACCESS_TOKEN_EXPIRY)?;
        Self::new(secret, expiry)
    }
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[redacted]")
            .field("access_token_expiry", &self.access_token_expiry)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_missing_secret_fails() {
        let result = JwtConfig::from_lookup(lookup(&[]));
        assert_eq!(result.unwrap_err(), ConfigError::Missing("JWT_SECRET"));
    }

    #[test]
    fn test_blank_secret_fails() {
        let result = JwtConfig::from_lookup(lookup(&[("JWT_SECRET", "   ")]));
        assert_eq!(result.unwrap_err(), ConfigError::Missing("JWT_SECRET"));
    }

    #[test]
    fn test_default_expiry_is_one_hour() {
        let config = JwtConfig::from_lookup(lookup(&[("JWT_SECRET", "s3cret")])).unwrap();
        assert_eq!(config.access_token_expiry, 3600);
    }

    #[test]
    fn test_custom_expiry() {
        let config = JwtConfig::from_lookup(lookup(&[
            ("JWT_SECRET", "s3cret"),
            ("JWT_ACCESS_EXPIRY", "60"),
        ]))
        .unwrap();
        assert_eq!(config.access_token_expiry, 60);
    }

    #[test]
    fn test_invalid_expiry() {
        let result = JwtConfig::from_lookup(lookup(&[
            ("JWT_SECRET", "s3cret"),
            ("JWT_ACCESS_EXPIRY", "soon"),
        ]));
        assert!(matches!(
            result,
            Err(ConfigError::Invalid {
                name: "JWT_ACCESS_EXPIRY",
                ..
            })
        ));

        let result = JwtConfig::new("s3cret", 0);
        assert!(result.is_err());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = JwtConfig::new("super-secret-value", 3600).unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret-value"));
        assert!(debug.contains("[redacted]"));
    }
}
