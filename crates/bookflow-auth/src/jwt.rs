//! JWT (JSON Web Token) issuing and verification.
//!
//! Tokens are HS256-signed with the secret from [`JwtConfig`] and carry
//! [`Claims`]. Expiry is checked here rather than by `jsonwebtoken`, which
//! would accept a token while `now == exp`: a token issued at `T` with a
//! lifetime of `L` seconds is valid for `T <= now < T + L`.
//!
//! # Example
//!
//! ```ignore
//! use bookflow_auth::{create_access_token, verify_token};
//! use bookflow_config::JwtConfig;
//!
//! let config = JwtConfig::from_env()?;
//! let token = create_access_token(account_id, "reader", &config)?;
//! let claims = verify_token(&token, &config)?;
//! ```

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use thiserror::Error;
use uuid::Uuid;

use bookflow_config::JwtConfig;
use bookflow_core::AppError;

use crate::claims::Claims;

/// Why a presented token was rejected.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    #[error("malformed token")]
    Malformed,
    #[error("invalid token signature")]
    InvalidSignature,
    #[error("token has expired")]
    Expired,
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::InvalidSignature => TokenError::InvalidSignature,
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Malformed,
        }
    }
}

impl From<TokenError> for AppError {
    fn from(_: TokenError) -> Self {
        AppError::unauthorized("Invalid token")
    }
}

/// Issues an access token for `account_id` using the current time.
pub fn create_access_token(
    account_id: Uuid,
    username: &str,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    create_access_token_at(account_id, username, jwt_config, Utc::now().timestamp())
}

/// Issues an access token as if the clock read `issued_at`.
pub fn create_access_token_at(
    account_id: Uuid,
    username: &str,
    jwt_config: &JwtConfig,
    issued_at: i64,
) -> Result<String, AppError> {
    let claims = Claims {
        sub: account_id.to_string(),
        username: username.to_string(),
        iat: issued_at,
        exp: issued_at + jwt_config.access_token_expiry,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal("Failed to create token", e))
}

/// Verifies signature and expiry against the current time.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, TokenError> {
    verify_token_at(token, jwt_config, Utc::now().timestamp())
}

/// Verifies signature and expiry as if the clock read `now`.
pub fn verify_token_at(
    token: &str,
    jwt_config: &JwtConfig,
    now: i64,
) -> Result<Claims, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false;
    validation.leeway = 0;

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &validation,
    )?;

    if data.claims.is_expired_at(now) {
        return Err(TokenError::Expired);
    }

    Ok(data.claims)
}
