//! Password hashing and verification.
//!
//! Passwords are hashed with bcrypt at a fixed cost of [`BCRYPT_COST`]. The
//! salt is random per call and embedded in the returned hash string, so the
//! same password never hashes to the same value twice.
//!
//! Both functions are CPU bound. Async callers should run them on the
//! blocking pool (see [`hash_password_blocking`] and
//! [`verify_password_blocking`]).

use bcrypt::{hash, verify};

use crate::errors::AppError;

/// bcrypt work factor used for every stored password.
pub const BCRYPT_COST: u32 = 10;

/// Well-formed cost-10 hash used when there is no stored hash to check, so a
/// lookup miss costs as much as a wrong password.
pub const DUMMY_PASSWORD_HASH: &str =
    "$2b$10$N9qo8uLOickgx2ZMRZoMyeIjZAgcfl7p92ldGxad68LJZdL17lhWy";

/// Hashes a raw password.
///
/// # Errors
///
/// Returns an internal error if bcrypt rejects the input (e.g. a password
/// containing a NUL byte).
pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, BCRYPT_COST).map_err(|e| AppError::internal("Failed to hash password", e))
}

/// Verifies a raw password against a stored bcrypt hash.
///
/// A malformed stored hash fails closed: the result is `false`, never an
/// error.
pub fn verify_password(password: &str, hash: &str) -> bool {
    match verify(password, hash) {
        Ok(matches) => matches,
        Err(e) => {
            tracing::warn!(error = %e, "Stored password hash could not be verified");
            false
        }
    }
}

/// [`hash_password`] on the blocking thread pool.
pub async fn hash_password_blocking(password: String) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AppError::internal("Password hashing task failed", e))?
}

/// [`verify_password`] on the blocking thread pool.
pub async fn verify_password_blocking(password: String, hash: String) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| AppError::internal("Password verification task failed", e))
}
