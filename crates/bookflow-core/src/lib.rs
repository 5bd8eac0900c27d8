//! # BookFlow Core
//!
//! Core types, errors, and utilities for the BookFlow API.
//!
//! - [`errors`]: the [`AppError`] taxonomy and its HTTP response mapping
//! - [`pagination`]: page/limit query parameters
//! - [`password`]: bcrypt password hashing and verification
//! - [`serde`]: serde helpers for query strings and trimmed inputs
//!
//! # Example
//!
//! ```ignore
//! use bookflow_core::{AppError, hash_password, verify_password};
//!
//! let hash = hash_password("secret1")?;
//! if !verify_password("secret1", &hash) {
//!     return Err(AppError::unauthorized("Invalid username or password"));
//! }
//! ```

pub mod errors;
pub mod pagination;
pub mod password;
pub mod serde;

// Re-export commonly used types at crate root
pub use errors::{AppError, FieldViolation};
pub use pagination::PaginationParams;
pub use password::{hash_password, verify_password};
