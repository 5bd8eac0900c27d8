//! Request middleware and extractors.
//!
//! - [`auth`]: the bearer token gate and the [`auth::AuthUser`] extractor
//!
//! # Authentication Flow
//!
//! 1. Client sends `Authorization: Bearer <token>`
//! 2. `require_auth` verifies the token and stores `AuthUser` in the extensions
//! 3. Handlers take `AuthUser` and scope every query by `account_id()`

pub mod auth;
