//! # BookFlow Auth
//!
//! Session token types and JWT utilities:
//!
//! - [`claims`]: the [`Claims`] embedded in access tokens
//! - [`jwt`]: token creation and verification, [`TokenError`]

pub mod claims;
pub mod jwt;

pub use claims::Claims;
pub use jwt::{
    TokenError, create_access_token, create_access_token_at, verify_token, verify_token_at,
};
