//! Feature modules. Each one is split into:
//!
//! - `controller.rs`: HTTP handlers with their OpenAPI annotations
//! - `service.rs`: store operations
//! - `router.rs`: axum route table

pub mod auth;
pub mod authors;
pub mod books;
pub mod genres;
pub mod user_books;
pub mod users;
