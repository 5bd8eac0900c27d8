//! # BookFlow Models
//!
//! Database entities, request/response DTOs and validation rules.
//!
//! # Modules
//!
//! - [`ids`]: typed UUID identifiers
//! - [`accounts`]: accounts, signup and signin
//! - [`books`]: catalog books, bulk create, list filters
//! - [`authors`] / [`genres`]: catalog reference data
//! - [`user_books`]: books owned by an account
//! - [`common`]: shared response bodies

pub mod accounts;
pub mod authors;
pub mod books;
pub mod common;
pub mod genres;
pub mod ids;
pub mod user_books;

pub use common::MessageResponse;
pub use ids::{AccountId, AuthorId, BookId, GenreId, UserBookId};
