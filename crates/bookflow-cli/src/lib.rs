//! # BookFlow CLI
//!
//! Administrative tasks that bypass the HTTP API:
//!
//! - [`accounts`]: create an account with the same rules as signup
//! - [`seeder`]: fill the catalog with fake authors, genres and books
//!
//! ```ignore
//! use bookflow_cli::seeder::{SeedConfig, seed_all};
//!
//! seed_all(&pool, SeedConfig { authors: 20, genres: 8, books: 500 }).await?;
//! ```

pub mod accounts;
pub mod seeder;
