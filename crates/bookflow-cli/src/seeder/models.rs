//! Rows generated for seeding.

use bookflow_models::{AuthorId, GenreId};
use chrono::NaiveDate;

pub struct AuthorSeed {
    pub name: String,
}

pub struct GenreSeed {
    pub name: String,
    pub description: Option<String>,
}

pub struct BookSeed {
    pub title: String,
    pub author_id: AuthorId,
    pub genre_id: GenreId,
    pub pages: i32,
    pub published_date: NaiveDate,
    pub description: Option<String>,
    pub image: Option<String>,
}

/// How many rows of each kind `seed_all` creates.
#[derive(Debug, Clone, Copy)]
pub struct SeedConfig {
    pub authors: usize,
    pub genres: usize,
    pub books: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            authors: 20,
            genres: 8,
            books: 200,
        }
    }
}
