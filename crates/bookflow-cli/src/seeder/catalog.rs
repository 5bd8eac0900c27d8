//! Author, genre and book seeding.
//!
//! Rows are generated in parallel with Rayon and inserted with multi-row
//! `INSERT` statements inside one transaction per kind.

use std::time::Instant;

use anyhow::{Context, bail};
use bookflow_models::{AuthorId, GenreId};
use chrono::NaiveDate;
use fake::Fake;
use fake::faker::lorem::en::{Sentence, Word};
use fake::faker::name::en::Name;
use rayon::prelude::*;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::models::{AuthorSeed, BookSeed, GenreSeed};

const BATCH_SIZE: usize = 500;

pub fn generate_authors(count: usize) -> Vec<AuthorSeed> {
    (0..count)
        .into_par_iter()
        .map(|_| AuthorSeed {
            name: Name().fake(),
        })
        .collect()
}

pub fn generate_genres(count: usize) -> Vec<GenreSeed> {
    (0..count)
        .into_par_iter()
        .map(|_| {
            let word: String = Word().fake();
            GenreSeed {
                name: capitalize(&word),
                description: Some(Sentence(4..10).fake()),
            }
        })
        .collect()
}

/// Generates books referencing the given authors and genres.
pub fn generate_books(
    count: usize,
    author_ids: &[AuthorId],
    genre_ids: &[GenreId],
) -> Vec<BookSeed> {
    if author_ids.is_empty() || genre_ids.is_empty() {
        return Vec::new();
    }

    (0..count)
        .into_par_iter()
        .map(|_| {
            let title: String = Sentence(1..5).fake();
            let year: i32 = (1900i32..2025).fake();
            let month: u32 = (1u32..13).fake();
            let day: u32 = (1u32..29).fake();

            BookSeed {
                title: title.trim_end_matches('.').to_string(),
                author_id: author_ids[(0..author_ids.len()).fake::<usize>()],
                genre_id: genre_ids[(0..genre_ids.len()).fake::<usize>()],
                pages: (40i32..1200).fake(),
                published_date: NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default(),
                description: Some(Sentence(8..20).fake()),
                image: None,
            }
        })
        .collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Inserts authors; names that already exist are skipped.
pub async fn seed_authors(db: &PgPool, count: usize) -> anyhow::Result<u64> {
    let start_time = Instant::now();
    println!("✍️  Seeding {} authors...", count);

    let authors = generate_authors(count);
    let mut tx = db.begin().await?;
    let mut inserted = 0;

    for chunk in authors.chunks(BATCH_SIZE) {
        let mut query = QueryBuilder::<Postgres>::new("INSERT INTO authors (name) ");
        query.push_values(chunk, |mut row, author| {
            row.push_bind(&author.name);
        });
        query.push(" ON CONFLICT (name) DO NOTHING");
        inserted += query.build().execute(&mut *tx).await?.rows_affected();
    }

    tx.commit().await?;
    println!("   ✓ Inserted {} authors in {:?}", inserted, start_time.elapsed());
    Ok(inserted)
}

/// Inserts genres; names that already exist are skipped.
pub async fn seed_genres(db: &PgPool, count: usize) -> anyhow::Result<u64> {
    let start_time = Instant::now();
    println!("🏷️  Seeding {} genres...", count);

    let genres = generate_genres(count);
    let mut tx = db.begin().await?;
    let mut inserted = 0;

    for chunk in genres.chunks(BATCH_SIZE) {
        let mut query = QueryBuilder::<Postgres>::new("INSERT INTO genres (name, description) ");
        query.push_values(chunk, |mut row, genre| {
            row.push_bind(&genre.name).push_bind(&genre.description);
        });
        query.push(" ON CONFLICT (name) DO NOTHING");
        inserted += query.build().execute(&mut *tx).await?.rows_affected();
    }

    tx.commit().await?;
    println!("   ✓ Inserted {} genres in {:?}", inserted, start_time.elapsed());
    Ok(inserted)
}

/// Inserts books spread over the authors and genres already stored.
pub async fn seed_books(db: &PgPool, count: usize) -> anyhow::Result<u64> {
    let start_time = Instant::now();
    println!("📚 Seeding {} books...", count);

    let author_ids = sqlx::query_scalar::<_, AuthorId>("SELECT id FROM authors")
        .fetch_all(db)
        .await
        .context("Failed to load authors")?;
    let genre_ids = sqlx::query_scalar::<_, GenreId>("SELECT id FROM genres")
        .fetch_all(db)
        .await
        .context("Failed to load genres")?;

    if author_ids.is_empty() || genre_ids.is_empty() {
        bail!("books need at least one author and one genre; seed those first");
    }

    let books = generate_books(count, &author_ids, &genre_ids);
    let mut tx = db.begin().await?;
    let mut inserted = 0;

    for chunk in books.chunks(BATCH_SIZE) {
        let mut query = QueryBuilder::<Postgres>::new(
            "INSERT INTO books \
             (title, author_id, genre_id, pages, published_date, description, image) ",
        );
        query.push_values(chunk, |mut row, book| {
            row.push_bind(&book.title)
                .push_bind(book.author_id)
                .push_bind(book.genre_id)
                .push_bind(book.pages)
                .push_bind(book.published_date)
                .push_bind(&book.description)
                .push_bind(&book.image);
        });
        inserted += query.build().execute(&mut *tx).await?.rows_affected();
    }

    tx.commit().await?;
    println!("   ✓ Inserted {} books in {:?}", inserted, start_time.elapsed());
    Ok(inserted)
}

/// Removes all books, authors and genres. Accounts and their books stay.
pub async fn clear_catalog(db: &PgPool) -> anyhow::Result<()> {
    let start_time = Instant::now();
    println!("🗑️  Clearing catalog...");

    let mut tx = db.begin().await?;
    let books = sqlx::query("DELETE FROM books").execute(&mut *tx).await?.rows_affected();
    let authors = sqlx::query("DELETE FROM authors").execute(&mut *tx).await?.rows_affected();
    let genres = sqlx::query("DELETE FROM genres").execute(&mut *tx).await?.rows_affected();
    tx.commit().await?;

    println!(
        "   ✓ Deleted {} books, {} authors, {} genres in {:?}",
        books,
        authors,
        genres,
        start_time.elapsed()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_authors() {
        let authors = generate_authors(25);
        assert_eq!(authors.len(), 25);
        assert!(authors.iter().all(|a| !a.name.is_empty() && a.name.len() <= 100));
    }

    #[test]
    fn test_generate_genres_are_capitalized() {
        let genres = generate_genres(10);
        assert_eq!(genres.len(), 10);
        for genre in genres {
            assert!(genre.name.chars().next().is_some_and(char::is_uppercase));
        }
    }

    #[test]
    fn test_generate_books_uses_given_references() {
        let authors = vec![AuthorId::new(), AuthorId::new()];
        let genres = vec![GenreId::new()];

        let books = generate_books(50, &authors, &genres);
        assert_eq!(books.len(), 50);
        for book in &books {
            assert!(authors.contains(&book.author_id));
            assert_eq!(book.genre_id, genres[0]);
            assert!((40..1200).contains(&book.pages));
            assert!(!book.title.is_empty());
        }
    }

    #[test]
    fn test_generate_books_without_references() {
        assert!(generate_books(10, &[], &[GenreId::new()]).is_empty());
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("poetry"), "Poetry");
        assert_eq!(capitalize(""), "");
    }
}
