//! Database seeding for development and testing.

pub mod catalog;
pub mod models;

use std::time::Instant;

use sqlx::PgPool;

pub use catalog::{clear_catalog, seed_authors, seed_books, seed_genres};
pub use models::SeedConfig;

/// Seeds authors, then genres, then books that reference them.
pub async fn seed_all(db: &PgPool, config: SeedConfig) -> anyhow::Result<()> {
    let start_time = Instant::now();
    println!("🌱 Starting database seeding...\n");

    if config.authors > 0 {
        seed_authors(db, config.authors).await?;
    }
    if config.genres > 0 {
        seed_genres(db, config.genres).await?;
    }
    if config.books > 0 {
        seed_books(db, config.books).await?;
    }

    println!("\n✅ Seeding completed in {:?}", start_time.elapsed());
    Ok(())
}
