//! # BookFlow DB
//!
//! PostgreSQL connection pool and schema migrations.
//!
//! The SQL migrations under `migrations/` at the workspace root are embedded
//! into the binary at compile time.
//!
//! # Example
//!
//! ```ignore
//! use bookflow_db::{init_db_pool, run_migrations};
//!
//! let pool = init_db_pool(&config.database).await?;
//! run_migrations(&pool).await?;
//! ```

use std::time::Duration;

use bookflow_config::DatabaseConfig;
use sqlx::migrate::{MigrateError, Migrator};
use sqlx::postgres::PgPoolOptions;
use tracing::info;

// Re-export PgPool for convenience
pub use sqlx::PgPool;

/// Embedded schema migrations.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Connects a pool and checks the database is reachable.
///
/// Called once at startup; the pool is cheap to clone into application state.
pub async fn init_db_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect(&config.url)
        .await?;

    info!(max_connections = config.max_connections, "Database pool ready");
    Ok(pool)
}

/// Builds a pool that only connects on first use.
pub fn lazy_db_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect_lazy(&config.url)
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await?;
    info!("Database migrations applied");
    Ok(())
}
