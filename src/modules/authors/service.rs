use bookflow_core::AppError;
use bookflow_models::authors::{Author, CreateAuthorDto};
use sqlx::PgPool;
use tracing::{info, instrument};

pub struct AuthorService;

impl AuthorService {
    #[instrument(skip(db))]
    pub async fn create_author(db: &PgPool, dto: CreateAuthorDto) -> Result<Author, AppError> {
        let author = sqlx::query_as::<_, Author>(
            "INSERT INTO authors (name) VALUES ($1) RETURNING id, name, created_at",
        )
        .bind(&dto.name)
        .fetch_one(db)
        .await
        .map_err(|e| match AppError::from(e) {
            AppError::Conflict(_) => AppError::conflict("Author already exists"),
            other => other.context("Failed to create author"),
        })?;

        info!(author_id = %author.id, "Author created");
        Ok(author)
    }

    #[instrument(skip(db))]
    pub async fn list_authors(db: &PgPool) -> Result<Vec<Author>, AppError> {
        let authors = sqlx::query_as::<_, Author>(
            "SELECT id, name, created_at FROM authors ORDER BY name",
        )
        .fetch_all(db)
        .await
        .map_err(|e| AppError::from(e).context("Failed to list authors"))?;

        Ok(authors)
    }
}
