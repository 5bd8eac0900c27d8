use bookflow_core::AppError;
use bookflow_models::genres::{CreateGenreDto, Genre};
use sqlx::PgPool;
use tracing::{info, instrument};

pub struct GenreService;

impl GenreService {
    #[instrument(skip(db))]
    pub async fn create_genre(db: &PgPool, dto: CreateGenreDto) -> Result<Genre, AppError> {
        let genre = sqlx::query_as::<_, Genre>(
            r#"INSERT INTO genres (name, description) VALUES ($1, $2)
               RETURNING id, name, description, created_at"#,
        )
        .bind(&dto.name)
        .bind(&dto.description)
        .fetch_one(db)
        .await
        .map_err(|e| match AppError::from(e) {
            AppError::Conflict(_) => AppError::conflict("Genre already exists"),
            other => other.context("Failed to create genre"),
        })?;

        info!(genre_id = %genre.id, "Genre created");
        Ok(genre)
    }

    #[instrument(skip(db))]
    pub async fn list_genres(db: &PgPool) -> Result<Vec<Genre>, AppError> {
        let genres = sqlx::query_as::<_, Genre>(
            "SELECT id, name, description, created_at FROM genres ORDER BY name",
        )
        .fetch_all(db)
        .await
        .map_err(|e| AppError::from(e).context("Failed to list genres"))?;

        Ok(genres)
    }
}
