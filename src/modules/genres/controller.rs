use axum::{Json, extract::State, http::StatusCode};
use bookflow_core::AppError;
use bookflow_models::genres::{CreateGenreDto, Genre};
use tracing::instrument;

use crate::docs::ErrorResponse;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service::GenreService;

#[utoipa::path(
    post,
    path = "/api/genres",
    request_body = CreateGenreDto,
    responses(
        (status = 201, description = "Genre created", body = Genre),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 409, description = "Genre already exists", body = ErrorResponse)
    ),
    tag = "Genres"
)]
#[instrument(skip(state))]
pub async fn create_genre(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateGenreDto>,
) -> Result<(StatusCode, Json<Genre>), AppError> {
    let genre = GenreService::create_genre(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(genre)))
}

#[utoipa::path(
    get,
    path = "/api/genres",
    responses(
        (status = 200, description = "All genres, ordered by name", body = Vec<Genre>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Genres"
)]
#[instrument(skip(state))]
pub async fn list_genres(State(state): State<AppState>) -> Result<Json<Vec<Genre>>, AppError> {
    let genres = GenreService::list_genres(&state.db).await?;
    Ok(Json(genres))
}
