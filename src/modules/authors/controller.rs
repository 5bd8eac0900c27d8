use axum::{Json, extract::State, http::StatusCode};
use bookflow_core::AppError;
use bookflow_models::authors::{Author, CreateAuthorDto};
use tracing::instrument;

use crate::docs::ErrorResponse;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service::AuthorService;

#[utoipa::path(
    post,
    path = "/api/authors",
    request_body = CreateAuthorDto,
    responses(
        (status = 201, description = "Author created", body = Author),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 409, description = "Author already exists", body = ErrorResponse)
    ),
    tag = "Authors"
)]
#[instrument(skip(state))]
pub async fn create_author(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateAuthorDto>,
) -> Result<(StatusCode, Json<Author>), AppError> {
    let author = AuthorService::create_author(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(author)))
}

/// List authors by name
#[utoipa::path(
    get,
    path = "/api/authors",
    responses(
        (status = 200, description = "All authors", body = Vec<Author>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authors"
)]
#[instrument(skip(state))]
pub async fn list_authors(State(state): State<AppState>) -> Result<Json<Vec<Author>>, AppError> {
    let authors = AuthorService::list_authors(&state.db).await?;
    Ok(Json(authors))
}
