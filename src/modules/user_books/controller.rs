use axum::{Json, extract::State, http::StatusCode};
use bookflow_core::AppError;
use bookflow_models::UserBookId;
use bookflow_models::user_books::{
    CreateUserBookDto, UpdateUserBookDto, UserBook, UserBookCreatedResponse,
    UserBookDeletedResponse,
};
use tracing::instrument;

use crate::docs::ErrorResponse;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::{ValidatedJson, ValidatedPath};

use super::service::UserBookService;

/// Add a book to the caller's shelf
#[utoipa::path(
    post,
    path = "/api/user-books",
    request_body = CreateUserBookDto,
    responses(
        (status = 201, description = "Book added successfully", body = UserBookCreatedResponse),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "User Books",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user, dto), fields(username = %auth_user.username()))]
pub async fn create_user_book(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateUserBookDto>,
) -> Result<(StatusCode, Json<UserBookCreatedResponse>), AppError> {
    let account_id = auth_user.account_id()?;
    let new_book = UserBookService::create_user_book(&state.db, account_id, dto).await?;

    Ok((
        StatusCode::CREATED,
        Json(UserBookCreatedResponse {
            message: "Book added successfully".to_string(),
            new_book,
        }),
    ))
}

/// List the caller's books
#[utoipa::path(
    get,
    path = "/api/user-books",
    responses(
        (status = 200, description = "The caller's books", body = Vec<UserBook>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "User Books",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user), fields(username = %auth_user.username()))]
pub async fn list_user_books(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<UserBook>>, AppError> {
    let books = UserBookService::list_user_books(&state.db, auth_user.account_id()?).await?;
    Ok(Json(books))
}

#[utoipa::path(
    get,
    path = "/api/user-books/{id}",
    params(
        ("id" = Uuid, Path, description = "User book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = UserBook),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Book not found", body = ErrorResponse)
    ),
    tag = "User Books",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user), fields(username = %auth_user.username()))]
pub async fn get_user_book(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedPath(id): ValidatedPath<UserBookId>,
) -> Result<Json<UserBook>, AppError> {
    let book = UserBookService::get_user_book(&state.db, auth_user.account_id()?, id).await?;
    Ok(Json(book))
}

#[utoipa::path(
    put,
    path = "/api/user-books/{id}",
    params(
        ("id" = Uuid, Path, description = "User book ID")
    ),
    request_body = UpdateUserBookDto,
    responses(
        (status = 200, description = "Book updated", body = UserBook),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Book not found", body = ErrorResponse)
    ),
    tag = "User Books",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user, dto), fields(username = %auth_user.username()))]
pub async fn update_user_book(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedPath(id): ValidatedPath<UserBookId>,
    ValidatedJson(dto): ValidatedJson<UpdateUserBookDto>,
) -> Result<Json<UserBook>, AppError> {
    let book =
        UserBookService::update_user_book(&state.db, auth_user.account_id()?, id, dto).await?;
    Ok(Json(book))
}

#[utoipa::path(
    delete,
    path = "/api/user-books/{id}",
    params(
        ("id" = Uuid, Path, description = "User book ID")
    ),
    responses(
        (status = 200, description = "Book deleted successfully", body = UserBookDeletedResponse),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Book not found", body = ErrorResponse)
    ),
    tag = "User Books",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user), fields(username = %auth_user.username()))]
pub async fn delete_user_book(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedPath(id): ValidatedPath<UserBookId>,
) -> Result<Json<UserBookDeletedResponse>, AppError> {
    let deleted_book =
        UserBookService::delete_user_book(&state.db, auth_user.account_id()?, id).await?;
    Ok(Json(UserBookDeletedResponse {
        message: "Book deleted successfully".to_string(),
        deleted_book,
    }))
}
