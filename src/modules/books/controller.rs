use axum::{Json, extract::State, http::StatusCode};
use bookflow_core::AppError;
use bookflow_models::books::{
    Book, BookFilterParams, BulkCreateBooksDto, CreateBookDto, UpdateBookDto,
};
use bookflow_models::{BookId, MessageResponse};
use tracing::instrument;

use crate::docs::ErrorResponse;
use crate::state::AppState;
use crate::validator::{ValidatedJson, ValidatedPath, ValidatedQuery};

use super::service::BookService;

/// List books
#[utoipa::path(
    get,
    path = "/api/books",
    params(BookFilterParams),
    responses(
        (status = 200, description = "Page of books", body = Vec<Book>),
        (status = 400, description = "Invalid query string", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Books"
)]
#[instrument(skip(state))]
pub async fn list_books(
    State(state): State<AppState>,
    ValidatedQuery(filters): ValidatedQuery<BookFilterParams>,
) -> Result<Json<Vec<Book>>, AppError> {
    let books = BookService::list_books(&state.db, filters).await?;
    Ok(Json(books))
}

#[utoipa::path(
    get,
    path = "/api/books/{id}",
    params(
        ("id" = Uuid, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 404, description = "Book not found", body = ErrorResponse)
    ),
    tag = "Books"
)]
#[instrument(skip(state))]
pub async fn get_book(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<BookId>,
) -> Result<Json<Book>, AppError> {
    let book = BookService::get_book(&state.db, id).await?;
    Ok(Json(book))
}

#[utoipa::path(
    post,
    path = "/api/books",
    request_body = CreateBookDto,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Books"
)]
#[instrument(skip(state, dto))]
pub async fn create_book(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateBookDto>,
) -> Result<(StatusCode, Json<Book>), AppError> {
    let book = BookService::create_book(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

/// Create many books at once
///
/// The body is a JSON array. Nothing is stored unless every item is valid.
#[utoipa::path(
    post,
    path = "/api/books/all",
    request_body = Vec<CreateBookDto>,
    responses(
        (status = 201, description = "Books created", body = Vec<Book>),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Books"
)]
#[instrument(skip(state, dto))]
pub async fn create_books(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<BulkCreateBooksDto>,
) -> Result<(StatusCode, Json<Vec<Book>>), AppError> {
    let books = BookService::create_books(&state.db, dto.books).await?;
    Ok((StatusCode::CREATED, Json(books)))
}

#[utoipa::path(
    put,
    path = "/api/books/{id}",
    params(
        ("id" = Uuid, Path, description = "Book ID")
    ),
    request_body = UpdateBookDto,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 404, description = "Book not found", body = ErrorResponse)
    ),
    tag = "Books"
)]
#[instrument(skip(state, dto))]
pub async fn update_book(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<BookId>,
    ValidatedJson(dto): ValidatedJson<UpdateBookDto>,
) -> Result<Json<Book>, AppError> {
    let book = BookService::update_book(&state.db, id, dto).await?;
    Ok(Json(book))
}

#[utoipa::path(
    delete,
    path = "/api/books/{id}",
    params(
        ("id" = Uuid, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book successfully deleted", body = MessageResponse),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 404, description = "Book not found", body = ErrorResponse)
    ),
    tag = "Books"
)]
#[instrument(skip(state))]
pub async fn delete_book(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<BookId>,
) -> Result<Json<MessageResponse>, AppError> {
    BookService::delete_book(&state.db, id).await?;
    Ok(Json(MessageResponse::new("Book successfully deleted")))
}
