use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    create_book, create_books, delete_book, get_book, list_books, update_book,
};

pub fn init_books_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_books).post(create_book))
        .route("/all", post(create_books))
        .route("/{id}", get(get_book).put(update_book).delete(delete_book))
}
