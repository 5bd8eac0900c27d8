use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{
    create_user_book, delete_user_book, get_user_book, list_user_books, update_user_book,
};

/// Routes for account-owned books. The caller installs the auth gate.
pub fn init_user_books_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_user_books).post(create_user_book))
        .route(
            "/{id}",
            get(get_user_book)
                .put(update_user_book)
                .delete(delete_user_book),
        )
}
