use axum::{
    Router,
    routing::{delete, get},
};

use crate::state::AppState;

use super::controller::{delete_user, list_users};

pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/{id}", delete(delete_user))
}
