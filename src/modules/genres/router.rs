use axum::{Router, routing::post};

use crate::state::AppState;

use super::controller::{create_genre, list_genres};

pub fn init_genres_router() -> Router<AppState> {
    Router::new().route("/", post(create_genre).get(list_genres))
}
