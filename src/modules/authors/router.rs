use axum::{Router, routing::post};

use crate::state::AppState;

use super::controller::{create_author, list_authors};

pub fn init_authors_router() -> Router<AppState> {
    Router::new().route("/", post(create_author).get(list_authors))
}
