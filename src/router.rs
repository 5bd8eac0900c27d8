use axum::http::{HeaderValue, Method, header};
use axum::{Json, Router, middleware, routing::get};
use bookflow_config::CorsConfig;
use bookflow_models::MessageResponse;
use tower_http::cors::{AllowOrigin, CorsLayer};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::middleware::auth::require_auth;
use crate::modules::auth::init_auth_router;
use crate::modules::authors::init_authors_router;
use crate::modules::books::init_books_router;
use crate::modules::genres::init_genres_router;
use crate::modules::user_books::init_user_books_router;
use crate::modules::users::init_users_router;
use crate::state::AppState;

/// Liveness check
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Backend API is running", body = MessageResponse)
    ),
    tag = "Health"
)]
pub async fn health() -> Json<MessageResponse> {
    Json(MessageResponse::new("Backend API is running"))
}

pub fn init_router(state: AppState) -> Router {
    let cors = cors_layer(&state.cors_config);

    Router::new()
        .route("/", get(health))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .nest("/api/v1", init_auth_router())
        .nest(
            "/api",
            Router::new()
                .nest("/books", init_books_router())
                .nest("/authors", init_authors_router())
                .nest("/genres", init_genres_router())
                .nest("/users", init_users_router())
                .nest(
                    "/user-books",
                    init_user_books_router()
                        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth)),
                ),
        )
        .with_state(state)
        .layer(cors)
        .layer(middleware::from_fn(logging_middleware))
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT]);

    // Credentials cannot be combined with a wildcard origin.
    if config.allows_any_origin() {
        return layer.allow_origin(AllowOrigin::any());
    }

    let allowed_origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    layer
        .allow_origin(allowed_origins)
        .allow_credentials(true)
}
