use bookflow_core::FieldViolation;
use bookflow_models::MessageResponse;
use bookflow_models::accounts::{
    AccountView, PublicUser, SigninRequest, SigninResponse, SignupRequest, SignupResponse,
    UserDeletedResponse,
};
use bookflow_models::authors::{Author, CreateAuthorDto};
use bookflow_models::books::{Book, CreateBookDto, UpdateBookDto};
use bookflow_models::genres::{CreateGenreDto, Genre};
use bookflow_models::user_books::{
    CreateUserBookDto, UpdateUserBookDto, UserBook, UserBookCreatedResponse,
    UserBookDeletedResponse,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};

/// Error body. `error` lists the violations of a 400 response.
#[derive(ToSchema)]
pub struct ErrorResponse {
    pub message: String,
    pub error: Option<Vec<FieldViolation>>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::router::health,
        crate::modules::auth::controller::signup,
        crate::modules::auth::controller::signin,
        crate::modules::books::controller::list_books,
        crate::modules::books::controller::get_book,
        crate::modules::books::controller::create_book,
        crate::modules::books::controller::create_books,
        crate::modules::books::controller::update_book,
        crate::modules::books::controller::delete_book,
        crate::modules::authors::controller::create_author,
        crate::modules::authors::controller::list_authors,
        crate::modules::genres::controller::create_genre,
        crate::modules::genres::controller::list_genres,
        crate::modules::users::controller::list_users,
        crate::modules::users::controller::delete_user,
        crate::modules::user_books::controller::create_user_book,
        crate::modules::user_books::controller::list_user_books,
        crate::modules::user_books::controller::get_user_book,
        crate::modules::user_books::controller::update_user_book,
        crate::modules::user_books::controller::delete_user_book,
    ),
    components(
        schemas(
            ErrorResponse,
            FieldViolation,
            MessageResponse,
            SignupRequest,
            SignupResponse,
            SigninRequest,
            SigninResponse,
            AccountView,
            PublicUser,
            Book,
            CreateBookDto,
            UpdateBookDto,
            Author,
            CreateAuthorDto,
            Genre,
            CreateGenreDto,
            UserBook,
            CreateUserBookDto,
            UpdateUserBookDto,
            UserBookCreatedResponse,
            UserBookDeletedResponse,
            UserDeletedResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness"),
        (name = "Authentication", description = "Signup and signin"),
        (name = "Books", description = "Book catalog"),
        (name = "Authors", description = "Catalog authors"),
        (name = "Genres", description = "Catalog genres"),
        (name = "Users", description = "Account administration"),
        (name = "User Books", description = "Books owned by the signed-in account")
    ),
    info(
        title = "BookFlow API",
        version = "0.1.0",
        description = "Book catalog backend built with Rust, Axum, and PostgreSQL.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        for expected in [
            "/",
            "/api/v1/signup",
            "/api/v1/signin",
            "/api/books",
            "/api/books/all",
            "/api/books/{id}",
            "/api/authors",
            "/api/genres",
            "/api/users",
            "/api/users/{id}",
            "/api/user-books",
            "/api/user-books/{id}",
        ] {
            assert!(paths.contains(&expected), "missing {expected}");
        }
    }

    #[test]
    fn test_bearer_scheme_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
