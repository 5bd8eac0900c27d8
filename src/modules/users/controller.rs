use axum::{Json, extract::State};
use bookflow_core::AppError;
use bookflow_models::AccountId;
use bookflow_models::accounts::{AccountView, UserDeletedResponse};
use tracing::instrument;

use crate::docs::ErrorResponse;
use crate::state::AppState;
use crate::validator::ValidatedPath;

use super::service::UserService;

/// List all accounts (password hashes excluded)
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "All accounts", body = Vec<AccountView>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<AccountView>>, AppError> {
    let users = UserService::list_users(&state.db).await?;
    Ok(Json(users))
}

/// Delete an account
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(
        ("id" = Uuid, Path, description = "Account ID")
    ),
    responses(
        (status = 200, description = "User successfully deleted", body = UserDeletedResponse),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<AccountId>,
) -> Result<Json<UserDeletedResponse>, AppError> {
    let deleted_user = UserService::delete_user(&state.db, id).await?;
    Ok(Json(UserDeletedResponse {
        message: "User successfully deleted".to_string(),
        deleted_user,
    }))
}
