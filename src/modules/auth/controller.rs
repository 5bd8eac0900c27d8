use axum::{Json, extract::State, http::StatusCode};
use bookflow_core::AppError;
use bookflow_models::accounts::{SigninRequest, SigninResponse, SignupRequest, SignupResponse};
use tracing::instrument;

use crate::docs::ErrorResponse;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service::AuthService;

/// Create an account
#[utoipa::path(
    post,
    path = "/api/v1/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "User successfully created", body = SignupResponse),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 409, description = "User already exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<SignupRequest>,
) -> Result<(StatusCode, Json<SignupResponse>), AppError> {
    let account = AuthService::signup(&state.db, dto).await?;

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            message: "User successfully created".to_string(),
            result: account,
        }),
    ))
}

/// Sign in and receive a bearer token
#[utoipa::path(
    post,
    path = "/api/v1/signin",
    request_body = SigninRequest,
    responses(
        (status = 200, description = "Signed in successfully", body = SigninResponse),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 401, description = "Invalid username or password", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn signin(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<SigninRequest>,
) -> Result<Json<SigninResponse>, AppError> {
    let response = AuthService::signin(&state.db, dto, &state.jwt_config).await?;
    Ok(Json(response))
}
