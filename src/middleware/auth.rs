//! Bearer token gate for account-owned routes.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use bookflow_auth::{Claims, verify_token};
use bookflow_core::AppError;
use bookflow_models::AccountId;

use crate::state::AppState;

/// Verified identity of the caller.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn account_id(&self) -> Result<AccountId, AppError> {
        self.0
            .account_uuid()
            .map(AccountId::from)
            .ok_or_else(|| AppError::unauthorized("Invalid token"))
    }

    pub fn username(&self) -> &str {
        &self.0.username
    }
}

/// Extracts the token from `Authorization: Bearer <token>`.
///
/// Anything else (missing header, other scheme, empty token) is rejected
/// with `Unauthorized` before any verification happens.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AppError::unauthorized("Unauthorized"))
}

fn authenticate(headers: &HeaderMap, state: &AppState) -> Result<AuthUser, AppError> {
    let token = bearer_token(headers)?;
    let claims = verify_token(token, &state.jwt_config).map_err(|err| {
        tracing::debug!(reason = %err, "Rejected bearer token");
        AppError::from(err)
    })?;

    Ok(AuthUser(claims))
}

/// Rejects the request unless it carries a valid bearer token.
///
/// On success the verified [`AuthUser`] is stored in the request extensions
/// for handlers downstream.
///
/// ```rust,ignore
/// let routes = init_user_books_router()
///     .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));
/// ```
pub async fn require_auth(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    match authenticate(req.headers(), &state) {
        Ok(auth_user) => {
            req.extensions_mut().insert(auth_user);
            next.run(req).await
        }
        Err(err) => err.into_response(),
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(auth_user) = parts.extensions.get::<AuthUser>() {
            return Ok(auth_user.clone());
        }

        authenticate(&parts.headers, state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token() {
        assert_eq!(bearer_token(&headers("Bearer abc.def.ghi")).unwrap(), "abc.def.ghi");
        assert!(bearer_token(&HeaderMap::new()).is_err());
        assert!(bearer_token(&headers("Basic dXNlcjpwYXNz")).is_err());
        assert!(bearer_token(&headers("Bearer ")).is_err());
        assert!(bearer_token(&headers("Bearer    ")).is_err());
        assert!(bearer_token(&headers("abc.def.ghi")).is_err());
    }

    #[test]
    fn test_account_id_requires_uuid_subject() {
        let claims = Claims {
            sub: "not-a-uuid".to_string(),
            username: "reader".to_string(),
            iat: 0,
            exp: 1,
        };
        assert!(matches!(
            AuthUser(claims).account_id(),
            Err(AppError::Unauthorized(_))
        ));
    }
}
