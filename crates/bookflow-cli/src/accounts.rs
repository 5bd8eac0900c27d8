use anyhow::bail;
use bookflow::modules::auth::service::AuthService;
use bookflow_core::errors::collect_violations;
use bookflow_models::accounts::{AccountView, SignupRequest};
use sqlx::PgPool;
use validator::Validate;

/// Creates an account through the same path as `POST /api/v1/signup`.
pub async fn create_user(db: &PgPool, request: SignupRequest) -> anyhow::Result<AccountView> {
    let request = normalize(request);

    if let Err(errors) = request.validate() {
        bail!("invalid account details: {}", violation_messages(&errors));
    }

    Ok(AuthService::signup(db, request).await?)
}

/// Applies the trimming the HTTP deserializer does for prompted input.
fn normalize(request: SignupRequest) -> SignupRequest {
    SignupRequest {
        username: request.username.trim().to_string(),
        email: request.email.trim().to_string(),
        password: request.password,
    }
}

fn violation_messages(errors: &validator::ValidationErrors) -> String {
    collect_violations(errors)
        .into_iter()
        .map(|v| v.message)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims_identity_not_password() {
        let request = normalize(SignupRequest {
            username: "  reader ".to_string(),
            email: " reader@example.com ".to_string(),
            password: " hunter22 ".to_string(),
        });
        assert_eq!(request.username, "reader");
        assert_eq!(request.email, "reader@example.com");
        assert_eq!(request.password, " hunter22 ");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_violation_messages_lists_every_field() {
        let request = normalize(SignupRequest {
            username: "ab".to_string(),
            email: "nope".to_string(),
            password: "1234".to_string(),
        });
        let message = violation_messages(&request.validate().unwrap_err());
        assert!(message.contains("username"));
        assert!(message.contains("password"));
        assert_eq!(message.matches("; ").count(), 2);
    }
}
