use bookflow_core::AppError;
use bookflow_models::AccountId;
use bookflow_models::accounts::AccountView;
use sqlx::PgPool;
use tracing::{info, instrument};

pub struct UserService;

impl UserService {
    #[instrument(skip(db))]
    pub async fn list_users(db: &PgPool) -> Result<Vec<AccountView>, AppError> {
        let users = sqlx::query_as::<_, AccountView>(
            "SELECT id, username, email, created_at FROM users ORDER BY created_at, id",
        )
        .fetch_all(db)
        .await
        .map_err(|e| AppError::from(e).context("Failed to list users"))?;

        Ok(users)
    }

    #[instrument(skip(db))]
    pub async fn delete_user(db: &PgPool, id: AccountId) -> Result<AccountView, AppError> {
        let deleted = sqlx::query_as::<_, AccountView>(
            "DELETE FROM users WHERE id = $1 RETURNING id, username, email, created_at",
        )
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

        info!(account_id = %id, "Account deleted");
        Ok(deleted)
    }
}
