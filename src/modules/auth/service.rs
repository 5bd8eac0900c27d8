use bookflow_auth::create_access_token;
use bookflow_config::JwtConfig;
use bookflow_core::AppError;
use bookflow_core::password::{
    DUMMY_PASSWORD_HASH, hash_password_blocking, verify_password_blocking,
};
use bookflow_models::accounts::{
    Account, AccountView, PublicUser, SigninRequest, SigninResponse, SignupRequest,
};
use sqlx::PgPool;
use tracing::{info, instrument};

pub struct AuthService;

fn user_exists() -> AppError {
    AppError::conflict("User already exists")
}

fn invalid_credentials() -> AppError {
    AppError::unauthorized("Invalid username or password")
}

impl AuthService {
    /// Creates an account unless the username or email is taken.
    ///
    /// The pre-check gives the common case a clean 409; the unique indexes
    /// catch a concurrent signup that slips past it.
    #[instrument(skip(db, dto), fields(username = %dto.username))]
    pub async fn signup(db: &PgPool, dto: SignupRequest) -> Result<AccountView, AppError> {
        let taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE username = $1 OR email = $2)",
        )
        .bind(&dto.username)
        .bind(&dto.email)
        .fetch_one(db)
        .await?;

        if taken {
            return Err(user_exists());
        }

        let SignupRequest {
            username,
            email,
            password,
        } = dto;
        let password_hash = hash_password_blocking(password).await?;

        let account = sqlx::query_as::<_, AccountView>(
            r#"INSERT INTO users (username, email, password)
               VALUES ($1, $2, $3)
               RETURNING id, username, email, created_at"#,
        )
        .bind(&username)
        .bind(&email)
        .bind(&password_hash)
        .fetch_one(db)
        .await
        .map_err(|e| match AppError::from(e) {
            AppError::Conflict(_) => user_exists(),
            other => other.context("Failed to create user"),
        })?;

        info!(account_id = %account.id, "Account created");
        Ok(account)
    }

    /// Checks credentials and issues a session token.
    ///
    /// An unknown username and a wrong password produce the same error.
    #[instrument(skip(db, dto, jwt_config), fields(username = %dto.username))]
    pub async fn signin(
        db: &PgPool,
        dto: SigninRequest,
        jwt_config: &JwtConfig,
    ) -> Result<SigninResponse, AppError> {
        let account = sqlx::query_as::<_, Account>(
            r#"SELECT id, username, email, password, created_at, updated_at
               FROM users WHERE username = $1"#,
        )
        .bind(&dto.username)
        .fetch_optional(db)
        .await?;

        let Some(account) = account else {
            verify_password_blocking(dto.password, DUMMY_PASSWORD_HASH.to_string()).await?;
            return Err(invalid_credentials());
        };

        let Account {
            id,
            username,
            email,
            password: password_hash,
            ..
        } = account;

        if !verify_password_blocking(dto.password, password_hash).await? {
            return Err(invalid_credentials());
        }

        let token = create_access_token(id.into_inner(), &username, jwt_config)?;

        info!(account_id = %id, "Signed in");
        Ok(SigninResponse {
            message: "Signed in successfully".to_string(),
            token,
            user: PublicUser { username, email },
        })
    }
}

