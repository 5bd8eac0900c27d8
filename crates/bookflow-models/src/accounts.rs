//! Account records and the signup/signin DTOs.
//!
//! The raw password only ever lives in [`SignupRequest`] / [`SigninRequest`];
//! their `Debug` output redacts it. [`Account`] holds the bcrypt hash and is
//! never serialized; responses use [`AccountView`] or [`PublicUser`].

use std::fmt;

use bookflow_core::serde::deserialize_trimmed;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::AccountId;

/// Row of the `users` table.
#[derive(Clone, FromRow)]
pub struct Account {
    pub id: AccountId,
    pub username: String,
    pub email: String,
    /// bcrypt hash
    pub password: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .finish()
    }
}

/// Account without its password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountView {
    pub id: AccountId,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<Account> for AccountView {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            username: account.username,
            email: account.email,
            created_at: account.created_at,
        }
    }
}

#[derive(Clone, Deserialize, Validate, ToSchema)]
pub struct SignupRequest {
    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(length(min = 3, max = 12))]
    #[schema(example = "reader42")]
    pub username: String,
    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(email, length(min = 4))]
    #[schema(example = "reader@example.com")]
    pub email: String,
    #[validate(length(min = 5, max = 15))]
    #[schema(example = "hunter22")]
    pub password: String,
}

impl fmt::Debug for SignupRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .finish()
    }
}

#[derive(Clone, Deserialize, Validate, ToSchema)]
pub struct SigninRequest {
    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(length(min = 3, max = 12))]
    #[schema(example = "reader42")]
    pub username: String,
    #[validate(length(min = 5, max = 15))]
    #[schema(example = "hunter22")]
    pub password: String,
}

impl fmt::Debug for SigninRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigninRequest")
            .field("username", &self.username)
            .field("password", &"[redacted]")
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SignupResponse {
    pub message: String,
    pub result: AccountView,
}

/// Body of `DELETE /api/users/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDeletedResponse {
    pub message: String,
    pub deleted_user: AccountView,
}

/// Identity echoed back on signin.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PublicUser {
    pub username: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SigninResponse {
    pub message: String,
    pub token: String,
    pub user: PublicUser,
}
