//! Books owned by a single account.
//!
//! Unlike catalog books, author and genre are free text here.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::{AccountId, UserBookId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserBook {
    pub id: UserBookId,
    pub account_id: AccountId,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub published_date: NaiveDate,
    pub image: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserBookDto {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 100))]
    pub author: String,
    #[validate(length(min = 1, max = 100))]
    pub genre: String,
    pub published_date: NaiveDate,
    #[validate(url)]
    #[schema(example = "https://covers.example.com/dune.jpg")]
    pub image: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserBookDto {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub author: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub genre: Option<String>,
    pub published_date: Option<NaiveDate>,
    #[validate(url)]
    pub image: Option<String>,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserBookCreatedResponse {
    pub message: String,
    pub new_book: UserBook,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserBookDeletedResponse {
    pub message: String,
    pub deleted_book: UserBook,
}
