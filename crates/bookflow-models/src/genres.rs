use bookflow_core::serde::deserialize_trimmed;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::GenreId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Genre {
    pub id: GenreId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateGenreDto {
    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(length(min = 1, max = 100))]
    #[schema(example = "Science Fiction")]
    pub name: String,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
}
