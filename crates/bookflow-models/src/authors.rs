use bookflow_core::serde::deserialize_trimmed;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::AuthorId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: AuthorId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateAuthorDto {
    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(length(min = 1, max = 100))]
    #[schema(example = "Ursula K. Le Guin")]
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_blank_name_is_rejected_after_trim() {
        let dto: CreateAuthorDto = serde_json::from_value(json!({ "name": "   " })).unwrap();
        assert_eq!(dto.name, "");
        assert!(dto.validate().is_err());
    }
}
