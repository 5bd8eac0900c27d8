use bookflow_core::PaginationParams;
use bookflow_core::serde::{deserialize_optional_i64, deserialize_optional_trimmed};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::ids::{AuthorId, BookId, GenreId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author_id: AuthorId,
    pub genre_id: GenreId,
    pub pages: i32,
    pub published_date: NaiveDate,
    pub description: Option<String>,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookDto {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub author_id: AuthorId,
    pub genre_id: GenreId,
    #[validate(range(min = 1))]
    pub pages: i32,
    pub published_date: NaiveDate,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[validate(url)]
    pub image: Option<String>,
}

/// Partial update; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookDto {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    pub author_id: Option<AuthorId>,
    pub genre_id: Option<GenreId>,
    #[validate(range(min = 1))]
    pub pages: Option<i32>,
    pub published_date: Option<NaiveDate>,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[validate(url)]
    pub image: Option<String>,
}

/// Upper bound on rows per bulk insert; keeps the statement under the
/// PostgreSQL bind parameter limit.
pub const MAX_BULK_BOOKS: u64 = 500;

/// Body of the bulk create endpoint: a bare JSON array of books.
///
/// Item violations are reported as `books[<index>].<field>`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(transparent)]
pub struct BulkCreateBooksDto {
    #[validate(
        length(min = 1, max = MAX_BULK_BOOKS, message = "between 1 and 500 books are required"),
        nested
    )]
    pub books: Vec<CreateBookDto>,
}

/// Query string of `GET /api/books`.
///
/// `genre` and `author` are names, not ids.
#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BookFilterParams {
    /// Genre name
    #[serde(default, deserialize_with = "deserialize_optional_trimmed")]
    #[validate(length(max = 100))]
    pub genre: Option<String>,
    /// Author name
    #[serde(default, deserialize_with = "deserialize_optional_trimmed")]
    #[validate(length(max = 100))]
    pub author: Option<String>,
    /// Page number (1-indexed, default: 1)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page: Option<i64>,
    /// Items per page (1-100, default: 10)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub limit: Option<i64>,
}

impl BookFilterParams {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams {
            limit: self.limit,
            page: self.page,
        }
    }

    pub fn genre_name(&self) -> Option<&str> {
        self.genre.as_deref().filter(|name| !name.is_empty())
    }

    pub fn author_name(&self) -> Option<&str> {
        self.author.as_deref().filter(|name| !name.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookflow_core::errors::collect_violations;
    use serde_json::json;

    fn book_json(title: &str, pages: i32) -> serde_json::Value {
        json!({
            "title": title,
            "authorId": AuthorId::new(),
            "genreId": GenreId::new(),
            "pages": pages,
            "publishedDate": "2020-05-17",
        })
    }

    #[test]
    fn test_create_book_dto_parses_and_validates() {
        let dto: CreateBookDto = serde_json::from_value(book_json("Dune", 412)).unwrap();
        assert_eq!(dto.published_date, NaiveDate::from_ymd_opt(2020, 5, 17).unwrap());
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_create_book_dto_rules() {
        let mut dto: CreateBookDto = serde_json::from_value(book_json("", 0)).unwrap();
        dto.image = Some("not a url".to_string());

        let violations = collect_violations(&dto.validate().unwrap_err());
        let fields: Vec<(&str, &str)> = violations
            .iter()
            .map(|v| (v.field.as_str(), v.rule.as_str()))
            .collect();
        assert_eq!(
            fields,
            vec![("image", "url"), ("pages", "range"), ("title", "length")]
        );
    }

    #[test]
    fn test_update_book_dto_skips_absent_fields() {
        let dto: UpdateBookDto = serde_json::from_value(json!({ "pages": 10 })).unwrap();
        assert!(dto.validate().is_ok());
        assert!(dto.title.is_none());

        let dto = UpdateBookDto {
            title: Some(String::new()),
            ..Default::default()
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_bulk_dto_is_a_bare_array_with_indexed_errors() {
        let body = json!([book_json("One", 10), book_json("Two", 10), book_json("", 10)]);
        let dto: BulkCreateBooksDto = serde_json::from_value(body).unwrap();
        assert_eq!(dto.books.len(), 3);

        let violations = collect_violations(&dto.validate().unwrap_err());
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, "books[2].title");
        assert_eq!(violations[0].rule, "length");
    }

    #[test]
    fn test_bulk_dto_rejects_empty() {
        let dto: BulkCreateBooksDto = serde_json::from_value(json!([])).unwrap();
        let violations = collect_violations(&dto.validate().unwrap_err());
        assert_eq!(violations[0].field, "books");
        assert_eq!(violations[0].message, "between 1 and 500 books are required");
    }

    #[test]
    fn test_bulk_dto_upper_bound() {
        let at_limit = vec![book_json("Dune", 412); MAX_BULK_BOOKS as usize];
        let dto: BulkCreateBooksDto = serde_json::from_value(json!(at_limit)).unwrap();
        assert!(dto.validate().is_ok());

        let over_limit = vec![book_json("Dune", 412); MAX_BULK_BOOKS as usize + 1];
        let dto: BulkCreateBooksDto = serde_json::from_value(json!(over_limit)).unwrap();
        let violations = collect_violations(&dto.validate().unwrap_err());
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, "books");
        assert_eq!(violations[0].rule, "length");
    }

    #[test]
    fn test_book_uses_camel_case_on_the_wire() {
        let dto: CreateBookDto = serde_json::from_value(book_json("Dune", 412)).unwrap();
        let json = serde_json::to_value(&dto).unwrap();
        assert!(json.get("authorId").is_some());
        assert!(json.get("publishedDate").is_some());
        assert!(json.get("author_id").is_none());

        let snake = json!({
            "title": "Dune",
            "author_id": AuthorId::new(),
            "genre_id": GenreId::new(),
            "pages": 412,
            "published_date": "1965-08-01",
        });
        let err = serde_json::from_value::<CreateBookDto>(snake).unwrap_err();
        assert!(err.to_string().contains("missing field `authorId`"));
    }

    #[test]
    fn test_filter_params_pagination() {
        let params = BookFilterParams {
            genre: Some(String::new()),
            page: Some(3),
            limit: Some(500),
            ..Default::default()
        };
        assert_eq!(params.genre_name(), None);
        assert_eq!(params.pagination().limit(), 100);
        assert_eq!(params.pagination().offset(), 200);
    }
}
