//! Application error type and its HTTP mapping.
//!
//! Every handler returns `Result<_, AppError>`. The variants are the complete
//! error taxonomy of the API:
//!
//! | Variant | Status | Body |
//! |---------|--------|------|
//! | [`AppError::Validation`] | 400 | `{"message", "error": [violation, ...]}` |
//! | [`AppError::Unauthorized`] | 401 | `{"message"}` |
//! | [`AppError::NotFound`] | 404 | `{"message"}` |
//! | [`AppError::Conflict`] | 409 | `{"message"}` |
//! | [`AppError::Internal`] | 500 | `{"message", "error": "internal server error"}` |
//!
//! Internal errors keep their source for logging; the source is never
//! written to the response body.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;
use utoipa::ToSchema;
use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

/// A single violated input constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldViolation {
    /// Dotted path of the offending field (`title`, `books[2].pages`)
    pub field: String,
    /// Machine-readable rule name (`required`, `length`, `email`, ...)
    pub rule: String,
    /// Human-readable description
    pub message: String,
}

impl FieldViolation {
    pub fn new(
        field: impl Into<String>,
        rule: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            rule: rule.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed or missing input.
    #[error("{message}")]
    Validation {
        message: String,
        violations: Vec<FieldViolation>,
    },

    /// Missing, invalid or expired token, or bad credentials.
    #[error("{0}")]
    Unauthorized(String),

    /// The referenced entity does not exist (or is not visible to the caller).
    #[error("{0}")]
    NotFound(String),

    /// A uniqueness constraint was violated.
    #[error("{0}")]
    Conflict(String),

    /// Unexpected store or runtime failure.
    #[error("{message}: {source}")]
    Internal {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    pub fn validation(violations: Vec<FieldViolation>) -> Self {
        Self::Validation {
            message: "Validation failed".to_string(),
            violations,
        }
    }

    pub fn invalid_field(
        field: impl Into<String>,
        rule: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::validation(vec![FieldViolation::new(field, rule, message)])
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn internal<E>(message: impl Into<String>, err: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        Self::Internal {
            message: message.into(),
            source: err.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Replaces the message of an internal error, keeping its source.
    ///
    /// Other variants pass through untouched, so services can attach an
    /// operation-specific message without hiding a 404 or 409.
    pub fn context(self, message: impl Into<String>) -> Self {
        match self {
            Self::Internal { source, .. } => Self::Internal {
                message: message.into(),
                source,
            },
            other => other,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match &self {
            Self::Validation {
                message,
                violations,
            } => json!({ "message": message, "error": violations }),
            Self::Internal { message, source } => {
                tracing::error!(error = ?source, context = %message, "Request failed");
                json!({ "message": message, "error": "internal server error" })
            }
            other => json!({ "message": other.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        if matches!(err, sqlx::Error::RowNotFound) {
            return Self::not_found("Resource not found");
        }

        if let sqlx::Error::Database(db_err) = &err
            && db_err.is_unique_violation()
        {
            return Self::conflict("Resource already exists");
        }

        Self::internal("Database error", err)
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        Self::validation(collect_violations(&errors))
    }
}

/// Flattens nested `validator` errors into a sorted list of violations.
pub fn collect_violations(errors: &ValidationErrors) -> Vec<FieldViolation> {
    let mut violations = Vec::new();
    push_violations(errors, None, &mut violations);
    violations.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.rule.cmp(&b.rule)));
    violations
}

fn push_violations(
    errors: &ValidationErrors,
    prefix: Option<&str>,
    violations: &mut Vec<FieldViolation>,
) {
    for (field, kind) in errors.errors() {
        let path = match prefix {
            Some(prefix) => format!("{prefix}.{field}"),
            None => field.to_string(),
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for error in field_errors {
                    violations.push(FieldViolation::new(
                        path.clone(),
                        error.code.to_string(),
                        describe(&path, error),
                    ));
                }
            }
            ValidationErrorsKind::Struct(inner) => {
                push_violations(inner, Some(&path), violations);
            }
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    let item_path = format!("{path}[{index}]");
                    push_violations(inner, Some(&item_path), violations);
                }
            }
        }
    }
}

fn describe(field: &str, error: &ValidationError) -> String {
    if let Some(message) = &error.message {
        return message.to_string();
    }

    let param = |name: &str| error.params.get(name).map(Value::to_string);

    match &*error.code {
        "length" => match (param("min"), param("max")) {
            (Some(min), Some(max)) => {
                format!("{field} must be between {min} and {max} characters")
            }
            (Some(min), None) => format!("{field} must be at least {min} characters"),
            (None, Some(max)) => format!("{field} must be at most {max} characters"),
            (None, None) => format!("{field} has an invalid length"),
        },
        "range" => match (param("min"), param("max")) {
            (Some(min), Some(max)) => format!("{field} must be between {min} and {max}"),
            (Some(min), None) => format!("{field} must be at least {min}"),
            (None, Some(max)) => format!("{field} must be at most {max}"),
            (None, None) => format!("{field} is out of range"),
        },
        "email" => format!("{field} must be a valid email address"),
        "url" => format!("{field} must be a valid URL"),
        "required" => format!("{field} is required"),
        _ => format!("{field} is invalid"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use validator::Validate;

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 3, max = 12))]
        username: String,
        #[validate(email)]
        email: String,
        #[validate(range(min = 1))]
        pages: i32,
    }

    #[derive(Validate)]
    struct Batch {
        #[validate(nested)]
        items: Vec<Sample>,
    }

    fn valid_sample() -> Sample {
        Sample {
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
            pages: 10,
        }
    }

    async fn body_json(err: AppError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::validation(vec![]).status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::unauthorized("x").status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::not_found("x").status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::conflict("x").status(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::internal("x", anyhow::anyhow!("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_collect_violations_flat() {
        let sample = Sample {
            username: "al".to_string(),
            email: "not-an-email".to_string(),
            pages: 0,
        };
        let errors = sample.validate().unwrap_err();
        let violations = collect_violations(&errors);

        let fields: Vec<(&str, &str)> = violations
            .iter()
            .map(|v| (v.field.as_str(), v.rule.as_str()))
            .collect();
        assert_eq!(
            fields,
            vec![("email", "email"), ("pages", "range"), ("username", "length")]
        );
        assert_eq!(
            violations[2].message,
            "username must be between 3 and 12 characters"
        );
    }

    #[test]
    fn test_collect_violations_nested_list() {
        let mut bad = valid_sample();
        bad.pages = -1;
        let batch = Batch {
            items: vec![valid_sample(), bad],
        };

        let errors = batch.validate().unwrap_err();
        let violations = collect_violations(&errors);

        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, "items[1].pages");
        assert_eq!(violations[0].rule, "range");
    }

    #[test]
    fn test_sqlx_row_not_found_maps_to_404() {
        let err = AppError::from(sqlx::Error::RowNotFound);
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_sqlx_other_errors_map_to_500() {
        let err = AppError::from(sqlx::Error::PoolTimedOut);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_context_only_rewrites_internal() {
        let err = AppError::internal("Database error", anyhow::anyhow!("boom"))
            .context("Error fetching books");
        assert_eq!(err.to_string(), "Error fetching books: boom");

        let err = AppError::not_found("Book not found").context("Error fetching books");
        assert_eq!(err.to_string(), "Book not found");
    }

    #[tokio::test]
    async fn test_validation_body_shape() {
        let err = AppError::invalid_field("title", "required", "title is required");
        let (status, body) = body_json(err).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Validation failed");
        assert_eq!(body["error"][0]["field"], "title");
        assert_eq!(body["error"][0]["rule"], "required");
    }

    #[tokio::test]
    async fn test_internal_body_hides_source() {
        let err = AppError::internal(
            "Error fetching books",
            anyhow::anyhow!("connection refused: secret-host:5432"),
        );
        let (status, body) = body_json(err).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Error fetching books");
        assert_eq!(body["error"], "internal server error");
        assert!(!body.to_string().contains("secret-host"));
    }

    #[tokio::test]
    async fn test_simple_body_shape() {
        let (status, body) = body_json(AppError::conflict("User already exists")).await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body, json!({ "message": "User already exists" }));
    }
}
