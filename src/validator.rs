//! Validating extractors.
//!
//! Every input failure, whether the body cannot be parsed or a parsed value
//! breaks a rule, becomes the same 400 response:
//!
//! ```json
//! {
//!   "message": "Validation failed",
//!   "error": [{"field": "title", "rule": "required", "message": "title is required"}]
//! }
//! ```

use axum::{
    Json,
    extract::{
        FromRequest, FromRequestParts, Path, Query, Request,
        path::ErrorKind,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::request::Parts,
};
use bookflow_core::{AppError, FieldViolation};
use serde::de::DeserializeOwned;
use validator::Validate;

#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::validation(vec![json_violation(&rejection)]))?;

        value.validate()?;

        Ok(ValidatedJson(value))
    }
}

fn json_violation(rejection: &JsonRejection) -> FieldViolation {
    match rejection {
        JsonRejection::JsonDataError(_) => data_violation(&rejection.body_text()),
        JsonRejection::JsonSyntaxError(_) => {
            FieldViolation::new("body", "json", "body must be valid JSON")
        }
        JsonRejection::MissingJsonContentType(_) => FieldViolation::new(
            "body",
            "content_type",
            "Content-Type must be application/json",
        ),
        _ => FieldViolation::new("body", "body", "request body could not be read"),
    }
}

/// Turns a deserialization error message into a violation.
///
/// Messages look like `...target type: missing field `title` at line 1 column 2`
/// or `...target type: pages: invalid type: string "x", expected i32 at line ...`.
fn data_violation(text: &str) -> FieldViolation {
    let detail = text
        .split_once("target type: ")
        .map_or(text, |(_, detail)| detail);

    if let Some((prefix, rest)) = detail.split_once("missing field `") {
        let name = rest.split('`').next().unwrap_or("body");
        let field = match prefix.strip_suffix(": ") {
            Some(path) if is_path(path) => format!("{path}.{name}"),
            _ => name.to_string(),
        };
        let message = format!("{field} is required");
        return FieldViolation::new(field, "required", message);
    }

    let field = detail
        .split_once(": ")
        .map(|(path, _)| path)
        .filter(|path| is_path(path))
        .unwrap_or("body");
    FieldViolation::new(field, "type", format!("{field} has an invalid type or format"))
}

fn is_path(candidate: &str) -> bool {
    !candidate.is_empty() && candidate != "." && !candidate.contains(char::is_whitespace)
}

/// Path parameters; a malformed identifier is a `uuid` violation.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedPath<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                let field = path_field(&rejection);
                let message = format!("{field} must be a valid UUID");
                AppError::invalid_field(field, "uuid", message)
            })?;

        Ok(ValidatedPath(value))
    }
}

fn path_field(rejection: &PathRejection) -> String {
    if let PathRejection::FailedToDeserializePathParams(err) = rejection {
        match err.kind() {
            ErrorKind::ParseErrorAtKey { key, .. }
            | ErrorKind::DeserializeError { key, .. }
            | ErrorKind::InvalidUtf8InPathParam { key } => return key.clone(),
            _ => {}
        }
    }
    "id".to_string()
}

/// Query string parameters, validated after parsing.
#[derive(Debug, Clone, Default)]
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection: QueryRejection| {
                tracing::debug!(reason = %rejection.body_text(), "Rejected query string");
                AppError::invalid_field("query", "query", "query string is invalid")
            })?;

        value.validate()?;

        Ok(ValidatedQuery(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PREFIX: &str = "Failed to deserialize the JSON body into the target type: ";

    fn violation(detail: &str) -> FieldViolation {
        data_violation(&format!("{PREFIX}{detail}"))
    }

    #[test]
    fn test_missing_field() {
        let v = violation("missing field `title` at line 1 column 2");
        assert_eq!((v.field.as_str(), v.rule.as_str()), ("title", "required"));
        assert_eq!(v.message, "title is required");
    }

    #[test]
    fn test_nested_missing_field() {
        let v = violation("[2]: missing field `pages` at line 1 column 90");
        assert_eq!(v.field, "[2].pages");
        assert_eq!(v.rule, "required");
    }

    #[test]
    fn test_wrong_type() {
        let v = violation("pages: invalid type: string \"x\", expected i32 at line 1 column 12");
        assert_eq!((v.field.as_str(), v.rule.as_str()), ("pages", "type"));
    }

    #[test]
    fn test_wrong_type_without_path() {
        let v = violation(
            "invalid type: integer `5`, expected struct CreateBookDto at line 1 column 1",
        );
        assert_eq!((v.field.as_str(), v.rule.as_str()), ("body", "type"));
    }
}
