//! Error types for Bookshelf server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use validator::ValidationErrors;

/// A single field validation failure
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("ISBN already exists")]
    DuplicateIsbn,

    #[error("Not enough copies available. Only {available} copies left.")]
    InsufficientCopies { available: i32 },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body for non-validation failures
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Error response body for validation failures
#[derive(Serialize, utoipa::ToSchema)]
pub struct ValidationErrorResponse {
    pub errors: Vec<FieldError>,
}

impl AppError {
    fn body(message: impl Into<String>, error: Option<String>) -> Json<ErrorResponse> {
        Json(ErrorResponse {
            message: message.into(),
            error,
        })
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                Json(ValidationErrorResponse { errors }),
            )
                .into_response(),
            AppError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, Self::body(msg, None)).into_response()
            }
            AppError::DuplicateIsbn => (
                StatusCode::BAD_REQUEST,
                Self::body("ISBN already exists", None),
            )
                .into_response(),
            AppError::InsufficientCopies { available } => (
                StatusCode::BAD_REQUEST,
                Self::body(
                    format!(
                        "Not enough copies available. Only {} copies left.",
                        available
                    ),
                    None,
                ),
            )
                .into_response(),
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Self::body("Database error", Some(e.to_string())),
                )
                    .into_response()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Self::body("Internal server error", Some(msg)),
                )
                    .into_response()
            }
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<FieldError> = errors
            .field_errors()
            .iter()
            .map(|(field, errs)| FieldError {
                field: snake_to_camel(field),
                message: errs
                    .first()
                    .and_then(|e| e.message.clone())
                    .map(|m| m.into_owned())
                    .unwrap_or_else(|| format!("{} is invalid", snake_to_camel(field))),
            })
            .collect();
        // field_errors() iterates a HashMap; sort for a stable response
        fields.sort_by(|a, b| a.field.cmp(&b.field));
        AppError::Validation(fields)
    }
}

/// Rust field names are snake_case; the wire format is camelCase.
fn snake_to_camel(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;
    for c in field.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_names_are_camel_cased() {
        assert_eq!(snake_to_camel("book_id"), "bookId");
        assert_eq!(snake_to_camel("due_date"), "dueDate");
        assert_eq!(snake_to_camel("title"), "title");
    }

    #[test]
    fn not_found_maps_to_404() {
        let response = AppError::NotFound("Book not found".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn duplicate_isbn_maps_to_400() {
        let response = AppError::DuplicateIsbn.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn insufficient_copies_maps_to_400() {
        let response = AppError::InsufficientCopies { available: 3 }.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn database_errors_map_to_500() {
        let response = AppError::Database(sqlx::Error::RowNotFound).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
