//! Book (catalog entry) model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::error::AppError;

/// Book model from database.
/// `available` is derived from `copies` and recomputed by every statement
/// that writes `copies`; it is never set independently.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub isbn: String,
    pub description: String,
    pub copies: i32,
    pub available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create/update book request. All fields are optional at the serde level so
/// that missing fields surface as field errors rather than a body rejection.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookPayload {
    #[validate(
        required(message = "Title is required"),
        custom(function = "not_blank", message = "Title is required")
    )]
    pub title: Option<String>,
    #[validate(
        required(message = "Author is required"),
        custom(function = "not_blank", message = "Author is required")
    )]
    pub author: Option<String>,
    #[validate(
        required(message = "Genre is required"),
        custom(function = "not_blank", message = "Genre is required")
    )]
    pub genre: Option<String>,
    #[validate(
        required(message = "ISBN is required"),
        custom(function = "not_blank", message = "ISBN is required")
    )]
    pub isbn: Option<String>,
    #[validate(
        required(message = "Description is required"),
        custom(function = "not_blank", message = "Description is required")
    )]
    pub description: Option<String>,
    #[validate(
        required(message = "Copies must be a non-negative integer"),
        range(min = 0, message = "Copies must be a non-negative integer")
    )]
    pub copies: Option<i32>,
}

/// Validated book data ready for persistence
#[derive(Debug, Clone)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub isbn: String,
    pub description: String,
    pub copies: i32,
}

impl BookPayload {
    /// Validate the payload and convert it into persistable data.
    /// Title, author, genre, and ISBN are stored trimmed; the description
    /// is kept verbatim.
    pub fn into_validated(self) -> Result<NewBook, AppError> {
        self.validate()?;
        Ok(NewBook {
            title: self.title.unwrap_or_default().trim().to_string(),
            author: self.author.unwrap_or_default().trim().to_string(),
            genre: self.genre.unwrap_or_default().trim().to_string(),
            isbn: self.isbn.unwrap_or_default().trim().to_string(),
            description: self.description.unwrap_or_default(),
            copies: self.copies.unwrap_or_default(),
        })
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Book listing query parameters
#[derive(Debug, Deserialize, IntoParams)]
pub struct BookQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_payload() -> BookPayload {
        BookPayload {
            title: Some("The Left Hand of Darkness".to_string()),
            author: Some("Ursula K. Le Guin".to_string()),
            genre: Some("Science Fiction".to_string()),
            isbn: Some("978-0441478125".to_string()),
            description: Some("A planet of ambisexual humans.".to_string()),
            copies: Some(4),
        }
    }

    fn field_errors(err: AppError) -> Vec<(String, String)> {
        match err {
            AppError::Validation(errors) => errors
                .into_iter()
                .map(|e| (e.field, e.message))
                .collect(),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn complete_payload_validates_and_trims() {
        let mut payload = full_payload();
        payload.isbn = Some("  978-0441478125 ".to_string());
        let book = payload.into_validated().unwrap();
        assert_eq!(book.isbn, "978-0441478125");
        assert_eq!(book.copies, 4);
    }

    #[test]
    fn description_is_kept_verbatim() {
        let mut payload = full_payload();
        payload.description = Some(" A planet of ambisexual humans. ".to_string());
        let book = payload.into_validated().unwrap();
        assert_eq!(book.description, " A planet of ambisexual humans. ");
    }

    #[test]
    fn missing_title_is_reported_with_its_message() {
        let mut payload = full_payload();
        payload.title = None;
        let errors = field_errors(payload.into_validated().unwrap_err());
        assert_eq!(
            errors,
            vec![("title".to_string(), "Title is required".to_string())]
        );
    }

    #[test]
    fn blank_author_fails_like_missing() {
        let mut payload = full_payload();
        payload.author = Some("   ".to_string());
        let errors = field_errors(payload.into_validated().unwrap_err());
        assert_eq!(
            errors,
            vec![("author".to_string(), "Author is required".to_string())]
        );
    }

    #[test]
    fn negative_copies_are_rejected() {
        let mut payload = full_payload();
        payload.copies = Some(-1);
        let errors = field_errors(payload.into_validated().unwrap_err());
        assert_eq!(
            errors,
            vec![(
                "copies".to_string(),
                "Copies must be a non-negative integer".to_string()
            )]
        );
    }

    #[test]
    fn zero_copies_are_allowed() {
        let mut payload = full_payload();
        payload.copies = Some(0);
        assert!(payload.into_validated().is_ok());
    }

    #[test]
    fn every_missing_field_is_reported() {
        let payload = BookPayload {
            title: None,
            author: None,
            genre: None,
            isbn: None,
            description: None,
            copies: None,
        };
        let errors = field_errors(payload.into_validated().unwrap_err());
        assert_eq!(errors.len(), 6);
    }
}
