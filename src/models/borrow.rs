//! Borrow (lending transaction) model and related types

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::error::AppError;

/// Borrow record from database. Deleting the record is the "returned" state;
/// no history is retained.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Borrow {
    pub id: i32,
    pub book_id: i32,
    pub quantity: i32,
    pub due_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Borrow request payload
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BorrowPayload {
    #[validate(required(message = "Book ID is required"))]
    pub book_id: Option<i32>,
    #[validate(
        required(message = "Quantity must be at least 1"),
        range(min = 1, message = "Quantity must be at least 1")
    )]
    pub quantity: Option<i32>,
    #[validate(
        required(message = "Due date must be a valid date"),
        custom(function = "valid_date", message = "Due date must be a valid date")
    )]
    pub due_date: Option<String>,
}

/// Validated borrow data ready for persistence
#[derive(Debug, Clone)]
pub struct NewBorrow {
    pub book_id: i32,
    pub quantity: i32,
    pub due_date: DateTime<Utc>,
}

impl BorrowPayload {
    /// Validate the payload and convert it into persistable data
    pub fn into_validated(self) -> Result<NewBorrow, AppError> {
        self.validate()?;
        let due_date = self
            .due_date
            .as_deref()
            .and_then(parse_due_date)
            .ok_or_else(|| AppError::Internal("due date parsed during validation".to_string()))?;
        Ok(NewBorrow {
            book_id: self.book_id.unwrap_or_default(),
            quantity: self.quantity.unwrap_or_default(),
            due_date,
        })
    }
}

/// Parse a due date from RFC 3339 or a bare `YYYY-MM-DD` date (midnight UTC)
pub fn parse_due_date(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| Utc.from_utc_datetime(&dt))
}

fn valid_date(value: &str) -> Result<(), ValidationError> {
    if parse_due_date(value).is_none() {
        return Err(ValidationError::new("date"));
    }
    Ok(())
}

/// Aggregated borrowed quantity per book, joined with the book's catalog data
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BorrowSummary {
    pub book_id: i32,
    pub title: String,
    pub isbn: String,
    pub total_quantity: i64,
}
