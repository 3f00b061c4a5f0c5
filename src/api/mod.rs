//! API handlers for Bookshelf REST endpoints

pub mod books;
pub mod borrows;
pub mod health;
pub mod openapi;

use axum::{http::StatusCode, Json};
use serde_json::{json, Value};

/// Fallback handler for unmatched routes
pub async fn route_not_found() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": "Route not found" })),
    )
}
