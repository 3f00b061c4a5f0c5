//! Borrow/return endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    api::books::MessageResponse,
    error::AppResult,
    models::borrow::{Borrow, BorrowPayload, BorrowSummary},
};

/// Borrow copies of a book
#[utoipa::path(
    post,
    path = "/borrow",
    tag = "borrow",
    request_body = BorrowPayload,
    responses(
        (status = 201, description = "Borrow record created", body = Borrow),
        (status = 400, description = "Validation failure or not enough copies"),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn borrow_book(
    State(state): State<crate::AppState>,
    Json(payload): Json<BorrowPayload>,
) -> AppResult<(StatusCode, Json<Borrow>)> {
    let borrow = state
        .services
        .borrows
        .borrow(payload.into_validated()?)
        .await?;
    Ok((StatusCode::CREATED, Json(borrow)))
}

/// Total borrowed quantity per book
#[utoipa::path(
    get,
    path = "/borrow/summary",
    tag = "borrow",
    responses(
        (status = 200, description = "Borrow summary", body = Vec<BorrowSummary>),
        (status = 500, description = "Database error", body = crate::error::ErrorResponse)
    )
)]
pub async fn borrow_summary(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<BorrowSummary>>> {
    let summary = state.services.borrows.summary().await?;
    Ok(Json(summary))
}

/// Return a borrowed book
#[utoipa::path(
    delete,
    path = "/borrow/{borrowId}",
    tag = "borrow",
    params(
        ("borrowId" = i32, Path, description = "Borrow record ID")
    ),
    responses(
        (status = 200, description = "Book returned", body = MessageResponse),
        (status = 404, description = "Borrow record not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn return_book(
    State(state): State<crate::AppState>,
    Path(borrow_id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    state.services.borrows.return_borrow(borrow_id).await?;
    Ok(Json(MessageResponse {
        message: "Book returned successfully".to_string(),
    }))
}
