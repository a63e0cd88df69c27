//! Borrow and return endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{error::AppResult, models::BorrowRecord};

use super::AuthenticatedSubject;

/// Borrow request
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BorrowBookRequest {
    /// Book to borrow one unit of
    pub book_id: i32,
    /// Borrower email recorded on the ledger entry
    pub email: String,
}

/// Ledger insert result
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BorrowResponse {
    pub inserted_id: i32,
}

/// Deletion result
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReturnResponse {
    pub deleted_count: u32,
}

#[derive(Deserialize)]
pub struct BorrowedBooksQuery {
    pub email: String,
}

/// Borrow one unit of a book
#[utoipa::path(
    post,
    path = "/borrowBooks",
    tag = "borrows",
    security(("session_cookie" = [])),
    request_body = BorrowBookRequest,
    responses(
        (status = 201, description = "Borrow recorded", body = BorrowResponse),
        (status = 400, description = "Book is out of stock", body = crate::error::ErrorResponse),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn borrow_book(
    State(state): State<crate::AppState>,
    AuthenticatedSubject(_claims): AuthenticatedSubject,
    Json(request): Json<BorrowBookRequest>,
) -> AppResult<(StatusCode, Json<BorrowResponse>)> {
    let record_id = state
        .services
        .inventory
        .borrow_book(request.book_id, &request.email)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(BorrowResponse {
            inserted_id: record_id,
        }),
    ))
}

/// List the session subject's borrow records.
///
/// The requested email must match the verified subject; any other email is
/// rejected regardless of how valid the token is.
#[utoipa::path(
    get,
    path = "/myBorrowedBooks",
    tag = "borrows",
    security(("session_cookie" = [])),
    params(
        ("email" = String, Query, description = "Borrower email, must equal the session subject")
    ),
    responses(
        (status = 200, description = "Borrow records", body = Vec<BorrowRecord>),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse),
        (status = 403, description = "Email differs from session subject", body = crate::error::ErrorResponse)
    )
)]
pub async fn my_borrowed_books(
    State(state): State<crate::AppState>,
    AuthenticatedSubject(claims): AuthenticatedSubject,
    Query(query): Query<BorrowedBooksQuery>,
) -> AppResult<Json<Vec<BorrowRecord>>> {
    claims.require_subject(&query.email)?;

    let records = state.services.inventory.borrowed_by(&query.email).await?;
    Ok(Json(records))
}

/// Return a borrowed book by its record id
#[utoipa::path(
    delete,
    path = "/myBorrowedBook/{id}",
    tag = "borrows",
    params(
        ("id" = i32, Path, description = "Borrow record ID")
    ),
    responses(
        (status = 200, description = "Unit returned", body = ReturnResponse),
        (status = 404, description = "Record not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn return_book(
    State(state): State<crate::AppState>,
    Path(record_id): Path<i32>,
) -> AppResult<Json<ReturnResponse>> {
    state.services.inventory.return_book(record_id).await?;
    Ok(Json(ReturnResponse { deleted_count: 1 }))
}
