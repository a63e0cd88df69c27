//! Catalog (book) endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{Book, BookFields, UpsertOutcome},
};

use super::AuthenticatedSubject;

/// Insert result
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsertResponse {
    /// ID assigned by the store
    pub inserted_id: i32,
}

/// Upsert result
#[derive(Serialize, ToSchema)]
pub struct UpdateResponse {
    pub status: UpsertOutcome,
}

/// List all books
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    security(("session_cookie" = [])),
    responses(
        (status = 200, description = "All catalog books", body = Vec<Book>),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
    AuthenticatedSubject(_claims): AuthenticatedSubject,
) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.catalog.list_books().await?;
    Ok(Json(books))
}

/// Add a book to the catalog
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    security(("session_cookie" = [])),
    request_body = BookFields,
    responses(
        (status = 201, description = "Book created", body = InsertResponse),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    AuthenticatedSubject(_claims): AuthenticatedSubject,
    Json(fields): Json<BookFields>,
) -> AppResult<(StatusCode, Json<InsertResponse>)> {
    let id = state.services.catalog.add_book(fields).await?;
    Ok((StatusCode::CREATED, Json(InsertResponse { inserted_id: id })))
}

/// Get a single book by ID; serves `null` when the id is unknown
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "The book, or null when the id is unknown", body = Book)
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Option<Book>>> {
    let book = state.services.catalog.get_book(id).await?;
    Ok(Json(book))
}

/// Replace all fields of a book (upsert by default)
#[utoipa::path(
    put,
    path = "/updateBook/{id}",
    tag = "books",
    security(("session_cookie" = [])),
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    request_body = BookFields,
    responses(
        (status = 200, description = "Book updated or created", body = UpdateResponse),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse),
        (status = 404, description = "Unknown id and upsert disabled", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    AuthenticatedSubject(_claims): AuthenticatedSubject,
    Path(id): Path<i32>,
    Json(fields): Json<BookFields>,
) -> AppResult<Json<UpdateResponse>> {
    let status = state.services.catalog.update_book(id, fields).await?;
    Ok(Json(UpdateResponse { status }))
}
