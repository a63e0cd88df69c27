//! Borrow ledger model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// One checked-out unit of a book.
///
/// A record exists exactly while one unit of the referenced book's quantity
/// is deducted on its behalf; creation and deletion go through the inventory
/// service, never directly through a handler.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BorrowRecord {
    pub id: i32,
    pub book_id: i32,
    pub email: String,
    pub borrowed_at: DateTime<Utc>,
}

/// Fields for a new ledger entry
#[derive(Debug, Clone)]
pub struct CreateBorrow {
    pub book_id: i32,
    pub email: String,
}
