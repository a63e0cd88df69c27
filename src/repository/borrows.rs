//! Borrow ledger repository for database operations

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{BorrowRecord, CreateBorrow},
    repository::LedgerStore,
};

#[derive(Clone)]
pub struct BorrowsRepository {
    pool: Pool<Postgres>,
}

impl BorrowsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LedgerStore for BorrowsRepository {
    /// Insert a new borrow record
    async fn insert(&self, borrow: &CreateBorrow) -> AppResult<i32> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO borrows (book_id, email, borrowed_at)
            VALUES ($1, $2, NOW())
            RETURNING id
            "#,
        )
        .bind(borrow.book_id)
        .bind(&borrow.email)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    /// Get borrow records for a borrower
    async fn find_by_email(&self, email: &str) -> AppResult<Vec<BorrowRecord>> {
        let records = sqlx::query_as::<_, BorrowRecord>(
            "SELECT * FROM borrows WHERE email = $1 ORDER BY borrowed_at",
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Get borrow record by ID
    async fn find_by_id(&self, id: i32) -> AppResult<Option<BorrowRecord>> {
        let record = sqlx::query_as::<_, BorrowRecord>("SELECT * FROM borrows WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(record)
    }

    /// Delete borrow record by ID
    async fn delete_by_id(&self, id: i32) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM borrows WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() == 1)
    }
}
