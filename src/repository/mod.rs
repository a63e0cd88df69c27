//! Repository layer for database operations

pub mod books;
pub mod borrows;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{Book, BookFields, BorrowRecord, CreateBorrow, UpsertOutcome},
};

/// Catalog of books with conditional quantity adjustment.
///
/// The stores are the only shared mutable state in the system; they are
/// passed to the services as capabilities rather than reached through a
/// module-level singleton, so tests can substitute in-memory or mock
/// implementations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn get_all(&self) -> AppResult<Vec<Book>>;

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Book>>;

    async fn add(&self, fields: &BookFields) -> AppResult<i32>;

    /// Full-field replace with upsert semantics: a missing id creates the
    /// document with that id.
    async fn replace_fields(&self, id: i32, fields: &BookFields) -> AppResult<UpsertOutcome>;

    /// Atomically apply `quantity += delta` iff `quantity + delta >= 0`
    /// holds at the moment of the write. Returns whether the adjustment was
    /// applied. This is the serialization point for concurrent borrows of
    /// the same book.
    async fn adjust_quantity(&self, id: i32, delta: i32) -> AppResult<bool>;
}

/// Ledger of borrow records, one per checked-out unit
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LedgerStore: Send + Sync {
    async fn insert(&self, borrow: &CreateBorrow) -> AppResult<i32>;

    async fn find_by_email(&self, email: &str) -> AppResult<Vec<BorrowRecord>>;

    async fn find_by_id(&self, id: i32) -> AppResult<Option<BorrowRecord>>;

    /// Returns whether a record was deleted
    async fn delete_by_id(&self, id: i32) -> AppResult<bool>;
}

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub books: books::BooksRepository,
    pub borrows: borrows::BorrowsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            books: books::BooksRepository::new(pool.clone()),
            borrows: borrows::BorrowsRepository::new(pool.clone()),
            pool,
        }
    }
}
