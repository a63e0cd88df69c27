//! Books repository for database operations

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{Book, BookFields, UpsertOutcome},
    repository::CatalogStore,
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogStore for BooksRepository {
    /// Get all books, unfiltered
    async fn get_all(&self) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>("SELECT * FROM books")
            .fetch_all(&self.pool)
            .await?;
        Ok(books)
    }

    /// Get book by ID
    async fn get_by_id(&self, id: i32) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(book)
    }

    /// Create a new book
    async fn add(&self, fields: &BookFields) -> AppResult<i32> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO books (name, author, category, subcategory, description,
                               content, image, rating, quantity)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id
            "#,
        )
        .bind(&fields.name)
        .bind(&fields.author)
        .bind(&fields.category)
        .bind(&fields.subcategory)
        .bind(&fields.description)
        .bind(&fields.content)
        .bind(&fields.image)
        .bind(fields.rating)
        .bind(fields.quantity)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    /// Replace all fields of a book, creating it when the id does not exist.
    ///
    /// `xmax = 0` is only true for a freshly inserted row, which is how we
    /// tell an insert from an update in a single round trip. When the upsert
    /// created a row the id sequence is re-synced so later inserts cannot
    /// collide with the explicitly supplied id.
    async fn replace_fields(&self, id: i32, fields: &BookFields) -> AppResult<UpsertOutcome> {
        let inserted: bool = sqlx::query_scalar(
            r#"
            INSERT INTO books (id, name, author, category, subcategory, description,
                               content, image, rating, quantity)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                author = EXCLUDED.author,
                category = EXCLUDED.category,
                subcategory = EXCLUDED.subcategory,
                description = EXCLUDED.description,
                content = EXCLUDED.content,
                image = EXCLUDED.image,
                rating = EXCLUDED.rating,
                quantity = EXCLUDED.quantity
            RETURNING (xmax = 0)
            "#,
        )
        .bind(id)
        .bind(&fields.name)
        .bind(&fields.author)
        .bind(&fields.category)
        .bind(&fields.subcategory)
        .bind(&fields.description)
        .bind(&fields.content)
        .bind(&fields.image)
        .bind(fields.rating)
        .bind(fields.quantity)
        .fetch_one(&self.pool)
        .await?;

        if inserted {
            sqlx::query("SELECT setval('books_id_seq', (SELECT MAX(id) FROM books))")
                .execute(&self.pool)
                .await?;
            Ok(UpsertOutcome::Created)
        } else {
            Ok(UpsertOutcome::Updated)
        }
    }

    /// Conditionally adjust a book's quantity.
    ///
    /// A single conditional UPDATE, not a read followed by a write: two
    /// concurrent borrowers of the last unit serialize here, and exactly one
    /// of them sees `true`.
    async fn adjust_quantity(&self, id: i32, delta: i32) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE books SET quantity = quantity + $2 WHERE id = $1 AND quantity + $2 >= 0",
        )
        .bind(id)
        .bind(delta)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}
