//! Catalog management service

use std::sync::Arc;

use crate::{
    config::CatalogConfig,
    error::{AppError, AppResult},
    models::{Book, BookFields, UpsertOutcome},
    repository::CatalogStore,
};

/// Field-mapping CRUD over the catalog store.
///
/// Quantity deltas never go through here; only the inventory service applies
/// ±1 adjustments.
#[derive(Clone)]
pub struct CatalogService {
    catalog: Arc<dyn CatalogStore>,
    config: CatalogConfig,
}

impl CatalogService {
    pub fn new(catalog: Arc<dyn CatalogStore>, config: CatalogConfig) -> Self {
        Self { catalog, config }
    }

    /// List all books
    pub async fn list_books(&self) -> AppResult<Vec<Book>> {
        self.catalog.get_all().await
    }

    /// Get a book by ID, or None when it does not exist
    pub async fn get_book(&self, id: i32) -> AppResult<Option<Book>> {
        self.catalog.get_by_id(id).await
    }

    /// Add a new book to the catalog
    pub async fn add_book(&self, fields: BookFields) -> AppResult<i32> {
        self.catalog.add(&fields).await
    }

    /// Replace all fields of a book.
    ///
    /// With `upsert_on_update` enabled (the default, preserving the observed
    /// behavior), a missing id silently creates the book. When disabled the
    /// update fails with 404 instead.
    pub async fn update_book(&self, id: i32, fields: BookFields) -> AppResult<UpsertOutcome> {
        if !self.config.upsert_on_update && self.catalog.get_by_id(id).await?.is_none() {
            return Err(AppError::NotFound(format!(
                "Book with id {} not found",
                id
            )));
        }
        self.catalog.replace_fields(id, &fields).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockCatalogStore;

    fn fields() -> BookFields {
        BookFields {
            name: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            category: "Fiction".to_string(),
            subcategory: None,
            description: None,
            content: None,
            image: None,
            rating: Some(4.5),
            quantity: 3,
        }
    }

    #[tokio::test]
    async fn update_missing_book_upserts_by_default() {
        let mut store = MockCatalogStore::new();
        store
            .expect_replace_fields()
            .returning(|_, _| Ok(UpsertOutcome::Created));

        let service = CatalogService::new(
            Arc::new(store),
            CatalogConfig {
                upsert_on_update: true,
            },
        );

        let outcome = service.update_book(42, fields()).await.unwrap();
        assert_eq!(outcome, UpsertOutcome::Created);
    }

    #[tokio::test]
    async fn update_missing_book_fails_when_upsert_disabled() {
        let mut store = MockCatalogStore::new();
        store.expect_get_by_id().returning(|_| Ok(None));
        store.expect_replace_fields().never();

        let service = CatalogService::new(
            Arc::new(store),
            CatalogConfig {
                upsert_on_update: false,
            },
        );

        let err = service.update_book(42, fields()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
