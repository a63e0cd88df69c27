//! Inventory coordination: atomic borrow and return across the two stores.
//!
//! The coordinator owns no data itself, only the cross-store invariant: the
//! number of outstanding borrow records for a book always equals the number
//! of units deducted from its quantity.

use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{BorrowRecord, CreateBorrow},
    repository::{CatalogStore, LedgerStore},
};

#[derive(Clone)]
pub struct InventoryService {
    catalog: Arc<dyn CatalogStore>,
    ledger: Arc<dyn LedgerStore>,
}

impl InventoryService {
    pub fn new(catalog: Arc<dyn CatalogStore>, ledger: Arc<dyn LedgerStore>) -> Self {
        Self { catalog, ledger }
    }

    /// Borrow one unit of a book for a subject.
    ///
    /// The conditional decrement is the actual out-of-stock gate; the
    /// preceding read only distinguishes a missing book from an exhausted
    /// one and gives an early answer. Checking the quantity and writing it
    /// in two steps would lose an update when two borrowers race for the
    /// last unit.
    pub async fn borrow_book(&self, book_id: i32, email: &str) -> AppResult<i32> {
        let book = self
            .catalog
            .get_by_id(book_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", book_id)))?;

        if book.quantity <= 0 {
            return Err(AppError::OutOfStock);
        }

        if !self.catalog.adjust_quantity(book_id, -1).await? {
            return Err(AppError::OutOfStock);
        }

        let borrow = CreateBorrow {
            book_id,
            email: email.to_string(),
        };

        match self.ledger.insert(&borrow).await {
            Ok(record_id) => {
                tracing::debug!("Borrowed book {} for {} (record {})", book_id, email, record_id);
                Ok(record_id)
            }
            Err(err) => {
                // Compensate the decrement so the operation stays
                // all-or-nothing from the caller's view.
                if let Err(comp) = self.catalog.adjust_quantity(book_id, 1).await {
                    tracing::error!(
                        "Failed to restore quantity for book {} after ledger failure: {}",
                        book_id,
                        comp
                    );
                }
                Err(err)
            }
        }
    }

    /// Return a borrowed unit.
    ///
    /// The quantity is restored before the ledger record is deleted, so a
    /// failure between the two steps leaves a record whose delete can be
    /// retried rather than a quantity that is permanently short. A store
    /// error on the delete is retried once; the quantity is never
    /// incremented a second time.
    pub async fn return_book(&self, record_id: i32) -> AppResult<()> {
        let record = self
            .ledger
            .find_by_id(record_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Borrow record with id {} not found", record_id))
            })?;

        if !self.catalog.adjust_quantity(record.book_id, 1).await? {
            // The book row is gone; the ledger record should still be
            // cleared rather than wedging the return.
            tracing::warn!(
                "Book {} missing from catalog while returning record {}",
                record.book_id,
                record_id
            );
        }

        match self.ledger.delete_by_id(record_id).await {
            Ok(true) => Ok(()),
            Ok(false) => Err(AppError::NotFound(format!(
                "Borrow record with id {} not found",
                record_id
            ))),
            Err(err) => {
                tracing::warn!(
                    "Delete of borrow record {} failed, retrying once: {}",
                    record_id,
                    err
                );
                self.ledger.delete_by_id(record_id).await?;
                Ok(())
            }
        }
    }

    /// List a borrower's outstanding records. The subject check lives at the
    /// API boundary (`SessionClaims::require_subject`).
    pub async fn borrowed_by(&self, email: &str) -> AppResult<Vec<BorrowRecord>> {
        self.ledger.find_by_email(email).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Book, BookFields, UpsertOutcome};
    use crate::repository::MockLedgerStore;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Mutex;

    /// In-memory catalog with the same check-and-apply atomicity as the
    /// conditional SQL update.
    struct MemCatalog {
        books: Mutex<HashMap<i32, Book>>,
    }

    impl MemCatalog {
        fn with_book(id: i32, quantity: i32) -> Self {
            let book = Book {
                id,
                name: "The Left Hand of Darkness".to_string(),
                author: "Ursula K. Le Guin".to_string(),
                category: "Fiction".to_string(),
                subcategory: None,
                description: None,
                content: None,
                image: None,
                rating: Some(4.8),
                quantity,
            };
            let mut books = HashMap::new();
            books.insert(id, book);
            Self {
                books: Mutex::new(books),
            }
        }

        fn quantity(&self, id: i32) -> i32 {
            self.books.lock().unwrap()[&id].quantity
        }
    }

    #[async_trait]
    impl CatalogStore for MemCatalog {
        async fn get_all(&self) -> AppResult<Vec<Book>> {
            Ok(self.books.lock().unwrap().values().cloned().collect())
        }

        async fn get_by_id(&self, id: i32) -> AppResult<Option<Book>> {
            Ok(self.books.lock().unwrap().get(&id).cloned())
        }

        async fn add(&self, _fields: &BookFields) -> AppResult<i32> {
            unimplemented!("not exercised by inventory tests")
        }

        async fn replace_fields(
            &self,
            _id: i32,
            _fields: &BookFields,
        ) -> AppResult<UpsertOutcome> {
            unimplemented!("not exercised by inventory tests")
        }

        async fn adjust_quantity(&self, id: i32, delta: i32) -> AppResult<bool> {
            let mut books = self.books.lock().unwrap();
            match books.get_mut(&id) {
                Some(book) if book.quantity + delta >= 0 => {
                    book.quantity += delta;
                    Ok(true)
                }
                _ => Ok(false),
            }
        }
    }

    /// In-memory ledger keyed by a monotonically assigned id
    struct MemLedger {
        records: Mutex<HashMap<i32, BorrowRecord>>,
        next_id: AtomicI32,
    }

    impl MemLedger {
        fn new() -> Self {
            Self {
                records: Mutex::new(HashMap::new()),
                next_id: AtomicI32::new(1),
            }
        }

        fn count_for_book(&self, book_id: i32) -> usize {
            self.records
                .lock()
                .unwrap()
                .values()
                .filter(|r| r.book_id == book_id)
                .count()
        }
    }

    #[async_trait]
    impl LedgerStore for MemLedger {
        async fn insert(&self, borrow: &CreateBorrow) -> AppResult<i32> {
            let id = self.next_id.fetch_add(1, Ordering::SeqCst);
            let record = BorrowRecord {
                id,
                book_id: borrow.book_id,
                email: borrow.email.clone(),
                borrowed_at: Utc::now(),
            };
            self.records.lock().unwrap().insert(id, record);
            Ok(id)
        }

        async fn find_by_email(&self, email: &str) -> AppResult<Vec<BorrowRecord>> {
            Ok(self
                .records
                .lock()
                .unwrap()
                .values()
                .filter(|r| r.email == email)
                .cloned()
                .collect())
        }

        async fn find_by_id(&self, id: i32) -> AppResult<Option<BorrowRecord>> {
            Ok(self.records.lock().unwrap().get(&id).cloned())
        }

        async fn delete_by_id(&self, id: i32) -> AppResult<bool> {
            Ok(self.records.lock().unwrap().remove(&id).is_some())
        }
    }

    fn service(catalog: Arc<MemCatalog>, ledger: Arc<MemLedger>) -> InventoryService {
        InventoryService::new(catalog, ledger)
    }

    #[tokio::test]
    async fn borrow_missing_book_is_not_found() {
        let catalog = Arc::new(MemCatalog::with_book(1, 2));
        let ledger = Arc::new(MemLedger::new());
        let inventory = service(catalog, ledger.clone());

        let err = inventory.borrow_book(99, "a@x.com").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(ledger.count_for_book(99), 0);
    }

    #[tokio::test]
    async fn borrow_exhausted_book_is_out_of_stock() {
        let catalog = Arc::new(MemCatalog::with_book(1, 0));
        let ledger = Arc::new(MemLedger::new());
        let inventory = service(catalog.clone(), ledger.clone());

        let err = inventory.borrow_book(1, "a@x.com").await.unwrap_err();
        assert!(matches!(err, AppError::OutOfStock));
        assert_eq!(catalog.quantity(1), 0);
        assert_eq!(ledger.count_for_book(1), 0);
    }

    #[tokio::test]
    async fn borrow_decrements_and_records() {
        let catalog = Arc::new(MemCatalog::with_book(1, 2));
        let ledger = Arc::new(MemLedger::new());
        let inventory = service(catalog.clone(), ledger.clone());

        let record_id = inventory.borrow_book(1, "a@x.com").await.unwrap();
        assert_eq!(catalog.quantity(1), 1);
        assert_eq!(ledger.count_for_book(1), 1);

        let records = inventory.borrowed_by("a@x.com").await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, record_id);
        assert_eq!(records[0].book_id, 1);
    }

    #[tokio::test]
    async fn concurrent_borrows_of_last_unit_admit_exactly_one() {
        let catalog = Arc::new(MemCatalog::with_book(1, 1));
        let ledger = Arc::new(MemLedger::new());
        let inventory = Arc::new(service(catalog.clone(), ledger.clone()));

        let a = tokio::spawn({
            let inventory = inventory.clone();
            async move { inventory.borrow_book(1, "a@x.com").await }
        });
        let b = tokio::spawn({
            let inventory = inventory.clone();
            async move { inventory.borrow_book(1, "b@x.com").await }
        });

        let results = [a.await.unwrap(), b.await.unwrap()];
        let successes = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(successes, 1);
        assert!(results
            .iter()
            .filter(|r| r.is_err())
            .all(|r| matches!(r, Err(AppError::OutOfStock))));
        assert_eq!(catalog.quantity(1), 0);
        assert_eq!(ledger.count_for_book(1), 1);
    }

    #[tokio::test]
    async fn concurrent_borrows_never_oversell() {
        const STOCK: i32 = 3;
        const BORROWERS: usize = 8;

        let catalog = Arc::new(MemCatalog::with_book(1, STOCK));
        let ledger = Arc::new(MemLedger::new());
        let inventory = Arc::new(service(catalog.clone(), ledger.clone()));

        let mut handles = Vec::new();
        for n in 0..BORROWERS {
            let inventory = inventory.clone();
            handles.push(tokio::spawn(async move {
                inventory.borrow_book(1, &format!("user{}@x.com", n)).await
            }));
        }

        let mut successes = 0;
        let mut out_of_stock = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => successes += 1,
                Err(AppError::OutOfStock) => out_of_stock += 1,
                Err(other) => panic!("unexpected error: {}", other),
            }
        }

        assert_eq!(successes, STOCK as usize);
        assert_eq!(out_of_stock, BORROWERS - STOCK as usize);
        assert_eq!(catalog.quantity(1), 0);
        assert_eq!(ledger.count_for_book(1), STOCK as usize);
    }

    #[tokio::test]
    async fn return_restores_one_unit_and_clears_record() {
        let catalog = Arc::new(MemCatalog::with_book(1, 1));
        let ledger = Arc::new(MemLedger::new());
        let inventory = service(catalog.clone(), ledger.clone());

        let record_id = inventory.borrow_book(1, "a@x.com").await.unwrap();
        assert_eq!(catalog.quantity(1), 0);

        inventory.return_book(record_id).await.unwrap();
        assert_eq!(catalog.quantity(1), 1);
        assert_eq!(ledger.count_for_book(1), 0);

        // Returning the same record again fails and restores nothing.
        let err = inventory.return_book(record_id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(catalog.quantity(1), 1);
    }

    #[tokio::test]
    async fn ledger_failure_rolls_back_the_decrement() {
        let catalog = Arc::new(MemCatalog::with_book(1, 2));
        let mut ledger = MockLedgerStore::new();
        ledger
            .expect_insert()
            .returning(|_| Err(AppError::Internal("ledger down".to_string())));

        let inventory = InventoryService::new(catalog.clone(), Arc::new(ledger));

        let err = inventory.borrow_book(1, "a@x.com").await.unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
        assert_eq!(catalog.quantity(1), 2);
    }

    #[tokio::test]
    async fn return_retries_delete_once_on_store_error() {
        let catalog = Arc::new(MemCatalog::with_book(1, 0));
        let mut ledger = MockLedgerStore::new();
        ledger.expect_find_by_id().returning(|id| {
            Ok(Some(BorrowRecord {
                id,
                book_id: 1,
                email: "a@x.com".to_string(),
                borrowed_at: Utc::now(),
            }))
        });
        let mut attempts = 0;
        ledger.expect_delete_by_id().times(2).returning(move |_| {
            attempts += 1;
            if attempts == 1 {
                Err(AppError::Internal("transient".to_string()))
            } else {
                Ok(true)
            }
        });

        let inventory = InventoryService::new(catalog.clone(), Arc::new(ledger));

        inventory.return_book(7).await.unwrap();
        // Restored exactly once despite the retried delete.
        assert_eq!(catalog.quantity(1), 1);
    }
}
