//! Business logic services

pub mod catalog;
pub mod inventory;
pub mod session;

use std::sync::Arc;

use crate::{
    config::{AuthConfig, CatalogConfig},
    repository::Repository,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub inventory: inventory::InventoryService,
    pub session: session::SessionService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(
        repository: Repository,
        auth_config: AuthConfig,
        catalog_config: CatalogConfig,
    ) -> Self {
        let books = Arc::new(repository.books.clone());
        let borrows = Arc::new(repository.borrows.clone());
        Self {
            catalog: catalog::CatalogService::new(books.clone(), catalog_config),
            inventory: inventory::InventoryService::new(books, borrows),
            session: session::SessionService::new(auth_config),
        }
    }
}
