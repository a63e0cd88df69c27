//! EduLab Library Catalog and Lending Server
//!
//! A REST JSON API over a book catalog and a borrow ledger. The inventory
//! service keeps a book's available quantity and its outstanding borrow
//! records consistent under concurrent borrows and returns; access is
//! guarded by a cookie-carried session token.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
