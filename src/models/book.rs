//! Book (catalog) model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Catalog book with its available quantity.
///
/// `quantity` is the number of units available for borrowing and is never
/// negative; it only moves in ±1 steps through the inventory service, or
/// wholesale through a catalog edit.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub name: String,
    pub author: String,
    pub category: String,
    pub subcategory: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub image: Option<String>,
    pub rating: Option<f64>,
    pub quantity: i32,
}

/// Book fields as supplied by clients (everything but the id)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookFields {
    pub name: String,
    pub author: String,
    pub category: String,
    pub subcategory: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub image: Option<String>,
    pub rating: Option<f64>,
    #[serde(default)]
    pub quantity: i32,
}

/// Outcome of a full-field replace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UpsertOutcome {
    Updated,
    Created,
}
