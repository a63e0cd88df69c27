//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, books, borrows, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "EduLab API",
        version = "1.0.0",
        description = "Library catalog and lending REST API"
    ),
    paths(
        // Health
        health::liveness,
        health::health_check,
        // Auth
        auth::jwt_login,
        auth::jwt_logout,
        // Books
        books::list_books,
        books::create_book,
        books::get_book,
        books::update_book,
        // Borrows
        borrows::borrow_book,
        borrows::my_borrowed_books,
        borrows::return_book,
    ),
    components(
        schemas(
            // Auth
            auth::LoginRequest,
            auth::SessionResponse,
            // Books
            crate::models::book::Book,
            crate::models::book::BookFields,
            crate::models::book::UpsertOutcome,
            books::InsertResponse,
            books::UpdateResponse,
            // Borrows
            crate::models::borrow::BorrowRecord,
            borrows::BorrowBookRequest,
            borrows::BorrowResponse,
            borrows::ReturnResponse,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Liveness endpoints"),
        (name = "auth", description = "Session cookie endpoints"),
        (name = "books", description = "Catalog management"),
        (name = "borrows", description = "Borrow ledger")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
