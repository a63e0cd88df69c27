//! Data models for EduLab server

pub mod book;
pub mod borrow;
pub mod session;

pub use book::{Book, BookFields, UpsertOutcome};
pub use borrow::{BorrowRecord, CreateBorrow};
pub use session::SessionClaims;
