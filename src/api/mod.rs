//! API handlers for EduLab REST endpoints

pub mod auth;
pub mod books;
pub mod borrows;
pub mod health;
pub mod openapi;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::CookieJar;

use crate::{
    error::AppError, models::SessionClaims, services::session::SESSION_COOKIE, AppState,
};

/// Extractor for the verified session subject, read from the session cookie
pub struct AuthenticatedSubject(pub SessionClaims);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedSubject {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);

        let token = jar
            .get(SESSION_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .ok_or_else(|| AppError::Authentication("Missing session cookie".to_string()))?;

        let claims = state.services.session.verify(&token)?;

        Ok(AuthenticatedSubject(claims))
    }
}
