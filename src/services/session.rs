//! Session token issuance and verification

use chrono::{Duration, Utc};

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::SessionClaims,
};

/// Name of the cookie carrying the session token
pub const SESSION_COOKIE: &str = "token";

/// Issues and verifies the signed session token.
///
/// Stateless by design: there is no server-side session table, so verifying
/// a token never touches a store and logout is purely a client-side cookie
/// clear.
#[derive(Clone)]
pub struct SessionService {
    config: AuthConfig,
}

impl SessionService {
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    /// Issue a signed token for a subject email
    pub fn issue(&self, email: &str) -> AppResult<String> {
        let now = Utc::now();
        let claims = SessionClaims {
            sub: email.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(self.config.jwt_expiration_hours)).timestamp(),
        };

        claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to sign session token: {}", e)))
    }

    /// Verify a token and extract its claims
    pub fn verify(&self, token: &str) -> AppResult<SessionClaims> {
        SessionClaims::from_token(token, &self.config.jwt_secret)
            .map_err(|e| AppError::Authentication(e.to_string()))
    }

    /// Whether the session cookie should carry `Secure`/`SameSite=None`
    pub fn cookie_secure(&self) -> bool {
        self.config.cookie_secure
    }
}
