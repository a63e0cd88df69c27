//! Session claims carried by the signed token

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Claims embedded in the session JWT.
///
/// The session is entirely client-held: validity is a pure function of the
/// token's signature and `exp`. There is no server-side revocation list, so
/// logout before expiry does not invalidate copies of the token held
/// elsewhere.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject email
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
}

impl SessionClaims {
    /// Sign the claims into a token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse and validate a token (signature and expiry)
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }

    /// A subject may only read their own borrow records.
    pub fn require_subject(&self, email: &str) -> Result<(), AppError> {
        if self.sub == email {
            Ok(())
        } else {
            Err(AppError::Authorization(format!(
                "subject {} may not act for {}",
                self.sub, email
            )))
        }
    }
}
