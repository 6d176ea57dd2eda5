//! Session token signing and validation.
//!
//! Session tokens are HS256 JWTs carrying the authenticated principal
//! (subject id, username, admin flag). The admin login issues a token with
//! the fixed subject `"admin"`; user logins carry the user's id.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Subject id carried by tokens from the configured admin login.
pub const ADMIN_SUBJECT: &str = "admin";

/// Default session lifetime: 7 days.
pub const DEFAULT_EXPIRY_SECS: i64 = 604_800;

/// Error type for session token operations.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    Encoding(String),

    #[error("Token has expired")]
    Expired,

    #[error("Invalid token")]
    Invalid,
}

/// Claims carried by a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject: user id, or [`ADMIN_SUBJECT`] for the configured admin.
    pub sub: String,
    /// Username at issue time (informational; ownership checks use `sub`).
    pub username: String,
    /// Whether the principal has admin privileges.
    pub admin: bool,
    /// Issued at (Unix timestamp).
    pub iat: i64,
    /// Expiration time (Unix timestamp).
    pub exp: i64,
}

/// Signs and validates session tokens with a symmetric secret.
#[derive(Clone)]
pub struct SessionKeys {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiry_secs: i64,
}

impl std::fmt::Debug for SessionKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionKeys")
            .field("expiry_secs", &self.expiry_secs)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

impl SessionKeys {
    /// Creates a signer from the configured secret and expiry.
    pub fn new(secret: &str, expiry_secs: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expiry_secs,
        }
    }

    /// Issues a token for the given principal.
    pub fn issue(
        &self,
        subject: &str,
        username: &str,
        admin: bool,
    ) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = SessionClaims {
            sub: subject.to_string(),
            username: username.to_string(),
            admin,
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.expiry_secs)).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Encoding(e.to_string()))
    }

    /// Validates a token and returns its claims.
    pub fn validate(&self, token: &str) -> Result<SessionClaims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        let data = decode::<SessionClaims>(token, &self.decoding_key, &validation).map_err(
            |e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            },
        )?;

        Ok(data.claims)
    }
}
