//! JWT utilities for token generation and validation
//!
//! Tokens are signed with HS256 using a single process-wide secret. Access
//! tokens default to 24 hours, refresh tokens to 7 days. Claims are
//! `{sub, email, type, iat, exp}` only; there is no `jti`, so individual
//! tokens cannot be revoked before their expiry.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::config::Config;

/// Token verification/issuance errors.
///
/// Callers at the API boundary collapse every variant into one uniform
/// "invalid" outcome; the distinction exists for internal logging only.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("Token encoding failed: {0}")]
    EncodingError(String),

    #[error("Token expired")]
    Expired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Invalid token type")]
    InvalidTokenType,
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::InvalidToken,
        }
    }
}

/// Token kind enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Access => write!(f, "access"),
            TokenKind::Refresh => write!(f, "refresh"),
        }
    }
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// User email
    pub email: String,
    /// Token kind (access or refresh)
    #[serde(rename = "type")]
    pub kind: TokenKind,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// JWT service for token operations.
///
/// Holds pre-built keys derived from the config secret; immutable after
/// construction and safe for unsynchronized concurrent use.
#[derive(Clone)]
pub struct TokenService {
    access_expiration_minutes: i64,
    refresh_expiration_days: i64,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenService {
    /// Create a new token service from the application config.
    pub fn new(config: &Config) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        Self {
            access_expiration_minutes: config.access_token_expiration_minutes,
            refresh_expiration_days: config.refresh_token_expiration_days,
            encoding_key,
            decoding_key,
        }
    }

    /// Issue an access token for the given subject and email.
    pub fn issue_access(&self, user_id: Uuid, email: &str) -> Result<String, TokenError> {
        self.issue(
            user_id,
            email,
            TokenKind::Access,
            Duration::minutes(self.access_expiration_minutes),
        )
    }

    /// Issue a refresh token for the given subject and email.
    pub fn issue_refresh(&self, user_id: Uuid, email: &str) -> Result<String, TokenError> {
        self.issue(
            user_id,
            email,
            TokenKind::Refresh,
            Duration::days(self.refresh_expiration_days),
        )
    }

    /// Issue one access and one refresh token.
    pub fn issue_pair(&self, user_id: Uuid, email: &str) -> Result<(String, String), TokenError> {
        let access = self.issue_access(user_id, email)?;
        let refresh = self.issue_refresh(user_id, email)?;
        Ok((access, refresh))
    }

    fn issue(
        &self,
        user_id: Uuid,
        email: &str,
        kind: TokenKind,
        ttl: Duration,
    ) -> Result<String, TokenError> {
        let now = Utc::now();
        let exp = now + ttl;

        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            kind,
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingError(e.to_string()))
    }

    /// Verify a token: signature, then claims decode, then the expected
    /// kind, then expiry. Any failure is terminal for that token.
    pub fn verify(&self, token: &str, expected: TokenKind) -> Result<Claims, TokenError> {
        let mut validation = Validation::default();
        // Strict expiration checking; subject is carried but not constrained
        validation.leeway = 0;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)?;
        let claims = token_data.claims;

        if claims.kind != expected {
            return Err(TokenError::InvalidTokenType);
        }

        if claims.sub.is_empty() {
            return Err(TokenError::InvalidToken);
        }

        Ok(claims)
    }
}
