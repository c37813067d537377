//! Application configuration from environment variables.
//!
//! Load configuration using `Config::from_env()` after calling
//! `dotenvy::dotenv()`. The signing secret is resolved exactly once here and
//! treated as immutable for the lifetime of the process.

use rand::Rng;
use rand::distributions::Alphanumeric;
use rand::rngs::OsRng;

/// Default access token expiration (24 hours)
const ACCESS_TOKEN_EXPIRATION_MINUTES: i64 = 60 * 24;

/// Default refresh token expiration (7 days)
const REFRESH_TOKEN_EXPIRATION_DAYS: i64 = 7;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Secret key used to sign and verify tokens (HS256)
    pub jwt_secret: String,
    /// Access token expiration in minutes
    pub access_token_expiration_minutes: i64,
    /// Refresh token expiration in days
    pub refresh_token_expiration_days: i64,
    /// Address the HTTP server binds to
    pub bind_addr: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// If `JWT_SECRET_KEY` is unset a fresh random secret is generated.
    /// That fallback invalidates every previously issued token on restart,
    /// so it is only viable for single-instance deployments; the generated
    /// value is never persisted anywhere.
    pub fn from_env() -> Self {
        let secret = Self::resolve_secret(std::env::var("JWT_SECRET_KEY").ok());

        let access_exp = std::env::var("JWT_ACCESS_EXPIRATION_MINUTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(ACCESS_TOKEN_EXPIRATION_MINUTES);

        let refresh_exp = std::env::var("JWT_REFRESH_EXPIRATION_DAYS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(REFRESH_TOKEN_EXPIRATION_DAYS);

        let bind_addr =
            std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        Self {
            jwt_secret: secret,
            access_token_expiration_minutes: access_exp,
            refresh_token_expiration_days: refresh_exp,
            bind_addr,
        }
    }

    /// Create a config with the given secret and default expirations.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: secret.into(),
            access_token_expiration_minutes: ACCESS_TOKEN_EXPIRATION_MINUTES,
            refresh_token_expiration_days: REFRESH_TOKEN_EXPIRATION_DAYS,
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
        }
    }

    /// Set access token expiration
    pub fn access_token_expiration(mut self, minutes: i64) -> Self {
        self.access_token_expiration_minutes = minutes;
        self
    }

    /// Set refresh token expiration
    pub fn refresh_token_expiration(mut self, days: i64) -> Self {
        self.refresh_token_expiration_days = days;
        self
    }

    fn resolve_secret(configured: Option<String>) -> String {
        match configured {
            Some(secret) if !secret.is_empty() => secret,
            _ => {
                tracing::warn!(
                    "JWT_SECRET_KEY is not set; using a random secret. \
                     All issued tokens become invalid on restart."
                );
                Self::random_secret()
            }
        }
    }

    /// Generate a 43-character alphanumeric secret from the OS CSPRNG.
    fn random_secret() -> String {
        (&mut OsRng)
            .sample_iter(&Alphanumeric)
            .take(43)
            .map(char::from)
            .collect()
    }
}
