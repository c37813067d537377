//! Password hashing and verification
//!
//! Uses bcrypt with per-call salts; two hashes of the same input differ but
//! both verify. Verification failures of any kind (including malformed
//! digests) are reported as a non-match, never as an error.

use rand::Rng;
use rand::rngs::OsRng;

/// Cost factor for bcrypt hashing (12 is recommended for production)
const BCRYPT_COST: u32 = 12;

/// Default length for generated passwords
const DEFAULT_PASSWORD_LENGTH: usize = 16;

/// ASCII letters, digits, and punctuation
const PASSWORD_CHARSET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789\
      !\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// Password hashing error types
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingError(String),
}

/// Password hashing service.
///
/// Stateless and safe for unsynchronized concurrent use.
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordService;

impl PasswordService {
    pub fn new() -> Self {
        Self
    }

    /// Hash a password using bcrypt with automatic salt generation.
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        bcrypt::hash(password, BCRYPT_COST)
            .map_err(|e| PasswordError::HashingError(e.to_string()))
    }

    /// Verify a password against a bcrypt digest.
    ///
    /// Returns `false` on mismatch and on any internal failure such as a
    /// malformed digest. The comparison itself is constant-time inside
    /// bcrypt.
    pub fn verify(&self, password: &str, digest: &str) -> bool {
        match bcrypt::verify(password, digest) {
            Ok(matches) => matches,
            Err(e) => {
                tracing::debug!("password verification error: {e}");
                false
            }
        }
    }

    /// Generate a cryptographically strong random password of `length`
    /// characters drawn uniformly from letters, digits, and punctuation.
    pub fn generate_strong_password(&self, length: usize) -> String {
        (0..length)
            .map(|_| {
                let idx = OsRng.gen_range(0..PASSWORD_CHARSET.len());
                PASSWORD_CHARSET[idx] as char
            })
            .collect()
    }

    /// Generate a strong password of the default length (16).
    pub fn generate_default_password(&self) -> String {
        self.generate_strong_password(DEFAULT_PASSWORD_LENGTH)
    }
}
