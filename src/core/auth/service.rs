//! Authentication gateway
//!
//! Stateless business logic for registration, login, token refresh, identity
//! lookup, and logout. Composes the password and token services with the
//! external [`UserStore`]; only register and login ever touch the store.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::auth::jwt::{TokenError, TokenKind, TokenService};
use crate::core::auth::password::{PasswordError, PasswordService};
use crate::core::users::{UserStore, UserStoreError};

/// Wire value for the `token_type` field
const TOKEN_TYPE_BEARER: &str = "bearer";

/// Authentication error types.
///
/// Unknown email and wrong password share `InvalidCredentials`; all token
/// verification failures share `InvalidToken`. The reason behind a rejection
/// is never surfaced to the caller.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Incorrect email or password")]
    InvalidCredentials,

    #[error("User with this email already exists")]
    EmailExists,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<UserStoreError> for AuthError {
    fn from(err: UserStoreError) -> Self {
        match err {
            UserStoreError::EmailExists => AuthError::EmailExists,
            // Sanitized: the store's message never carries credentials
            UserStoreError::Unavailable(msg) => AuthError::Internal(msg),
        }
    }
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::EncodingError(msg) => AuthError::Internal(msg),
            reason => {
                tracing::debug!("token rejected: {reason}");
                AuthError::InvalidToken
            }
        }
    }
}

impl From<PasswordError> for AuthError {
    fn from(err: PasswordError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

/// Registration request data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

/// Registration response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub user_id: String,
    pub email: String,
    pub message: String,
}

/// Login request data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response with both tokens and the user's public identity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub user_id: String,
    pub email: String,
}

/// Token refresh request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Token refresh response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub access_token: String,
    pub token_type: String,
}

/// Public identity embedded in a verified token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserIdentity {
    pub user_id: String,
    pub email: String,
}

/// Authentication gateway.
///
/// Each handler is an independent call; there is no session affinity and no
/// shared mutable state beyond the read-only signing key.
#[derive(Clone)]
pub struct AuthGateway {
    users: Arc<dyn UserStore>,
    passwords: PasswordService,
    tokens: TokenService,
}

impl AuthGateway {
    pub fn new(users: Arc<dyn UserStore>, tokens: TokenService) -> Self {
        Self {
            users,
            passwords: PasswordService::new(),
            tokens,
        }
    }

    /// Register a new user, rejecting duplicate emails.
    pub async fn register(&self, request: RegisterRequest) -> Result<RegisterResponse, AuthError> {
        if self
            .users
            .get_user_by_email(&request.email)
            .await?
            .is_some()
        {
            return Err(AuthError::EmailExists);
        }

        let digest = self.passwords.hash(&request.password)?;
        let user = self.users.create_user(&request.email, &digest).await?;

        Ok(RegisterResponse {
            user_id: user.id.to_string(),
            email: user.email,
            message: "User registered successfully".to_string(),
        })
    }

    /// Authenticate and issue an access/refresh token pair.
    ///
    /// Unknown email and wrong password produce the identical outcome so the
    /// response does not reveal whether the account exists.
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, AuthError> {
        let user = self
            .users
            .get_user_by_email(&request.email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !self.passwords.verify(&request.password, &user.hashed_password) {
            return Err(AuthError::InvalidCredentials);
        }

        let (access_token, refresh_token) = self.tokens.issue_pair(user.id, &user.email)?;

        Ok(LoginResponse {
            access_token,
            refresh_token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            user_id: user.id.to_string(),
            email: user.email,
        })
    }

    /// Mint a new access token from a valid refresh token.
    ///
    /// The refresh token is not rotated; it stays usable until its own
    /// expiry.
    pub fn refresh(&self, request: RefreshRequest) -> Result<RefreshResponse, AuthError> {
        let claims = self
            .tokens
            .verify(&request.refresh_token, TokenKind::Refresh)?;

        let user_id: uuid::Uuid = claims.sub.parse().map_err(|_| AuthError::InvalidToken)?;
        let access_token = self.tokens.issue_access(user_id, &claims.email)?;

        Ok(RefreshResponse {
            access_token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
        })
    }

    /// Return the identity embedded in a valid access token.
    pub fn whoami(&self, access_token: &str) -> Result<UserIdentity, AuthError> {
        let claims = self.tokens.verify(access_token, TokenKind::Access)?;

        Ok(UserIdentity {
            user_id: claims.sub,
            email: claims.email,
        })
    }

    /// Advisory logout: validates the caller's token, changes no server-side
    /// state. Discarding client-held copies is the caller's job; an already
    /// distributed token stays valid until its expiry.
    pub fn logout(&self, access_token: &str) -> Result<(), AuthError> {
        self.tokens.verify(access_token, TokenKind::Access)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Config;
    use crate::core::users::InMemoryUserStore;

    fn create_test_gateway() -> AuthGateway {
        let config = Config::new("test_secret_key_for_testing_only_32bytes!");
        AuthGateway::new(
            Arc::new(InMemoryUserStore::new()),
            TokenService::new(&config),
        )
    }

    fn register_request(email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    fn login_request(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_new_user() {
        let gateway = create_test_gateway();

        let response = gateway
            .register(register_request("a@x.com", "longpassword1"))
            .await
            .unwrap();

        assert_eq!(response.email, "a@x.com");
        assert!(!response.user_id.is_empty());
        assert_eq!(response.message, "User registered successfully");
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let gateway = create_test_gateway();
        gateway
            .register(register_request("a@x.com", "longpassword1"))
            .await
            .unwrap();

        let result = gateway
            .register(register_request("A@X.COM", "otherpassword2"))
            .await;
        assert!(matches!(result, Err(AuthError::EmailExists)));
    }

    #[tokio::test]
    async fn test_login_success() {
        let gateway = create_test_gateway();
        let registered = gateway
            .register(register_request("a@x.com", "longpassword1"))
            .await
            .unwrap();

        let response = gateway
            .login(login_request("a@x.com", "longpassword1"))
            .await
            .unwrap();

        assert_eq!(response.user_id, registered.user_id);
        assert_eq!(response.email, "a@x.com");
        assert_eq!(response.token_type, "bearer");
        assert!(!response.access_token.is_empty());
        assert!(!response.refresh_token.is_empty());
        assert_ne!(response.access_token, response.refresh_token);
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let gateway = create_test_gateway();
        gateway
            .register(register_request("a@x.com", "longpassword1"))
            .await
            .unwrap();

        let wrong_password = gateway.login(login_request("a@x.com", "wrongpassword")).await;
        let unknown_email = gateway
            .login(login_request("nobody@x.com", "longpassword1"))
            .await;

        assert!(matches!(wrong_password, Err(AuthError::InvalidCredentials)));
        assert!(matches!(unknown_email, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_whoami_returns_token_identity() {
        let gateway = create_test_gateway();
        gateway
            .register(register_request("a@x.com", "longpassword1"))
            .await
            .unwrap();
        let login = gateway
            .login(login_request("a@x.com", "longpassword1"))
            .await
            .unwrap();

        let identity = gateway.whoami(&login.access_token).unwrap();
        assert_eq!(identity.user_id, login.user_id);
        assert_eq!(identity.email, "a@x.com");
    }

    #[tokio::test]
    async fn test_whoami_rejects_refresh_token() {
        let gateway = create_test_gateway();
        gateway
            .register(register_request("a@x.com", "longpassword1"))
            .await
            .unwrap();
        let login = gateway
            .login(login_request("a@x.com", "longpassword1"))
            .await
            .unwrap();

        let result = gateway.whoami(&login.refresh_token);
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn test_refresh_issues_new_access_token() {
        let gateway = create_test_gateway();
        gateway
            .register(register_request("a@x.com", "longpassword1"))
            .await
            .unwrap();
        let login = gateway
            .login(login_request("a@x.com", "longpassword1"))
            .await
            .unwrap();

        let refreshed = gateway
            .refresh(RefreshRequest {
                refresh_token: login.refresh_token.clone(),
            })
            .unwrap();

        assert_eq!(refreshed.token_type, "bearer");

        // New access token carries the same identity
        let identity = gateway.whoami(&refreshed.access_token).unwrap();
        assert_eq!(identity.user_id, login.user_id);
        assert_eq!(identity.email, "a@x.com");

        // The refresh token is not rotated and can be reused
        assert!(
            gateway
                .refresh(RefreshRequest {
                    refresh_token: login.refresh_token,
                })
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_refresh_rejects_access_token() {
        let gateway = create_test_gateway();
        gateway
            .register(register_request("a@x.com", "longpassword1"))
            .await
            .unwrap();
        let login = gateway
            .login(login_request("a@x.com", "longpassword1"))
            .await
            .unwrap();

        let result = gateway.refresh(RefreshRequest {
            refresh_token: login.access_token,
        });
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn test_logout_requires_valid_token() {
        let gateway = create_test_gateway();
        gateway
            .register(register_request("a@x.com", "longpassword1"))
            .await
            .unwrap();
        let login = gateway
            .login(login_request("a@x.com", "longpassword1"))
            .await
            .unwrap();

        assert!(gateway.logout(&login.access_token).is_ok());
        assert!(matches!(
            gateway.logout("garbage.token.value"),
            Err(AuthError::InvalidToken)
        ));

        // Logout is advisory: the token itself remains valid afterwards
        assert!(gateway.whoami(&login.access_token).is_ok());
    }

    #[test]
    fn test_auth_error_from_user_store_error() {
        let err: AuthError = UserStoreError::EmailExists.into();
        assert!(matches!(err, AuthError::EmailExists));

        let err: AuthError = UserStoreError::Unavailable("db down".to_string()).into();
        assert!(matches!(err, AuthError::Internal(_)));
    }

    #[test]
    fn test_auth_error_from_token_error() {
        let err: AuthError = TokenError::Expired.into();
        assert!(matches!(err, AuthError::InvalidToken));

        let err: AuthError = TokenError::InvalidTokenType.into();
        assert!(matches!(err, AuthError::InvalidToken));
    }

    #[test]
    fn test_login_request_deserialization() {
        let json = r#"{
            "email": "user@example.com",
            "password": "longpassword1"
        }"#;

        let request: LoginRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.email, "user@example.com");
        assert_eq!(request.password, "longpassword1");
    }
}
