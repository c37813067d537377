//! Auth API endpoints
//!
//! Provides REST API endpoints for authentication:
//! - POST /auth/register - Register a new user
//! - POST /auth/login - Login and get tokens
//! - POST /auth/refresh - Refresh access token
//! - GET /auth/me - Get current user info
//! - POST /auth/logout - Logout (advisory; invalidation is client-side)

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;

use crate::core::auth::service::{
    AuthError, AuthGateway, LoginRequest, LoginResponse, RefreshRequest, RefreshResponse,
    RegisterRequest, RegisterResponse, UserIdentity,
};

/// API error response
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

/// Response for logout
#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub message: String,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AuthError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "INVALID_CREDENTIALS",
                self.to_string(),
            ),
            AuthError::EmailExists => (StatusCode::BAD_REQUEST, "EMAIL_EXISTS", self.to_string()),
            AuthError::InvalidToken => {
                (StatusCode::UNAUTHORIZED, "INVALID_TOKEN", self.to_string())
            }
            AuthError::Internal(detail) => {
                // Detail stays in the log; the body carries a sanitized message
                tracing::error!("internal auth error: {detail}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Internal server error".to_string(),
                )
            }
        };

        let body = ApiError {
            error: message,
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

/// Create the auth API router
pub fn auth_router(gateway: AuthGateway) -> Router {
    Router::new()
        .route("/auth/register", post(register_handler))
        .route("/auth/login", post(login_handler))
        .route("/auth/refresh", post(refresh_handler))
        .route("/auth/me", get(me_handler))
        .route("/auth/logout", post(logout_handler))
        .with_state(gateway)
}

/// POST /auth/register
async fn register_handler(
    State(gateway): State<AuthGateway>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AuthError> {
    tracing::info!("Registration attempt for email: {}", request.email);

    let response = gateway.register(request).await?;

    tracing::info!("User registered successfully: {}", response.email);

    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /auth/login
async fn login_handler(
    State(gateway): State<AuthGateway>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AuthError> {
    tracing::info!("Login attempt for email: {}", request.email);

    let response = gateway.login(request).await?;

    tracing::info!("User logged in successfully: {}", response.email);

    Ok(Json(response))
}

/// POST /auth/refresh
async fn refresh_handler(
    State(gateway): State<AuthGateway>,
    Json(request): Json<RefreshRequest>,
) -> Result<Json<RefreshResponse>, AuthError> {
    tracing::debug!("Token refresh request");

    let response = gateway.refresh(request)?;

    Ok(Json(response))
}

/// GET /auth/me
async fn me_handler(
    State(gateway): State<AuthGateway>,
    headers: HeaderMap,
) -> Result<Json<UserIdentity>, AuthError> {
    let token = extract_bearer_token(&headers)?;

    let identity = gateway.whoami(&token)?;

    Ok(Json(identity))
}

/// POST /auth/logout
async fn logout_handler(
    State(gateway): State<AuthGateway>,
    headers: HeaderMap,
) -> Result<Json<LogoutResponse>, AuthError> {
    let token = extract_bearer_token(&headers)?;

    gateway.logout(&token)?;

    Ok(Json(LogoutResponse {
        message: "Logged out successfully".to_string(),
    }))
}

/// Extract Bearer token from Authorization header
fn extract_bearer_token(headers: &HeaderMap) -> Result<String, AuthError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::InvalidToken)?;

    if !auth_header.starts_with("Bearer ") {
        return Err(AuthError::InvalidToken);
    }

    let token = auth_header.trim_start_matches("Bearer ").to_string();

    if token.is_empty() {
        return Err(AuthError::InvalidToken);
    }

    Ok(token)
}
