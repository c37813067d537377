//! Authentication module for PolyRAG
//!
//! This module provides authentication functionality including:
//! - Password hashing and verification
//! - JWT token generation and validation
//! - Stateless gateway handlers for register/login/refresh/whoami/logout
//! - REST API endpoints under `/auth`

pub mod api;
pub mod jwt;
pub mod password;
pub mod service;

pub use api::auth_router;
pub use jwt::{Claims, TokenError, TokenKind, TokenService};
pub use password::PasswordService;
pub use service::{
    AuthError, AuthGateway, LoginRequest, LoginResponse, RefreshRequest, RefreshResponse,
    RegisterRequest, RegisterResponse, UserIdentity,
};
