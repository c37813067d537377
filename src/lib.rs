//! PolyRAG authentication subsystem
//!
//! Issues and verifies signed access/refresh tokens, hashes passwords, and
//! exposes the `/auth` REST surface. The `client` module holds the
//! caller-side session layer: a dual-tier session store backed by a durable
//! key-value tier plus a one-shot rehydration guard for fresh processes.

pub mod client;
pub mod core;

pub use crate::core::auth::{AuthError, AuthGateway, Claims, TokenKind, TokenService};
pub use crate::core::config::Config;
pub use crate::core::users::{User, UserStore, UserStoreError};
