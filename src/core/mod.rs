//! Server-side core: configuration, token and password services, the auth
//! gateway, and the user store boundary.

pub mod auth;
pub mod config;
pub mod users;
