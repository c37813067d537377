//! Caller-side auth: HTTP client for the `/auth` surface, the dual-layer
//! session store, and the one-shot rehydration guard.

pub mod api;
pub mod guard;
pub mod session;
pub mod storage;

pub use api::{AuthClient, ClientError};
pub use guard::{AuthGate, RehydrationGuard};
pub use session::SessionStore;
pub use storage::{DurableStore, FileStore, MemoryStore, StorageError};
