//! Dual-layer client session persistence
//!
//! Holds the session in memory (fast path, authoritative when present) and
//! mirrors it to a durable key-value tier so it survives a reload or a new
//! process. Durable-tier failures never break the in-memory session: writes
//! are best-effort and read failures count as "no data".

use crate::client::storage::DurableStore;

/// Durable keys, namespaced under the product prefix so they do not collide
/// with unrelated storage in the same browser/profile.
pub const KEY_ACCESS_TOKEN: &str = "polyrag_access_token";
pub const KEY_REFRESH_TOKEN: &str = "polyrag_refresh_token";
pub const KEY_USER_ID: &str = "polyrag_user_id";
pub const KEY_USER_EMAIL: &str = "polyrag_user_email";
pub const KEY_AUTHENTICATED: &str = "polyrag_authenticated";

const ALL_KEYS: [&str; 5] = [
    KEY_ACCESS_TOKEN,
    KEY_REFRESH_TOKEN,
    KEY_USER_ID,
    KEY_USER_EMAIL,
    KEY_AUTHENTICATED,
];

/// In-memory session record. Either fully populated with
/// `authenticated = true` or effectively absent; a partial record is treated
/// as absent.
#[derive(Debug, Clone, Default)]
struct SessionRecord {
    access_token: Option<String>,
    refresh_token: Option<String>,
    user_id: Option<String>,
    email: Option<String>,
    authenticated: bool,
}

impl SessionRecord {
    /// A record counts as present when the authenticated flag, access token,
    /// and user id are all set.
    fn is_complete(&self) -> bool {
        self.authenticated && self.access_token.is_some() && self.user_id.is_some()
    }
}

/// Dual-layer session store scoped to one client session.
///
/// Single-consumer by construction; only the owning session's logic touches
/// its own record.
#[derive(Debug)]
pub struct SessionStore<S: DurableStore> {
    durable: S,
    record: SessionRecord,
}

impl<S: DurableStore> SessionStore<S> {
    pub fn new(durable: S) -> Self {
        Self {
            durable,
            record: SessionRecord::default(),
        }
    }

    /// Access the durable tier directly (primarily for inspection in tests).
    pub fn durable(&self) -> &S {
        &self.durable
    }

    /// Save authentication data to memory, then mirror it to the durable
    /// tier. A durable write failure is logged and swallowed; the in-memory
    /// session must stay usable regardless.
    pub fn save(&mut self, access_token: &str, refresh_token: &str, user_id: &str, email: &str) {
        self.record = SessionRecord {
            access_token: Some(access_token.to_string()),
            refresh_token: Some(refresh_token.to_string()),
            user_id: Some(user_id.to_string()),
            email: Some(email.to_string()),
            authenticated: true,
        };

        let writes = [
            (KEY_ACCESS_TOKEN, access_token),
            (KEY_REFRESH_TOKEN, refresh_token),
            (KEY_USER_ID, user_id),
            (KEY_USER_EMAIL, email),
            (KEY_AUTHENTICATED, "1"),
        ];
        for (key, value) in writes {
            if let Err(e) = self.durable.set(key, value) {
                tracing::warn!("failed to persist {key}: {e}");
            }
        }
    }

    /// Ensure authentication data is loaded into memory.
    ///
    /// Returns true immediately when memory already holds a complete record;
    /// otherwise attempts to hydrate from the durable tier. Hydration needs
    /// at least an access token and a user id there; the refresh token and
    /// email are optional.
    pub fn load(&mut self) -> bool {
        if self.record.is_complete() {
            return true;
        }

        let access_token = match self.durable.get(KEY_ACCESS_TOKEN) {
            Ok(value) => value,
            Err(e) => {
                tracing::debug!("durable tier unavailable: {e}");
                return false;
            }
        };
        let user_id = self.durable.get(KEY_USER_ID).unwrap_or_default();

        let (Some(access_token), Some(user_id)) = (access_token, user_id) else {
            return false;
        };

        self.record = SessionRecord {
            access_token: Some(access_token),
            refresh_token: self.durable.get(KEY_REFRESH_TOKEN).unwrap_or_default(),
            user_id: Some(user_id),
            email: self.durable.get(KEY_USER_EMAIL).unwrap_or_default(),
            authenticated: true,
        };
        true
    }

    /// Clear the in-memory record and best-effort remove every durable key.
    /// Removal errors are ignored; logout must never fail on storage issues.
    pub fn clear(&mut self) {
        self.record = SessionRecord::default();

        for key in ALL_KEYS {
            if let Err(e) = self.durable.remove(key) {
                tracing::debug!("failed to remove {key}: {e}");
            }
        }
    }

    /// Whether a session exists, hydrating from the durable tier as a side
    /// effect when memory is empty.
    pub fn is_authenticated(&mut self) -> bool {
        self.load()
    }

    /// Whether memory alone holds a complete record; never consults the
    /// durable tier. The rehydration guard's fast path depends on this.
    pub fn memory_authenticated(&self) -> bool {
        self.record.is_complete()
    }

    /// Current access token, hydrating if needed.
    pub fn access_token(&mut self) -> Option<String> {
        self.load();
        self.record.access_token.clone()
    }

    /// Current refresh token, hydrating if needed.
    pub fn refresh_token(&mut self) -> Option<String> {
        self.load();
        self.record.refresh_token.clone()
    }

    /// Current user id, hydrating if needed.
    pub fn user_id(&mut self) -> Option<String> {
        self.load();
        self.record.user_id.clone()
    }

    /// Current user email, hydrating if needed.
    pub fn email(&mut self) -> Option<String> {
        self.load();
        self.record.email.clone()
    }

    /// Install an identity into memory only, without tokens and without
    /// touching the durable tier. Used by the no-auth bypass.
    pub(crate) fn adopt_identity(&mut self, user_id: &str, email: &str) {
        self.record.user_id = Some(user_id.to_string());
        self.record.email = Some(email.to_string());
        self.record.authenticated = true;
    }
}
