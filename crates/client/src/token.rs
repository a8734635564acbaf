//! Session token storage.
//!
//! The backend issues a bearer token at login; every subsequent request
//! attaches it. The store is a cheaply clonable handle -- the API layer
//! and the application share one instance, so a login or logout is
//! visible everywhere immediately.

use std::sync::{Arc, RwLock};

/// Shared handle to the session's bearer token.
#[derive(Debug, Clone, Default)]
pub struct TokenStore {
    inner: Arc<RwLock<Option<String>>>,
}

impl TokenStore {
    /// Create an empty store (no session).
    pub fn new() -> Self {
        Self::default()
    }

    /// Current token, if a session is active.
    pub fn get(&self) -> Option<String> {
        self.inner.read().expect("token store lock poisoned").clone()
    }

    /// Replace the stored token (called after a successful login).
    pub fn set(&self, token: impl Into<String>) {
        *self.inner.write().expect("token store lock poisoned") = Some(token.into());
    }

    /// Drop the stored token (called on logout).
    pub fn clear(&self) {
        *self.inner.write().expect("token store lock poisoned") = None;
    }
}
