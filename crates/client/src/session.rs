use std::sync::{Arc, PoisonError, RwLock};

/// Holder of the bearer token for one logical session.
///
/// A cheaply-cloneable handle, passed to every store at construction.
/// There is deliberately no process-wide instance: tests and multi-session
/// setups build as many independent sessions as they need.
///
/// Last write wins and is readable immediately after; no expiry is
/// tracked on the client.
#[derive(Clone, Debug, Default)]
pub struct Session {
    token: Arc<RwLock<Option<String>>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the token. An empty token is normalized to "absent".
    pub fn set_token(&self, token: impl Into<String>) {
        let token = token.into();
        let mut guard = self.token.write().unwrap_or_else(PoisonError::into_inner);
        *guard = if token.is_empty() { None } else { Some(token) };
    }

    /// Ends the session; every subsequent store operation fails its
    /// token guard until a new token is set.
    pub fn clear_token(&self) {
        let mut guard = self.token.write().unwrap_or_else(PoisonError::into_inner);
        *guard = None;
    }

    /// Current token, read synchronously by every store before it
    /// issues a request.
    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}
