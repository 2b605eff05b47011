//! Client-held authentication session.
//!
//! SYSTEM CONTEXT
//! ==============
//! The HTTP client reads the token on every request and clears it on a 401;
//! account mutations set it (login/register) and clear it (logout). The
//! profile query is gated on [`SessionStore::is_authenticated`].
//!
//! DESIGN
//! ======
//! The token lives in memory behind a `RwLock` and is mirrored to a
//! [`TokenStorage`] backend. The derived auth flag is recomputed on read and
//! also published on a `watch` channel for observers that want to react to
//! login/logout without polling.

pub mod storage;

use std::sync::{Arc, RwLock};

use tokio::sync::watch;

pub use storage::{FileTokenStorage, MemoryTokenStorage, TokenStorage};

/// Current bearer token plus its durable copy.
pub struct SessionStore {
    storage: Arc<dyn TokenStorage>,
    token: RwLock<String>,
    auth_tx: watch::Sender<bool>,
}

impl SessionStore {
    /// Restore the session persisted in `storage`.
    ///
    /// A storage read failure starts the session unauthenticated.
    #[must_use]
    pub fn load(storage: Arc<dyn TokenStorage>) -> Self {
        let token = match storage.load() {
            Ok(token) => token.unwrap_or_default(),
            Err(error) => {
                tracing::warn!(%error, "token storage unreadable; starting unauthenticated");
                String::new()
            }
        };
        let (auth_tx, _) = watch::channel(!token.is_empty());
        Self { storage, token: RwLock::new(token), auth_tx }
    }

    /// Fresh unauthenticated session backed by process memory.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::load(Arc::new(MemoryTokenStorage::new()))
    }

    /// Current token; empty when unauthenticated.
    #[must_use]
    pub fn token(&self) -> String {
        self.token
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// True iff the token is non-empty.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        !self
            .token
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .is_empty()
    }

    /// Persist and adopt `token`. An empty token behaves like [`Self::clear_token`].
    pub fn set_token(&self, token: &str) {
        if token.is_empty() {
            self.clear_token();
            return;
        }
        if let Err(error) = self.storage.store(token) {
            tracing::warn!(%error, "failed to persist session token");
        }
        {
            let mut current = self.token.write().unwrap_or_else(std::sync::PoisonError::into_inner);
            *current = token.to_owned();
        }
        tracing::info!("session token set");
        self.publish(true);
    }

    /// Remove the persisted token and reset to unauthenticated.
    ///
    /// Returns whether a token was present before the call.
    pub fn clear_token(&self) -> bool {
        if let Err(error) = self.storage.remove() {
            tracing::warn!(%error, "failed to remove persisted session token");
        }
        let had_token = {
            let mut current = self.token.write().unwrap_or_else(std::sync::PoisonError::into_inner);
            let had_token = !current.is_empty();
            current.clear();
            had_token
        };
        if had_token {
            tracing::info!("session token cleared");
        }
        self.publish(false);
        had_token
    }

    /// Observe the authenticated flag. Receivers wake only when it flips.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.auth_tx.subscribe()
    }

    fn publish(&self, authenticated: bool) {
        self.auth_tx.send_if_modified(|flag| {
            if *flag == authenticated {
                false
            } else {
                *flag = authenticated;
                true
            }
        });
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("authenticated", &self.is_authenticated())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
