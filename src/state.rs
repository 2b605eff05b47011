//! Shared client state.
//!
//! DESIGN
//! ======
//! `AppState` bundles every collaborator an account operation touches: the
//! session, the HTTP client, the query cache, the account API and the
//! navigator. It is built once and passed by reference, so ownership is
//! explicit and each test gets its own isolated instance.

use std::sync::Arc;

use crate::account::service::{AccountApi, AccountService};
use crate::cache::QueryCache;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::net::HttpClient;
use crate::routes::Navigator;
use crate::session::{SessionStore, TokenStorage};

/// Shared client state. Clone is cheap: all fields are `Arc`-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub config: ClientConfig,
    pub session: Arc<SessionStore>,
    pub http: Arc<HttpClient>,
    pub cache: Arc<QueryCache>,
    pub api: Arc<dyn AccountApi>,
    pub navigator: Arc<dyn Navigator>,
}

impl AppState {
    /// Production wiring: session restored from `storage`, HTTP-backed account API.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if the HTTP client cannot be built.
    pub fn from_config(
        config: ClientConfig,
        storage: Arc<dyn TokenStorage>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, ApiError> {
        let session = Arc::new(SessionStore::load(storage));
        let http = Arc::new(HttpClient::new(&config, session.clone())?);
        let api: Arc<dyn AccountApi> = Arc::new(AccountService::new(http.clone()));
        Ok(Self::assemble(config, session, http, api, navigator))
    }

    /// Same wiring as [`AppState::from_config`] but with a caller-supplied account API.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if the HTTP client cannot be built.
    pub fn with_api(
        config: ClientConfig,
        session: Arc<SessionStore>,
        api: Arc<dyn AccountApi>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, ApiError> {
        let http = Arc::new(HttpClient::new(&config, session.clone())?);
        Ok(Self::assemble(config, session, http, api, navigator))
    }

    fn assemble(
        config: ClientConfig,
        session: Arc<SessionStore>,
        http: Arc<HttpClient>,
        api: Arc<dyn AccountApi>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let cache = Arc::new(QueryCache::new(config.cache_stale_time));
        Self { config, session, http, cache, api, navigator }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("base_url", &self.config.base_url)
            .field("session", &self.session)
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
