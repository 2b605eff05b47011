//! Account query and mutations.
//!
//! ARCHITECTURE
//! ============
//! Each operation is a plain async function over [`AppState`]: call the
//! account API, then apply the session and cache side effects that keep
//! client state consistent with the server.
//!
//! | operation        | session        | cache                                   | navigate |
//! |------------------|----------------|-----------------------------------------|----------|
//! | login / register | set token      | invalidate `["account"]`                | home     |
//! | logout           | clear token    | empty profile, invalidate `["account"]` | login    |
//! | update_profile   | -              | invalidate `["account","profile"]`      | -        |
//!
//! ERROR HANDLING
//! ==============
//! Validation failures return before any request. API failures are returned
//! unchanged and skip the success side effects, except for logout, which
//! tears the local session down either way.

use super::keys::AccountKeys;
use super::types::{Account, AccountPatch, LoginBody, LoginResponse, RegisterBody};
use super::validation::{validate_login, validate_patch, validate_register};
use crate::error::ApiError;
use crate::routes::Route;
use crate::state::AppState;

/// Whether the profile query may run: only while authenticated.
#[must_use]
pub fn profile_enabled(state: &AppState) -> bool {
    state.session.is_authenticated()
}

/// Read the current account through the cache.
///
/// Returns `Ok(None)` without any request while unauthenticated. Otherwise a
/// fresh cached copy is served, or `GET auth/profile` is issued and cached.
///
/// # Errors
///
/// Propagates the API error of the fetch.
pub async fn profile(state: &AppState) -> Result<Option<Account>, ApiError> {
    let api = state.api.clone();
    state
        .cache
        .query(&AccountKeys::profile(), profile_enabled(state), || async move { api.profile().await })
        .await
}

/// Cached profile without fetching; `None` while unauthenticated.
#[must_use]
pub fn cached_profile(state: &AppState) -> Option<Account> {
    if !profile_enabled(state) {
        return None;
    }
    state.cache.get::<Account>(&AccountKeys::profile())
}

/// # Errors
///
/// Returns [`ApiError::Validation`] for malformed credentials, or the API error.
pub async fn login(state: &AppState, body: LoginBody) -> Result<LoginResponse, ApiError> {
    validate_login(&body)?;
    let response = state.api.login(&body).await?;
    tracing::info!(user_id = response.user.id, "logged in");
    adopt_session(state, &response);
    Ok(response)
}

/// # Errors
///
/// Returns [`ApiError::Validation`] for malformed fields, or the API error.
pub async fn register(state: &AppState, body: RegisterBody) -> Result<LoginResponse, ApiError> {
    validate_register(&body)?;
    let response = state.api.register(&body).await?;
    tracing::info!(user_id = response.user.id, "registered");
    adopt_session(state, &response);
    Ok(response)
}

/// End the session on the server and locally.
///
/// The local teardown (token, profile entry, account key space, redirect)
/// runs even when the server call fails; that failure is still returned.
///
/// # Errors
///
/// Returns the API error of `POST auth/logout`, after local teardown.
pub async fn logout(state: &AppState) -> Result<(), ApiError> {
    let result = state.api.logout().await;
    if let Err(error) = &result {
        tracing::warn!(%error, "logout request failed; clearing local session anyway");
    }

    state.session.clear_token();
    state.cache.set_entry::<Account>(AccountKeys::profile(), None);
    state.cache.invalidate(&AccountKeys::all());
    state.navigator.push(Route::Login);
    result
}

/// Send a partial update and mark the cached profile stale.
///
/// # Errors
///
/// Returns [`ApiError::Validation`] for malformed present fields, or the API error.
pub async fn update_profile(state: &AppState, patch: AccountPatch) -> Result<Account, ApiError> {
    validate_patch(&patch)?;
    let account = state.api.update_profile(&patch).await?;
    state.cache.invalidate(&AccountKeys::profile());
    Ok(account)
}

fn adopt_session(state: &AppState, response: &LoginResponse) {
    state.session.set_token(&response.token);
    state.cache.invalidate(&AccountKeys::all());
    state.navigator.push(Route::Home);
}

#[cfg(test)]
#[path = "operations_test.rs"]
mod tests;
