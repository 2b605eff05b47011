//! Auth endpoints of the account API.
//!
//! SYSTEM CONTEXT
//! ==============
//! [`AccountApi`] is the seam between account operations and the network:
//! production code uses [`AccountService`] over the shared [`HttpClient`],
//! tests substitute an in-process fake.

use std::sync::Arc;

use async_trait::async_trait;

use super::types::{Account, AccountPatch, LoginBody, LoginResponse, RegisterBody};
use crate::error::ApiError;
use crate::net::HttpClient;

pub const LOGIN_PATH: &str = "auth/login";
pub const REGISTER_PATH: &str = "auth/register";
pub const PROFILE_PATH: &str = "auth/profile";
pub const LOGOUT_PATH: &str = "auth/logout";

/// The five auth calls. Implementations report failures unchanged.
#[async_trait]
pub trait AccountApi: Send + Sync {
    /// `POST auth/login`
    async fn login(&self, body: &LoginBody) -> Result<LoginResponse, ApiError>;

    /// `POST auth/register`
    async fn register(&self, body: &RegisterBody) -> Result<LoginResponse, ApiError>;

    /// `GET auth/profile`
    async fn profile(&self) -> Result<Account, ApiError>;

    /// `POST auth/logout`
    async fn logout(&self) -> Result<(), ApiError>;

    /// `PATCH auth/profile`
    async fn update_profile(&self, patch: &AccountPatch) -> Result<Account, ApiError>;
}

/// [`AccountApi`] over HTTP.
pub struct AccountService {
    http: Arc<HttpClient>,
}

impl AccountService {
    #[must_use]
    pub fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl AccountApi for AccountService {
    async fn login(&self, body: &LoginBody) -> Result<LoginResponse, ApiError> {
        self.http.post_json(LOGIN_PATH, body).await
    }

    async fn register(&self, body: &RegisterBody) -> Result<LoginResponse, ApiError> {
        self.http.post_json(REGISTER_PATH, body).await
    }

    async fn profile(&self) -> Result<Account, ApiError> {
        self.http.get_json(PROFILE_PATH).await
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.http.post_empty(LOGOUT_PATH).await
    }

    async fn update_profile(&self, patch: &AccountPatch) -> Result<Account, ApiError> {
        self.http.patch_json(PROFILE_PATH, patch).await
    }
}

#[cfg(test)]
#[path = "service_test.rs"]
mod tests;
