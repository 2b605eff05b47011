//! Base-URL HTTP client with bearer-token injection.
//!
//! ARCHITECTURE
//! ============
//! Every request goes through [`HttpClient::execute`]: the token is read from
//! the session at send time (so a login mid-flight is honoured by the next
//! request, never a stale copy), and every response status is inspected once
//! before it reaches the caller.
//!
//! ERROR HANDLING
//! ==============
//! A 401 clears the session token exactly once for that response and is then
//! returned as [`ApiError::Unauthorized`]. The failed request is not retried.
//! Other non-success statuses become [`ApiError::Status`] with the server's
//! error body parsed when possible.

use std::sync::Arc;

use reqwest::header::{ACCEPT, HeaderValue};
use reqwest::{Method, RequestBuilder, Response, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::types::ApiErrorBody;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::session::SessionStore;

pub struct HttpClient {
    http: reqwest::Client,
    base_url: Url,
    session: Arc<SessionStore>,
}

impl HttpClient {
    /// Build a client for `config.base_url` reading its token from `session`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if the base URL is unusable or the
    /// underlying reqwest client cannot be built.
    pub fn new(config: &ClientConfig, session: Arc<SessionStore>) -> Result<Self, ApiError> {
        let base_url = Url::parse(&crate::config::normalize_base_url(&config.base_url)?)
            .map_err(|e| ApiError::Config(format!("invalid base URL: {e}")))?;
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(|e| ApiError::Config(format!("HTTP client build failed: {e}")))?;
        Ok(Self { http, base_url, session })
    }

    #[must_use]
    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve a relative endpoint path (`auth/login`) against the base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if the path cannot be joined.
    pub fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::Config(format!("invalid endpoint path '{path}': {e}")))
    }

    /// `GET path`, decoding the JSON response.
    ///
    /// # Errors
    ///
    /// Propagates transport, status and decode failures.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self.request(Method::GET, path)?;
        decode(self.execute(request, &Method::GET, path).await?).await
    }

    /// `POST path` with a JSON body, decoding the JSON response.
    ///
    /// # Errors
    ///
    /// Propagates transport, status and decode failures.
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::POST, path)?.json(body);
        decode(self.execute(request, &Method::POST, path).await?).await
    }

    /// `POST path` without a body, discarding whatever the server answers.
    ///
    /// # Errors
    ///
    /// Propagates transport and status failures.
    pub async fn post_empty(&self, path: &str) -> Result<(), ApiError> {
        let request = self.request(Method::POST, path)?;
        self.execute(request, &Method::POST, path).await?;
        Ok(())
    }

    /// `PATCH path` with a JSON body, decoding the JSON response.
    ///
    /// # Errors
    ///
    /// Propagates transport, status and decode failures.
    pub async fn patch_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::PATCH, path)?.json(body);
        decode(self.execute(request, &Method::PATCH, path).await?).await
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let url = self.endpoint(path)?;
        let request = self
            .http
            .request(method, url)
            .header(ACCEPT, HeaderValue::from_static("application/json"));
        Ok(with_bearer(request, &self.session.token()))
    }

    async fn execute(&self, request: RequestBuilder, method: &Method, path: &str) -> Result<Response, ApiError> {
        let response = match request.send().await {
            Ok(response) => response,
            Err(error) => {
                tracing::debug!(%method, path, %error, "api request failed");
                return Err(ApiError::from(error));
            }
        };

        let status = response.status();
        tracing::debug!(%method, path, status = status.as_u16(), "api response");
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::UNAUTHORIZED {
            let cleared = self.session.clear_token();
            tracing::info!(%method, path, cleared, "unauthorized response; session token cleared");
        }

        let body = ApiErrorBody::parse(&response.text().await.unwrap_or_default());
        Err(status_error(status, body))
    }
}

fn with_bearer(request: RequestBuilder, token: &str) -> RequestBuilder {
    if token.is_empty() { request } else { request.bearer_auth(token) }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    response.json::<T>().await.map_err(|e| ApiError::Decode(e.to_string()))
}

fn status_error(status: StatusCode, body: ApiErrorBody) -> ApiError {
    let fallback = status.canonical_reason().unwrap_or("request failed");
    let message = body.message_or(fallback);
    if status == StatusCode::UNAUTHORIZED {
        ApiError::Unauthorized { message }
    } else {
        ApiError::Status { status: status.as_u16(), message, code: body.code }
    }
}

#[cfg(test)]
#[path = "http_test.rs"]
mod tests;
