//! Networking for the account API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `http` owns request issuance and the session side effects of responses;
//! `types` defines the wire shapes shared by every endpoint.

pub mod http;
pub mod types;

pub use http::HttpClient;
pub use types::ApiErrorBody;
