//! Account client: authenticated session, bearer-token HTTP client and
//! server-state cache for an account/auth API.
//!
//! DESIGN
//! ======
//! Login, registration, logout and profile edits each touch three pieces of
//! client state: the session token, the HTTP client that carries it, and the
//! cached server data derived from it. [`state::AppState`] owns all three and
//! [`account::operations`] applies the rules that keep them consistent.

pub mod account;
pub mod cache;
pub mod config;
pub mod error;
pub mod net;
pub mod routes;
pub mod session;
pub mod state;

pub use config::ClientConfig;
pub use error::ApiError;
pub use state::AppState;
