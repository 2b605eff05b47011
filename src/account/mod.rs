//! Account entity: wire types, cache keys, endpoints and operations.
//!
//! SYSTEM CONTEXT
//! ==============
//! `service` talks to the auth endpoints, `operations` composes those calls
//! with the session store and query cache, `keys` names the cache entries
//! both sides agree on.

pub mod keys;
pub mod operations;
pub mod service;
pub mod types;
pub mod validation;

pub use keys::AccountKeys;
pub use service::{AccountApi, AccountService};
pub use types::{Account, AccountPatch, LoginBody, LoginResponse, RegisterBody};
