//! Cache key space for account data.
//!
//! Everything account-related lives under `["account"]`, so login and logout
//! can invalidate it wholesale while profile edits touch only
//! `["account","profile"]`.

use crate::cache::QueryKey;

pub struct AccountKeys;

impl AccountKeys {
    /// `["account"]`
    #[must_use]
    pub fn all() -> QueryKey {
        QueryKey::root("account")
    }

    /// `["account","profile"]`
    #[must_use]
    pub fn profile() -> QueryKey {
        Self::all().child("profile")
    }

    /// `["account", id]`
    #[must_use]
    pub fn by_id(id: u64) -> QueryKey {
        Self::all().child(id)
    }
}

#[cfg(test)]
#[path = "keys_test.rs"]
mod tests;
