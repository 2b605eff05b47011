//! Account DTOs exchanged with the auth endpoints.
//!
//! Field names are camelCase on the wire.

use serde::{Deserialize, Serialize};

/// Server-owned account record. The client only ever holds a cached copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: u64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl Account {
    /// `"First Last"`, trimmed when either half is blank.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_owned()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginBody {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterBody {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

/// Answer to both login and register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: Account,
}

/// Partial account update; `None` fields are left out of the request body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl AccountPatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.first_name.is_none() && self.last_name.is_none() && self.avatar.is_none()
    }

    /// `account` with this patch applied.
    #[must_use]
    pub fn apply_to(&self, account: &Account) -> Account {
        let mut next = account.clone();
        if let Some(email) = &self.email {
            next.email.clone_from(email);
        }
        if let Some(first_name) = &self.first_name {
            next.first_name.clone_from(first_name);
        }
        if let Some(last_name) = &self.last_name {
            next.last_name.clone_from(last_name);
        }
        if let Some(avatar) = &self.avatar {
            next.avatar = Some(avatar.clone());
        }
        next
    }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
