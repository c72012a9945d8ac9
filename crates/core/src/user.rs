//! User records as exchanged with the `/users` resource.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::id::UserId;

/// A user account.
///
/// `id` is absent on records that have not been created yet.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub is_active: bool,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Client-side field rules applied before a user is sent to the API.
    ///
    /// These are never reconciled with the server's own rules; the API may
    /// still reject a record that passes here.
    pub fn validate(&self) -> DomainResult<()> {
        if self.email.trim().is_empty() {
            return Err(DomainError::validation("email is required"));
        }
        if !is_valid_email(self.email.trim()) {
            return Err(DomainError::validation("invalid email format"));
        }
        if self.first_name.trim().is_empty() {
            return Err(DomainError::validation("first name is required"));
        }
        if self.last_name.trim().is_empty() {
            return Err(DomainError::validation("last name is required"));
        }
        if self.roles.is_empty() {
            return Err(DomainError::validation("at least one role is required"));
        }
        Ok(())
    }
}

/// Loose syntactic email check: `local@label(.label)*`.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || local.len() > 64 || domain.is_empty() || domain.contains('@') {
        return false;
    }
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    domain.split('.').all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    })
}
