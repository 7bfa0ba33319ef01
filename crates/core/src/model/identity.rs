use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::UserId;
use crate::model::role::{AccountStatus, Role};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum IdentityError {
    #[error("username cannot be empty")]
    EmptyUsername,

    #[error("display name cannot be empty")]
    EmptyDisplayName,
}

/// The authenticated user's profile plus role.
///
/// Serializable because the session vault persists it across app restarts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    id: UserId,
    username: String,
    first_name: String,
    last_name: String,
    email: Option<String>,
    role: Role,
    status: AccountStatus,
    created_at: DateTime<Utc>,
}

impl Identity {
    /// Creates an identity, trimming name fields.
    ///
    /// # Errors
    ///
    /// Returns `IdentityError` if the username or both name parts are empty.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: UserId,
        username: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: Option<String>,
        role: Role,
        status: AccountStatus,
        created_at: DateTime<Utc>,
    ) -> Result<Self, IdentityError> {
        let username = username.into().trim().to_owned();
        if username.is_empty() {
            return Err(IdentityError::EmptyUsername);
        }

        let first_name = first_name.into().trim().to_owned();
        let last_name = last_name.into().trim().to_owned();
        if first_name.is_empty() && last_name.is_empty() {
            return Err(IdentityError::EmptyDisplayName);
        }

        let email = email.map(|e| e.trim().to_owned()).filter(|e| !e.is_empty());

        Ok(Self {
            id,
            username,
            first_name,
            last_name,
            email,
            role,
            status,
            created_at,
        })
    }

    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    #[must_use]
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// "First Last", falling back to whichever part is present.
    #[must_use]
    pub fn display_name(&self) -> String {
        match (self.first_name.is_empty(), self.last_name.is_empty()) {
            (false, false) => format!("{} {}", self.first_name, self.last_name),
            (false, true) => self.first_name.clone(),
            _ => self.last_name.clone(),
        }
    }

    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    #[must_use]
    pub fn status(&self) -> AccountStatus {
        self.status
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    fn identity(first: &str, last: &str) -> Result<Identity, IdentityError> {
        Identity::new(
            UserId::new(1),
            "mgarcia",
            first,
            last,
            Some("m.garcia@example.com".into()),
            Role::Client,
            AccountStatus::Active,
            fixed_now(),
        )
    }

    #[test]
    fn rejects_empty_username() {
        let err = Identity::new(
            UserId::new(1),
            "   ",
            "Maria",
            "Garcia",
            None,
            Role::Client,
            AccountStatus::Active,
            fixed_now(),
        )
        .unwrap_err();
        assert_eq!(err, IdentityError::EmptyUsername);
    }

    #[test]
    fn rejects_fully_empty_name() {
        let err = identity("  ", "").unwrap_err();
        assert_eq!(err, IdentityError::EmptyDisplayName);
    }

    #[test]
    fn display_name_joins_parts() {
        let id = identity("Maria", "Garcia").unwrap();
        assert_eq!(id.display_name(), "Maria Garcia");
    }

    #[test]
    fn display_name_tolerates_missing_part() {
        let id = identity("Maria", "").unwrap();
        assert_eq!(id.display_name(), "Maria");
    }

    #[test]
    fn blank_email_is_dropped() {
        let id = Identity::new(
            UserId::new(1),
            "mgarcia",
            "Maria",
            "Garcia",
            Some("   ".into()),
            Role::Client,
            AccountStatus::Active,
            fixed_now(),
        )
        .unwrap();
        assert_eq!(id.email(), None);
    }
}
