use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

//
// ─── ROLES ─────────────────────────────────────────────────────────────────────
//

/// Access level assigned at account creation; immutable from the client's
/// perspective.
///
/// The backend identifies roles by small integers. Anything outside the
/// closed set below is rejected at the api boundary rather than carried
/// around as a loose number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    SystemAdmin,
    Supervisor,
    Client,
    Instructor,
    TrainingArea,
    ReportsAdmin,
}

/// All roles, in the backend's id order.
pub const ALL_ROLES: [Role; 6] = [
    Role::SystemAdmin,
    Role::Supervisor,
    Role::Client,
    Role::Instructor,
    Role::TrainingArea,
    Role::ReportsAdmin,
];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown role id {0}")]
pub struct UnknownRole(pub u64);

impl Role {
    /// Maps the server's numeric role id onto the closed role set.
    ///
    /// # Errors
    ///
    /// Returns `UnknownRole` for ids outside the known set.
    pub fn from_id(id: u64) -> Result<Self, UnknownRole> {
        match id {
            1 => Ok(Role::SystemAdmin),
            2 => Ok(Role::Supervisor),
            3 => Ok(Role::Client),
            4 => Ok(Role::Instructor),
            5 => Ok(Role::TrainingArea),
            6 => Ok(Role::ReportsAdmin),
            other => Err(UnknownRole(other)),
        }
    }

    /// The numeric id the server uses for this role.
    #[must_use]
    pub fn id(self) -> u64 {
        match self {
            Role::SystemAdmin => 1,
            Role::Supervisor => 2,
            Role::Client => 3,
            Role::Instructor => 4,
            Role::TrainingArea => 5,
            Role::ReportsAdmin => 6,
        }
    }

    /// Human-readable role name for headers and rosters.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Role::SystemAdmin => "System Administrator",
            Role::Supervisor => "Supervisor",
            Role::Client => "Trainee",
            Role::Instructor => "Instructor",
            Role::TrainingArea => "Training Area",
            Role::ReportsAdmin => "Reports Administrator",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

//
// ─── ACCOUNT STATUS ────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown account status {0:?}")]
pub struct UnknownAccountStatus(pub String);

/// Single-letter account state the backend stores on users and persons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountStatus {
    Active,
    Inactive,
}

impl AccountStatus {
    /// Parses the backend's one-letter flag.
    ///
    /// # Errors
    ///
    /// Returns `UnknownAccountStatus` for anything other than `A` or `I`.
    pub fn parse(raw: &str) -> Result<Self, UnknownAccountStatus> {
        match raw.trim() {
            "A" | "a" => Ok(AccountStatus::Active),
            "I" | "i" => Ok(AccountStatus::Inactive),
            other => Err(UnknownAccountStatus(other.to_owned())),
        }
    }

    #[must_use]
    pub fn as_wire(self) -> &'static str {
        match self {
            AccountStatus::Active => "A",
            AccountStatus::Inactive => "I",
        }
    }

    #[must_use]
    pub fn is_active(self) -> bool {
        matches!(self, AccountStatus::Active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_ids_roundtrip() {
        for role in ALL_ROLES {
            assert_eq!(Role::from_id(role.id()).unwrap(), role);
        }
    }

    #[test]
    fn unknown_role_id_is_rejected() {
        let err = Role::from_id(99).unwrap_err();
        assert_eq!(err, UnknownRole(99));
    }

    #[test]
    fn account_status_parses_known_letters() {
        assert_eq!(AccountStatus::parse("A").unwrap(), AccountStatus::Active);
        assert_eq!(AccountStatus::parse("i").unwrap(), AccountStatus::Inactive);
        assert!(AccountStatus::parse("Z").is_err());
    }

    #[test]
    fn role_display_names_are_distinct() {
        let names: std::collections::HashSet<_> =
            ALL_ROLES.iter().map(|r| r.display_name()).collect();
        assert_eq!(names.len(), ALL_ROLES.len());
    }
}
