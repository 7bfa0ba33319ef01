use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{TeamId, UserId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TeamError {
    #[error("team name cannot be empty")]
    EmptyName,

    #[error("unknown member role {0:?}")]
    UnknownMemberRole(String),
}

/// Capacity a user holds inside one team, independent of their account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MemberRole {
    Client,
    Instructor,
    Supervisor,
}

impl MemberRole {
    /// Parses the backend's membership role string.
    ///
    /// # Errors
    ///
    /// Returns `TeamError::UnknownMemberRole` for strings outside the set.
    pub fn parse(raw: &str) -> Result<Self, TeamError> {
        match raw.trim().to_lowercase().as_str() {
            "client" => Ok(MemberRole::Client),
            "instructor" => Ok(MemberRole::Instructor),
            "supervisor" => Ok(MemberRole::Supervisor),
            other => Err(TeamError::UnknownMemberRole(other.to_owned())),
        }
    }

    #[must_use]
    pub fn as_wire(self) -> &'static str {
        match self {
            MemberRole::Client => "client",
            MemberRole::Instructor => "instructor",
            MemberRole::Supervisor => "supervisor",
        }
    }
}

/// One user's membership in a team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamMember {
    pub user_id: UserId,
    pub role: MemberRole,
    pub display_name: String,
}

/// A supervisor-led group of trainees (and optionally instructors).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    id: TeamId,
    name: String,
    supervisor_id: UserId,
    members: Vec<TeamMember>,
    created_at: DateTime<Utc>,
}

impl Team {
    /// Creates a team.
    ///
    /// # Errors
    ///
    /// Returns `TeamError::EmptyName` if the name is blank.
    pub fn new(
        id: TeamId,
        name: impl Into<String>,
        supervisor_id: UserId,
        members: Vec<TeamMember>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, TeamError> {
        let name = name.into().trim().to_owned();
        if name.is_empty() {
            return Err(TeamError::EmptyName);
        }

        Ok(Self {
            id,
            name,
            supervisor_id,
            members,
            created_at,
        })
    }

    #[must_use]
    pub fn id(&self) -> TeamId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn supervisor_id(&self) -> UserId {
        self.supervisor_id
    }

    #[must_use]
    pub fn members(&self) -> &[TeamMember] {
        &self.members
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// The client-role member ids: the default target set for a bulk
    /// training assignment.
    #[must_use]
    pub fn client_ids(&self) -> Vec<UserId> {
        self.members
            .iter()
            .filter(|m| m.role == MemberRole::Client)
            .map(|m| m.user_id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    fn member(id: u64, role: MemberRole) -> TeamMember {
        TeamMember {
            user_id: UserId::new(id),
            role,
            display_name: format!("Member {id}"),
        }
    }

    #[test]
    fn team_rejects_empty_name() {
        let err = Team::new(TeamId::new(1), " ", UserId::new(1), Vec::new(), fixed_now())
            .unwrap_err();
        assert_eq!(err, TeamError::EmptyName);
    }

    #[test]
    fn client_ids_skips_other_member_roles() {
        let team = Team::new(
            TeamId::new(1),
            "Backend Guild",
            UserId::new(10),
            vec![
                member(1, MemberRole::Client),
                member(2, MemberRole::Instructor),
                member(3, MemberRole::Client),
                member(4, MemberRole::Supervisor),
            ],
            fixed_now(),
        )
        .unwrap();
        assert_eq!(team.client_ids(), vec![UserId::new(1), UserId::new(3)]);
    }

    #[test]
    fn member_role_parses_case_insensitively() {
        assert_eq!(MemberRole::parse("Client").unwrap(), MemberRole::Client);
        assert!(MemberRole::parse("manager").is_err());
    }
}
