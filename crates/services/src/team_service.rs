//! Team rosters and membership changes.

use std::sync::Arc;

use training_api::gateway::TeamGateway;
use training_core::model::{MemberRole, Team, TeamId, TeamMember, UserId};

use crate::error::TeamServiceError;

/// Orchestrates team reads and roster edits.
#[derive(Clone)]
pub struct TeamService {
    teams: Arc<dyn TeamGateway>,
}

impl TeamService {
    #[must_use]
    pub fn new(teams: Arc<dyn TeamGateway>) -> Self {
        Self { teams }
    }

    /// All teams.
    ///
    /// # Errors
    ///
    /// Returns `TeamServiceError::Api` if the fetch fails.
    pub async fn list_teams(&self) -> Result<Vec<Team>, TeamServiceError> {
        Ok(self.teams.list_teams().await?)
    }

    /// One team's roster.
    ///
    /// # Errors
    ///
    /// Returns `TeamServiceError::Api` if the fetch fails.
    pub async fn roster(&self, team_id: TeamId) -> Result<Vec<TeamMember>, TeamServiceError> {
        Ok(self.teams.team_members(team_id).await?)
    }

    /// Adds a member.
    ///
    /// # Errors
    ///
    /// Returns `TeamServiceError::Api` if the server refuses.
    pub async fn add_member(
        &self,
        team_id: TeamId,
        user_id: UserId,
        role: MemberRole,
    ) -> Result<(), TeamServiceError> {
        Ok(self.teams.add_member(team_id, user_id, role).await?)
    }

    /// Removes a member.
    ///
    /// # Errors
    ///
    /// Returns `TeamServiceError::Api` if the membership is missing.
    pub async fn remove_member(
        &self,
        team_id: TeamId,
        user_id: UserId,
    ) -> Result<(), TeamServiceError> {
        Ok(self.teams.remove_member(team_id, user_id).await?)
    }

    /// Client-role member ids of a team, the default bulk-assignment
    /// target set.
    ///
    /// # Errors
    ///
    /// Returns `TeamServiceError::Api` if the roster fetch fails.
    pub async fn assignment_targets(&self, team_id: TeamId) -> Result<Vec<UserId>, TeamServiceError> {
        let members = self.teams.team_members(team_id).await?;
        Ok(members
            .into_iter()
            .filter(|member| member.role == MemberRole::Client)
            .map(|member| member.user_id)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use training_api::InMemoryGateway;
    use training_core::time::fixed_now;

    fn member(id: u64, role: MemberRole) -> TeamMember {
        TeamMember {
            user_id: UserId::new(id),
            role,
            display_name: format!("Member {id}"),
        }
    }

    #[tokio::test]
    async fn assignment_targets_are_client_members_only() {
        let gateway = InMemoryGateway::new();
        gateway.seed_team(
            Team::new(
                TeamId::new(1),
                "Backend Guild",
                UserId::new(10),
                vec![
                    member(1, MemberRole::Client),
                    member(2, MemberRole::Instructor),
                    member(3, MemberRole::Client),
                ],
                fixed_now(),
            )
            .unwrap(),
        );
        let service = TeamService::new(Arc::new(gateway));

        let targets = service.assignment_targets(TeamId::new(1)).await.unwrap();
        assert_eq!(targets, vec![UserId::new(1), UserId::new(3)]);
    }
}
