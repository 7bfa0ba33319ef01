use async_trait::async_trait;
use serde::Serialize;

use training_core::model::{MemberRole, Team, TeamId, TeamMember, UserId};

use crate::error::ApiError;
use crate::gateway::{TeamGateway, TeamMemberRecord, TeamRecord};
use crate::rest::client::ApiClient;

#[derive(Serialize)]
struct NewTeamMember {
    user_id: u64,
    role: &'static str,
}

#[async_trait]
impl TeamGateway for ApiClient {
    async fn list_teams(&self) -> Result<Vec<Team>, ApiError> {
        let records: Vec<TeamRecord> = self.get_json("teams").await?;
        records.into_iter().map(TeamRecord::into_team).collect()
    }

    async fn team_members(&self, team_id: TeamId) -> Result<Vec<TeamMember>, ApiError> {
        let records: Vec<TeamMemberRecord> =
            self.get_json(&format!("teams/{team_id}/members")).await?;
        records
            .into_iter()
            .map(TeamMemberRecord::into_member)
            .collect()
    }

    async fn add_member(
        &self,
        team_id: TeamId,
        user_id: UserId,
        role: MemberRole,
    ) -> Result<(), ApiError> {
        self.post_json_unit(
            &format!("teams/{team_id}/members"),
            &NewTeamMember {
                user_id: user_id.value(),
                role: role.as_wire(),
            },
        )
        .await
    }

    async fn remove_member(&self, team_id: TeamId, user_id: UserId) -> Result<(), ApiError> {
        self.delete(&format!("teams/{team_id}/members/{user_id}")).await
    }
}
