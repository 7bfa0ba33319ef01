//! In-memory implementation of every gateway trait.
//!
//! The double for service and view-model tests: mutexed maps instead of a
//! server, deterministic ids, and scripted failures so bulk-action tests
//! can exercise partial outcomes.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use training_core::model::{
    AssignmentId, AssignmentStatus, Identity, MaterialId, MaterialProgressRecord, MemberRole,
    ProgressId, ProgressTarget, RequiredTechnology, Role, StudyMaterial, Team, TeamId,
    TeamMember, TechnologyId, TechnologyProgressRecord, Training, TrainingAssignment,
    TrainingId, UserId,
};
use training_core::time::Clock;

use crate::error::ApiError;
use crate::gateway::{
    AssignmentGateway, AuthGateway, LoginResponse, NewAssignment, NewMaterial, NewUser,
    ProgressGateway, TeamGateway, TrainingGateway, UserGateway, UserUpdate,
};

fn invalid(err: impl std::fmt::Display) -> ApiError {
    ApiError::Serialization(err.to_string())
}

fn target_key(target: &ProgressTarget) -> String {
    match target {
        ProgressTarget::Material(id) => format!("m:{id}"),
        ProgressTarget::InstructorLink(id) => format!("l:{id}"),
    }
}

#[derive(Default)]
struct State {
    accounts: HashMap<String, (String, UserId)>,
    withhold_token: bool,
    identities: HashMap<UserId, Identity>,
    trainings: HashMap<TrainingId, Training>,
    materials: HashMap<TrainingId, Vec<StudyMaterial>>,
    assignments: HashMap<AssignmentId, TrainingAssignment>,
    technology_rows: HashMap<(AssignmentId, TechnologyId), TechnologyProgressRecord>,
    material_rows: HashMap<(AssignmentId, String), MaterialProgressRecord>,
    teams: HashMap<TeamId, Team>,
    rejected_users: HashSet<UserId>,
    next_user_id: u64,
    next_assignment_id: u64,
    next_material_id: u64,
    next_progress_id: u64,
}

/// All six gateways over shared in-process state.
#[derive(Clone, Default)]
pub struct InMemoryGateway {
    state: Arc<Mutex<State>>,
    clock: Clock,
}

impl InMemoryGateway {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Same gateway, stamping created rows with the given clock.
    #[must_use]
    pub fn with_clock(clock: Clock) -> Self {
        Self {
            clock,
            ..Self::default()
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, ApiError> {
        self.state.lock().map_err(|e| invalid(e.to_string()))
    }

    /// Registers a login account for an identity.
    pub fn register_account(
        &self,
        username: impl Into<String>,
        password: impl Into<String>,
        identity: Identity,
    ) {
        if let Ok(mut state) = self.state.lock() {
            state
                .accounts
                .insert(username.into(), (password.into(), identity.id()));
            state.next_user_id = state.next_user_id.max(identity.id().value());
            state.identities.insert(identity.id(), identity);
        }
    }

    /// Makes `login` answer without a token, as a misbehaving server would.
    pub fn withhold_token(&self) {
        if let Ok(mut state) = self.state.lock() {
            state.withhold_token = true;
        }
    }

    pub fn seed_identity(&self, identity: Identity) {
        if let Ok(mut state) = self.state.lock() {
            state.next_user_id = state.next_user_id.max(identity.id().value());
            state.identities.insert(identity.id(), identity);
        }
    }

    pub fn seed_training(&self, training: Training) {
        if let Ok(mut state) = self.state.lock() {
            state.trainings.insert(training.id(), training);
        }
    }

    pub fn seed_material(&self, material: StudyMaterial) {
        if let Ok(mut state) = self.state.lock() {
            state.next_material_id = state.next_material_id.max(material.id().value());
            state
                .materials
                .entry(material.training_id())
                .or_default()
                .push(material);
        }
    }

    pub fn seed_assignment(&self, assignment: TrainingAssignment) {
        if let Ok(mut state) = self.state.lock() {
            state.next_assignment_id = state.next_assignment_id.max(assignment.id().value());
            state.assignments.insert(assignment.id(), assignment);
        }
    }

    pub fn seed_team(&self, team: Team) {
        if let Ok(mut state) = self.state.lock() {
            state.teams.insert(team.id(), team);
        }
    }

    /// Scripts `create_assignment` to fail for this user.
    pub fn reject_assignments_for(&self, user_id: UserId) {
        if let Ok(mut state) = self.state.lock() {
            state.rejected_users.insert(user_id);
        }
    }

    /// Number of stored assignments, for fan-out assertions.
    #[must_use]
    pub fn assignment_count(&self) -> usize {
        self.state.lock().map(|s| s.assignments.len()).unwrap_or(0)
    }
}

#[async_trait]
impl AuthGateway for InMemoryGateway {
    async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let state = self.lock()?;
        match state.accounts.get(username) {
            Some((stored, user_id)) if stored == password => Ok(LoginResponse {
                token: (!state.withhold_token).then(|| format!("token-{user_id}")),
                user_id: user_id.value(),
            }),
            _ => Err(ApiError::Rejected {
                status: 400,
                detail: "incorrect username or password".into(),
            }),
        }
    }
}

#[async_trait]
impl UserGateway for InMemoryGateway {
    async fn list_users(&self, skip: usize, limit: usize) -> Result<Vec<Identity>, ApiError> {
        let state = self.lock()?;
        let mut users: Vec<Identity> = state.identities.values().cloned().collect();
        users.sort_by_key(Identity::id);
        Ok(users.into_iter().skip(skip).take(limit).collect())
    }

    async fn get_user(&self, id: UserId) -> Result<Identity, ApiError> {
        let state = self.lock()?;
        state.identities.get(&id).cloned().ok_or(ApiError::NotFound)
    }

    async fn create_user(&self, new_user: &NewUser) -> Result<Identity, ApiError> {
        let mut state = self.lock()?;
        if state.accounts.contains_key(&new_user.username) {
            return Err(ApiError::Rejected {
                status: 400,
                detail: "username already registered".into(),
            });
        }
        state.next_user_id += 1;
        let id = UserId::new(state.next_user_id);
        let role = Role::from_id(new_user.role_id).map_err(invalid)?;
        let identity = Identity::new(
            id,
            new_user.username.clone(),
            new_user.first_name.clone(),
            new_user.last_name.clone(),
            new_user.email.clone(),
            role,
            training_core::model::AccountStatus::Active,
            self.clock.now(),
        )
        .map_err(invalid)?;
        state
            .accounts
            .insert(new_user.username.clone(), (new_user.password.clone(), id));
        state.identities.insert(id, identity.clone());
        Ok(identity)
    }

    async fn update_user(&self, id: UserId, update: &UserUpdate) -> Result<Identity, ApiError> {
        let mut state = self.lock()?;
        let current = state.identities.get(&id).ok_or(ApiError::NotFound)?;
        let updated = Identity::new(
            id,
            current.username(),
            update
                .first_name
                .clone()
                .unwrap_or_else(|| current.first_name().to_owned()),
            update
                .last_name
                .clone()
                .unwrap_or_else(|| current.last_name().to_owned()),
            update
                .email
                .clone()
                .or_else(|| current.email().map(str::to_owned)),
            current.role(),
            update.status.unwrap_or(current.status()),
            current.created_at(),
        )
        .map_err(invalid)?;
        state.identities.insert(id, updated.clone());
        Ok(updated)
    }

    async fn delete_user(&self, id: UserId) -> Result<(), ApiError> {
        let mut state = self.lock()?;
        state.identities.remove(&id).ok_or(ApiError::NotFound)?;
        state.accounts.retain(|_, (_, uid)| *uid != id);
        Ok(())
    }

    async fn change_password(&self, id: UserId, new_password: &str) -> Result<(), ApiError> {
        let mut state = self.lock()?;
        for (stored, uid) in state.accounts.values_mut() {
            if *uid == id {
                *stored = new_password.to_owned();
                return Ok(());
            }
        }
        Err(ApiError::NotFound)
    }
}

#[async_trait]
impl TrainingGateway for InMemoryGateway {
    async fn list_trainings(&self) -> Result<Vec<Training>, ApiError> {
        let state = self.lock()?;
        let mut trainings: Vec<Training> = state.trainings.values().cloned().collect();
        trainings.sort_by_key(Training::id);
        Ok(trainings)
    }

    async fn get_training(&self, id: TrainingId) -> Result<Training, ApiError> {
        let state = self.lock()?;
        state.trainings.get(&id).cloned().ok_or(ApiError::NotFound)
    }

    async fn list_technologies(
        &self,
        id: TrainingId,
    ) -> Result<Vec<RequiredTechnology>, ApiError> {
        let state = self.lock()?;
        let training = state.trainings.get(&id).ok_or(ApiError::NotFound)?;
        Ok(training.technologies().to_vec())
    }

    async fn list_materials(&self, id: TrainingId) -> Result<Vec<StudyMaterial>, ApiError> {
        let state = self.lock()?;
        Ok(state.materials.get(&id).cloned().unwrap_or_default())
    }

    async fn create_material(
        &self,
        new_material: &NewMaterial,
    ) -> Result<StudyMaterial, ApiError> {
        let mut state = self.lock()?;
        let training_id = TrainingId::new(new_material.training_id);
        if !state.trainings.contains_key(&training_id) {
            return Err(ApiError::NotFound);
        }
        state.next_material_id += 1;
        let material = StudyMaterial::new(
            MaterialId::new(state.next_material_id),
            training_id,
            new_material.title.clone(),
            &new_material.link,
            new_material.description.clone(),
        )
        .map_err(invalid)?;
        state
            .materials
            .entry(training_id)
            .or_default()
            .push(material.clone());
        Ok(material)
    }
}

#[async_trait]
impl AssignmentGateway for InMemoryGateway {
    async fn assignments_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<TrainingAssignment>, ApiError> {
        let state = self.lock()?;
        let mut found: Vec<TrainingAssignment> = state
            .assignments
            .values()
            .filter(|a| a.user_id() == user_id)
            .cloned()
            .collect();
        found.sort_by_key(TrainingAssignment::id);
        Ok(found)
    }

    async fn assignments_for_training(
        &self,
        training_id: TrainingId,
    ) -> Result<Vec<TrainingAssignment>, ApiError> {
        let state = self.lock()?;
        let mut found: Vec<TrainingAssignment> = state
            .assignments
            .values()
            .filter(|a| a.training_id() == training_id)
            .cloned()
            .collect();
        found.sort_by_key(TrainingAssignment::id);
        Ok(found)
    }

    async fn create_assignment(
        &self,
        new_assignment: &NewAssignment,
    ) -> Result<TrainingAssignment, ApiError> {
        let mut state = self.lock()?;
        let user_id = UserId::new(new_assignment.user_id);
        let training_id = TrainingId::new(new_assignment.training_id);

        if state.rejected_users.contains(&user_id) {
            return Err(ApiError::Rejected {
                status: 400,
                detail: format!("assignment for user {user_id} could not be created"),
            });
        }
        let duplicate = state
            .assignments
            .values()
            .any(|a| a.user_id() == user_id && a.training_id() == training_id);
        if duplicate {
            return Err(ApiError::Rejected {
                status: 400,
                detail: "user is already assigned to this training".into(),
            });
        }

        state.next_assignment_id += 1;
        let assignment = TrainingAssignment::new(
            AssignmentId::new(state.next_assignment_id),
            user_id,
            training_id,
            new_assignment.instructor_id.map(UserId::new),
            AssignmentStatus::Assigned,
            0,
            self.clock.now(),
            None,
            Vec::new(),
        )
        .map_err(invalid)?;
        state.assignments.insert(assignment.id(), assignment.clone());
        Ok(assignment)
    }

    async fn update_meeting_link(&self, id: AssignmentId, link: &str) -> Result<(), ApiError> {
        let mut state = self.lock()?;
        let current = state.assignments.get(&id).ok_or(ApiError::NotFound)?;
        let updated = TrainingAssignment::new(
            current.id(),
            current.user_id(),
            current.training_id(),
            current.instructor_id(),
            current.status(),
            current.stored_percentage(),
            current.assigned_at(),
            Some(link.to_owned()),
            current.instructor_links().to_vec(),
        )
        .map_err(invalid)?;
        state.assignments.insert(id, updated);
        Ok(())
    }

    async fn update_instructor(
        &self,
        training_id: TrainingId,
        instructor_id: UserId,
    ) -> Result<(), ApiError> {
        let mut state = self.lock()?;
        let ids: Vec<AssignmentId> = state
            .assignments
            .values()
            .filter(|a| a.training_id() == training_id)
            .map(TrainingAssignment::id)
            .collect();
        for id in ids {
            if let Some(current) = state.assignments.get(&id) {
                let updated = TrainingAssignment::new(
                    current.id(),
                    current.user_id(),
                    current.training_id(),
                    Some(instructor_id),
                    current.status(),
                    current.stored_percentage(),
                    current.assigned_at(),
                    current.meeting_link().map(str::to_owned),
                    current.instructor_links().to_vec(),
                )
                .map_err(invalid)?;
                state.assignments.insert(id, updated);
            }
        }
        Ok(())
    }
}

#[async_trait]
impl ProgressGateway for InMemoryGateway {
    async fn technology_progress(
        &self,
        assignment_id: AssignmentId,
    ) -> Result<Vec<TechnologyProgressRecord>, ApiError> {
        let state = self.lock()?;
        let mut rows: Vec<TechnologyProgressRecord> = state
            .technology_rows
            .values()
            .filter(|r| r.assignment_id == assignment_id)
            .cloned()
            .collect();
        rows.sort_by_key(|r| r.id);
        Ok(rows)
    }

    async fn material_progress(
        &self,
        assignment_id: AssignmentId,
    ) -> Result<Vec<MaterialProgressRecord>, ApiError> {
        let state = self.lock()?;
        let mut rows: Vec<MaterialProgressRecord> = state
            .material_rows
            .values()
            .filter(|r| r.assignment_id == assignment_id)
            .cloned()
            .collect();
        rows.sort_by_key(|r| r.id);
        Ok(rows)
    }

    async fn upsert_technology_progress(
        &self,
        assignment_id: AssignmentId,
        technology_id: TechnologyId,
        completed: bool,
    ) -> Result<(), ApiError> {
        let mut state = self.lock()?;
        let key = (assignment_id, technology_id);
        if let Some(row) = state.technology_rows.get_mut(&key) {
            row.completed = completed;
            return Ok(());
        }
        state.next_progress_id += 1;
        let row = TechnologyProgressRecord {
            id: ProgressId::new(state.next_progress_id),
            assignment_id,
            technology_id,
            completed,
        };
        state.technology_rows.insert(key, row);
        Ok(())
    }

    async fn upsert_material_progress(
        &self,
        assignment_id: AssignmentId,
        user_id: UserId,
        target: &ProgressTarget,
        completed: bool,
    ) -> Result<(), ApiError> {
        let mut state = self.lock()?;
        let key = (assignment_id, target_key(target));
        if let Some(row) = state.material_rows.get_mut(&key) {
            row.completed = completed;
            return Ok(());
        }
        state.next_progress_id += 1;
        let row = MaterialProgressRecord {
            id: ProgressId::new(state.next_progress_id),
            assignment_id,
            user_id,
            target: target.clone(),
            completed,
        };
        state.material_rows.insert(key, row);
        Ok(())
    }
}

#[async_trait]
impl TeamGateway for InMemoryGateway {
    async fn list_teams(&self) -> Result<Vec<Team>, ApiError> {
        let state = self.lock()?;
        let mut teams: Vec<Team> = state.teams.values().cloned().collect();
        teams.sort_by_key(Team::id);
        Ok(teams)
    }

    async fn team_members(&self, team_id: TeamId) -> Result<Vec<TeamMember>, ApiError> {
        let state = self.lock()?;
        let team = state.teams.get(&team_id).ok_or(ApiError::NotFound)?;
        Ok(team.members().to_vec())
    }

    async fn add_member(
        &self,
        team_id: TeamId,
        user_id: UserId,
        role: MemberRole,
    ) -> Result<(), ApiError> {
        let mut state = self.lock()?;
        let display_name = state
            .identities
            .get(&user_id)
            .map(Identity::display_name)
            .unwrap_or_else(|| format!("User {user_id}"));
        let team = state.teams.get(&team_id).ok_or(ApiError::NotFound)?;
        if team.members().iter().any(|m| m.user_id == user_id) {
            return Err(ApiError::Rejected {
                status: 400,
                detail: "user is already a team member".into(),
            });
        }
        let mut members = team.members().to_vec();
        members.push(TeamMember {
            user_id,
            role,
            display_name,
        });
        let updated = Team::new(
            team.id(),
            team.name(),
            team.supervisor_id(),
            members,
            team.created_at(),
        )
        .map_err(invalid)?;
        state.teams.insert(team_id, updated);
        Ok(())
    }

    async fn remove_member(&self, team_id: TeamId, user_id: UserId) -> Result<(), ApiError> {
        let mut state = self.lock()?;
        let team = state.teams.get(&team_id).ok_or(ApiError::NotFound)?;
        if !team.members().iter().any(|m| m.user_id == user_id) {
            return Err(ApiError::NotFound);
        }
        let members = team
            .members()
            .iter()
            .filter(|m| m.user_id != user_id)
            .cloned()
            .collect();
        let updated = Team::new(
            team.id(),
            team.name(),
            team.supervisor_id(),
            members,
            team.created_at(),
        )
        .map_err(invalid)?;
        state.teams.insert(team_id, updated);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use training_core::model::AccountStatus;
    use training_core::time::{fixed_clock, fixed_now};

    fn identity(id: u64, role: Role) -> Identity {
        Identity::new(
            UserId::new(id),
            format!("user{id}"),
            "Test",
            format!("User{id}"),
            None,
            role,
            AccountStatus::Active,
            fixed_now(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn login_checks_password() {
        let gateway = InMemoryGateway::new();
        gateway.register_account("mgarcia", "secret", identity(3, Role::Client));

        let response = gateway.login("mgarcia", "secret").await.unwrap();
        assert_eq!(response.user_id, 3);
        assert_eq!(response.token.as_deref(), Some("token-3"));

        assert!(gateway.login("mgarcia", "wrong").await.is_err());
    }

    #[tokio::test]
    async fn create_assignment_rejects_duplicates() {
        let gateway = InMemoryGateway::new();
        let new = NewAssignment::new(UserId::new(1), TrainingId::new(2), None);
        gateway.create_assignment(&new).await.unwrap();
        let err = gateway.create_assignment(&new).await.unwrap_err();
        assert!(matches!(err, ApiError::Rejected { status: 400, .. }));
    }

    #[tokio::test]
    async fn scripted_failure_rejects_one_user_only() {
        let gateway = InMemoryGateway::new();
        gateway.reject_assignments_for(UserId::new(9));

        let ok = NewAssignment::new(UserId::new(1), TrainingId::new(2), None);
        let bad = NewAssignment::new(UserId::new(9), TrainingId::new(2), None);
        assert!(gateway.create_assignment(&ok).await.is_ok());
        assert!(gateway.create_assignment(&bad).await.is_err());
    }

    #[tokio::test]
    async fn progress_upsert_toggles_in_place() {
        let gateway = InMemoryGateway::new();
        let assignment = AssignmentId::new(1);
        let tech = TechnologyId::new(5);

        gateway
            .upsert_technology_progress(assignment, tech, true)
            .await
            .unwrap();
        gateway
            .upsert_technology_progress(assignment, tech, false)
            .await
            .unwrap();

        let rows = gateway.technology_progress(assignment).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert!(!rows[0].completed);
    }

    #[tokio::test]
    async fn team_roster_updates() {
        let gateway = InMemoryGateway::new();
        gateway.seed_identity(identity(4, Role::Client));
        gateway.seed_team(
            Team::new(
                TeamId::new(1),
                "Backend Guild",
                UserId::new(2),
                Vec::new(),
                fixed_now(),
            )
            .unwrap(),
        );

        gateway
            .add_member(TeamId::new(1), UserId::new(4), MemberRole::Client)
            .await
            .unwrap();
        let members = gateway.team_members(TeamId::new(1)).await.unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].display_name, "Test User4");

        gateway
            .remove_member(TeamId::new(1), UserId::new(4))
            .await
            .unwrap();
        assert!(gateway.team_members(TeamId::new(1)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn created_rows_are_stamped_by_the_injected_clock() {
        let gateway = InMemoryGateway::with_clock(fixed_clock());

        let assignment = gateway
            .create_assignment(&NewAssignment::new(UserId::new(3), TrainingId::new(7), None))
            .await
            .unwrap();
        assert_eq!(assignment.assigned_at(), fixed_now());

        let created = gateway
            .create_user(&NewUser::new("mgarcia", "secret", "Maria", "Garcia", None, Role::Client))
            .await
            .unwrap();
        assert_eq!(created.created_at(), fixed_now());
    }
}
