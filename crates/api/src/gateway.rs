//! Gateway traits and the wire records they exchange.
//!
//! The backend is loose about several fields: roles arrive as small
//! integers, account states as one-letter strings, completion as 'Y'/'N',
//! assignment statuses in two languages. Every record here converts those
//! into the closed domain enums before anything else sees them; a value
//! outside the known sets is an [`ApiError::Serialization`], not data.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

use training_core::model::{
    AccountStatus, AssignmentId, AssignmentStatus, Identity, InstructorLink, LinkId,
    MaterialId, MaterialProgressRecord, MemberRole, ProgressId, ProgressTarget,
    RequiredTechnology, Role, StudyMaterial, Team, TeamId, TeamMember,
    TechnologyId, TechnologyProgressRecord, Training, TrainingAssignment, TrainingId, UserId,
};

use crate::error::ApiError;

fn invalid(err: impl fmt::Display) -> ApiError {
    ApiError::Serialization(err.to_string())
}

//
// ─── COMPLETION FLAG ───────────────────────────────────────────────────────────
//

/// The backend's 'Y'/'N' completion letter as a closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionFlag {
    Yes,
    No,
}

impl CompletionFlag {
    /// Parses the wire letter.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Serialization` for anything other than `Y` or `N`.
    pub fn parse(raw: &str) -> Result<Self, ApiError> {
        match raw.trim() {
            "Y" | "y" => Ok(CompletionFlag::Yes),
            "N" | "n" => Ok(CompletionFlag::No),
            other => Err(ApiError::Serialization(format!(
                "unknown completion flag {other:?}"
            ))),
        }
    }

    #[must_use]
    pub fn from_bool(completed: bool) -> Self {
        if completed {
            CompletionFlag::Yes
        } else {
            CompletionFlag::No
        }
    }

    #[must_use]
    pub fn as_bool(self) -> bool {
        matches!(self, CompletionFlag::Yes)
    }

    #[must_use]
    pub fn as_wire(self) -> &'static str {
        match self {
            CompletionFlag::Yes => "Y",
            CompletionFlag::No => "N",
        }
    }
}

//
// ─── WIRE RECORDS ──────────────────────────────────────────────────────────────
//

/// Response of `POST auth/login`.
///
/// `token` is optional on the wire; the session layer treats its absence as
/// a failed login rather than inventing one client-side.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
    pub user_id: u64,
}

impl LoginResponse {
    #[must_use]
    pub fn user_id(&self) -> UserId {
        UserId::new(self.user_id)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserRecord {
    pub id: u64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
    pub role_id: u64,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    /// Converts the record into a domain `Identity`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Serialization` for an unknown role id or status
    /// letter, or when the profile fields fail validation.
    pub fn into_identity(self) -> Result<Identity, ApiError> {
        let role = Role::from_id(self.role_id).map_err(invalid)?;
        let status = AccountStatus::parse(&self.status).map_err(invalid)?;
        Identity::new(
            UserId::new(self.id),
            self.username,
            self.first_name,
            self.last_name,
            self.email,
            role,
            status,
            self.created_at,
        )
        .map_err(invalid)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TechnologyRecord {
    pub technology_id: u64,
    pub name: String,
    #[serde(default)]
    pub level: Option<String>,
}

impl TechnologyRecord {
    #[must_use]
    pub fn into_technology(self) -> RequiredTechnology {
        RequiredTechnology {
            technology_id: TechnologyId::new(self.technology_id),
            name: self.name,
            level: self.level,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrainingRecord {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub technologies: Vec<TechnologyRecord>,
    pub created_at: DateTime<Utc>,
}

impl TrainingRecord {
    /// Converts the record into a domain `Training`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Serialization` if the name fails validation.
    pub fn into_training(self) -> Result<Training, ApiError> {
        let technologies = self
            .technologies
            .into_iter()
            .map(TechnologyRecord::into_technology)
            .collect();
        Training::new(
            TrainingId::new(self.id),
            self.name,
            self.description,
            technologies,
            self.created_at,
        )
        .map_err(invalid)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MaterialRecord {
    pub id: u64,
    pub training_id: u64,
    pub title: String,
    pub link: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl MaterialRecord {
    /// Converts the record into a domain `StudyMaterial`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Serialization` for a blank title or invalid link.
    pub fn into_material(self) -> Result<StudyMaterial, ApiError> {
        StudyMaterial::new(
            MaterialId::new(self.id),
            TrainingId::new(self.training_id),
            self.title,
            &self.link,
            self.description,
        )
        .map_err(invalid)
    }
}

/// One instructor-supplied link inside an assignment's `urls` array. The
/// wire carries no id; position in the array determines the derived
/// [`LinkId`].
#[derive(Debug, Clone, Deserialize)]
pub struct InstructorLinkRecord {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssignmentRecord {
    pub id: u64,
    pub user_id: u64,
    pub training_id: u64,
    #[serde(default)]
    pub instructor_id: Option<u64>,
    pub status: String,
    #[serde(default)]
    pub completion_percentage: u8,
    pub assigned_at: DateTime<Utc>,
    #[serde(default)]
    pub meeting_link: Option<String>,
    #[serde(default)]
    pub urls: Vec<InstructorLinkRecord>,
}

impl AssignmentRecord {
    /// Converts the record into a domain `TrainingAssignment`, deriving link
    /// ids from array positions.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Serialization` for an unknown status string, an
    /// out-of-range percentage, or an invalid instructor link.
    pub fn into_assignment(self) -> Result<TrainingAssignment, ApiError> {
        let id = AssignmentId::new(self.id);
        let status = AssignmentStatus::parse(&self.status).map_err(invalid)?;
        let links = self
            .urls
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                InstructorLink::new(id, index, record.title, &record.url, record.description)
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(invalid)?;

        TrainingAssignment::new(
            id,
            UserId::new(self.user_id),
            TrainingId::new(self.training_id),
            self.instructor_id.map(UserId::new),
            status,
            self.completion_percentage,
            self.assigned_at,
            self.meeting_link,
            links,
        )
        .map_err(invalid)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TechnologyProgressWire {
    pub id: u64,
    pub assignment_id: u64,
    pub technology_id: u64,
    pub completed: String,
}

impl TechnologyProgressWire {
    /// # Errors
    ///
    /// Returns `ApiError::Serialization` for a completion letter outside
    /// 'Y'/'N'.
    pub fn into_record(self) -> Result<TechnologyProgressRecord, ApiError> {
        Ok(TechnologyProgressRecord {
            id: ProgressId::new(self.id),
            assignment_id: AssignmentId::new(self.assignment_id),
            technology_id: TechnologyId::new(self.technology_id),
            completed: CompletionFlag::parse(&self.completed)?.as_bool(),
        })
    }
}

/// Material-or-link progress row. Exactly one of `material_id` / `url_id`
/// must be set; rows violating that are malformed, not half-valid.
#[derive(Debug, Clone, Deserialize)]
pub struct MaterialProgressWire {
    pub id: u64,
    pub assignment_id: u64,
    pub user_id: u64,
    #[serde(default)]
    pub material_id: Option<u64>,
    #[serde(default)]
    pub url_id: Option<String>,
    pub completed: String,
}

impl MaterialProgressWire {
    /// # Errors
    ///
    /// Returns `ApiError::Serialization` when the target is ambiguous or
    /// missing, or the completion letter is unknown.
    pub fn into_record(self) -> Result<MaterialProgressRecord, ApiError> {
        let target = match (self.material_id, self.url_id) {
            (Some(material), None) => ProgressTarget::Material(MaterialId::new(material)),
            (None, Some(url)) => ProgressTarget::InstructorLink(LinkId::from_wire(url)),
            _ => {
                return Err(ApiError::Serialization(
                    "progress row must reference exactly one of material_id or url_id".into(),
                ));
            }
        };
        Ok(MaterialProgressRecord {
            id: ProgressId::new(self.id),
            assignment_id: AssignmentId::new(self.assignment_id),
            user_id: UserId::new(self.user_id),
            target,
            completed: CompletionFlag::parse(&self.completed)?.as_bool(),
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TeamMemberRecord {
    pub user_id: u64,
    pub role: String,
    pub first_name: String,
    pub last_name: String,
}

impl TeamMemberRecord {
    /// # Errors
    ///
    /// Returns `ApiError::Serialization` for an unknown membership role.
    pub fn into_member(self) -> Result<TeamMember, ApiError> {
        let role = MemberRole::parse(&self.role).map_err(invalid)?;
        let display_name = [self.first_name.trim(), self.last_name.trim()]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ");
        Ok(TeamMember {
            user_id: UserId::new(self.user_id),
            role,
            display_name,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TeamRecord {
    pub id: u64,
    pub name: String,
    pub supervisor_id: u64,
    #[serde(default)]
    pub members: Vec<TeamMemberRecord>,
    pub created_at: DateTime<Utc>,
}

impl TeamRecord {
    /// # Errors
    ///
    /// Returns `ApiError::Serialization` for a blank team name or an
    /// unknown membership role.
    pub fn into_team(self) -> Result<Team, ApiError> {
        let members = self
            .members
            .into_iter()
            .map(TeamMemberRecord::into_member)
            .collect::<Result<Vec<_>, _>>()?;
        Team::new(
            TeamId::new(self.id),
            self.name,
            UserId::new(self.supervisor_id),
            members,
            self.created_at,
        )
        .map_err(invalid)
    }
}

//
// ─── REQUEST PAYLOADS ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub role_id: u64,
}

impl NewUser {
    #[must_use]
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: Option<String>,
        role: Role,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            email,
            role_id: role.id(),
        }
    }
}

fn serialize_status<S: Serializer>(
    status: &Option<AccountStatus>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match status {
        Some(status) => serializer.serialize_str(status.as_wire()),
        None => serializer.serialize_none(),
    }
}

/// Partial user update; unset fields stay untouched server-side.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_status"
    )]
    pub status: Option<AccountStatus>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewAssignment {
    pub user_id: u64,
    pub training_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructor_id: Option<u64>,
}

impl NewAssignment {
    #[must_use]
    pub fn new(user_id: UserId, training_id: TrainingId, instructor_id: Option<UserId>) -> Self {
        Self {
            user_id: user_id.value(),
            training_id: training_id.value(),
            instructor_id: instructor_id.map(|id| id.value()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NewMaterial {
    pub training_id: u64,
    pub title: String,
    pub link: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl NewMaterial {
    #[must_use]
    pub fn new(
        training_id: TrainingId,
        title: impl Into<String>,
        link: impl Into<String>,
        description: Option<String>,
    ) -> Self {
        Self {
            training_id: training_id.value(),
            title: title.into(),
            link: link.into(),
            description,
        }
    }
}

//
// ─── GATEWAY TRAITS ────────────────────────────────────────────────────────────
//

/// Authentication endpoint.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Exchanges credentials for a token and the caller's user id.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Rejected` with the server's detail message for
    /// bad credentials, or transport errors.
    async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError>;
}

/// User administration endpoints.
#[async_trait]
pub trait UserGateway: Send + Sync {
    /// Pages through all user accounts.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or a malformed record.
    async fn list_users(&self, skip: usize, limit: usize) -> Result<Vec<Identity>, ApiError>;

    /// Fetches one user by id.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if missing.
    async fn get_user(&self, id: UserId) -> Result<Identity, ApiError>;

    /// Creates an account.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Rejected` if the server refuses (duplicate
    /// username, say).
    async fn create_user(&self, new_user: &NewUser) -> Result<Identity, ApiError>;

    /// Applies a partial profile update.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if missing, or other api errors.
    async fn update_user(&self, id: UserId, update: &UserUpdate) -> Result<Identity, ApiError>;

    /// Deletes an account.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if missing, or other api errors.
    async fn delete_user(&self, id: UserId) -> Result<(), ApiError>;

    /// Sets a new password for an account.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on rejection or transport failure.
    async fn change_password(&self, id: UserId, new_password: &str) -> Result<(), ApiError>;
}

/// Training catalog endpoints.
#[async_trait]
pub trait TrainingGateway: Send + Sync {
    /// Lists the full training catalog.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or a malformed record.
    async fn list_trainings(&self) -> Result<Vec<Training>, ApiError>;

    /// Fetches one training by id.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if missing.
    async fn get_training(&self, id: TrainingId) -> Result<Training, ApiError>;

    /// Lists the technologies a training requires.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure.
    async fn list_technologies(
        &self,
        id: TrainingId,
    ) -> Result<Vec<RequiredTechnology>, ApiError>;

    /// Lists the study materials attached to a training.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or a malformed record.
    async fn list_materials(&self, id: TrainingId) -> Result<Vec<StudyMaterial>, ApiError>;

    /// Attaches a study material to a training.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Rejected` with the server's detail on refusal.
    async fn create_material(&self, new_material: &NewMaterial)
    -> Result<StudyMaterial, ApiError>;
}

/// Assignment endpoints.
#[async_trait]
pub trait AssignmentGateway: Send + Sync {
    /// Lists a trainee's assignments.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or a malformed record.
    async fn assignments_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<TrainingAssignment>, ApiError>;

    /// Lists every assignment of one training, across trainees.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or a malformed record.
    async fn assignments_for_training(
        &self,
        training_id: TrainingId,
    ) -> Result<Vec<TrainingAssignment>, ApiError>;

    /// Creates one assignment. Bulk actions issue one call per trainee; the
    /// server rejects duplicates with a detail message.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Rejected` on refusal (duplicate assignment, say).
    async fn create_assignment(
        &self,
        new_assignment: &NewAssignment,
    ) -> Result<TrainingAssignment, ApiError>;

    /// Sets the meeting link on one assignment.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if missing, or other api errors.
    async fn update_meeting_link(&self, id: AssignmentId, link: &str) -> Result<(), ApiError>;

    /// Reassigns the instructor across all of a training's assignments.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on rejection or transport failure.
    async fn update_instructor(
        &self,
        training_id: TrainingId,
        instructor_id: UserId,
    ) -> Result<(), ApiError>;
}

/// Checklist progress endpoints.
#[async_trait]
pub trait ProgressGateway: Send + Sync {
    /// Technology checklist rows for one assignment.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or a malformed row.
    async fn technology_progress(
        &self,
        assignment_id: AssignmentId,
    ) -> Result<Vec<TechnologyProgressRecord>, ApiError>;

    /// Material and instructor-link checklist rows for one assignment.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or a malformed row.
    async fn material_progress(
        &self,
        assignment_id: AssignmentId,
    ) -> Result<Vec<MaterialProgressRecord>, ApiError>;

    /// Writes one technology checklist entry. Idempotent upsert; never
    /// touches the assignment's stored status or percentage.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on rejection or transport failure.
    async fn upsert_technology_progress(
        &self,
        assignment_id: AssignmentId,
        technology_id: TechnologyId,
        completed: bool,
    ) -> Result<(), ApiError>;

    /// Writes one material or instructor-link checklist entry. Idempotent
    /// upsert.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on rejection or transport failure.
    async fn upsert_material_progress(
        &self,
        assignment_id: AssignmentId,
        user_id: UserId,
        target: &ProgressTarget,
        completed: bool,
    ) -> Result<(), ApiError>;
}

/// Team endpoints.
#[async_trait]
pub trait TeamGateway: Send + Sync {
    /// Lists all teams.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or a malformed record.
    async fn list_teams(&self) -> Result<Vec<Team>, ApiError>;

    /// Lists one team's roster.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if the team is missing.
    async fn team_members(&self, team_id: TeamId) -> Result<Vec<TeamMember>, ApiError>;

    /// Adds a member to a team.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Rejected` on refusal (already a member, say).
    async fn add_member(
        &self,
        team_id: TeamId,
        user_id: UserId,
        role: MemberRole,
    ) -> Result<(), ApiError>;

    /// Removes a member from a team.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if the membership is missing.
    async fn remove_member(&self, team_id: TeamId, user_id: UserId) -> Result<(), ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_record(role_id: u64, status: &str) -> UserRecord {
        UserRecord {
            id: 7,
            username: "mgarcia".into(),
            first_name: "Maria".into(),
            last_name: "Garcia".into(),
            email: Some("m.garcia@example.com".into()),
            role_id,
            status: status.into(),
            created_at: training_core::time::fixed_now(),
        }
    }

    #[test]
    fn user_record_maps_role_and_status() {
        let identity = user_record(3, "A").into_identity().unwrap();
        assert_eq!(identity.role(), Role::Client);
        assert!(identity.status().is_active());
    }

    #[test]
    fn user_record_rejects_unknown_role_id() {
        let err = user_record(42, "A").into_identity().unwrap_err();
        assert!(matches!(err, ApiError::Serialization(_)));
    }

    #[test]
    fn user_record_rejects_unknown_status_letter() {
        let err = user_record(3, "X").into_identity().unwrap_err();
        assert!(matches!(err, ApiError::Serialization(_)));
    }

    #[test]
    fn completion_flag_round_trips() {
        assert!(CompletionFlag::parse("Y").unwrap().as_bool());
        assert!(!CompletionFlag::parse("n").unwrap().as_bool());
        assert!(CompletionFlag::parse("maybe").is_err());
        assert_eq!(CompletionFlag::from_bool(true).as_wire(), "Y");
    }

    #[test]
    fn assignment_record_derives_link_ids_from_positions() {
        let record = AssignmentRecord {
            id: 12,
            user_id: 1,
            training_id: 2,
            instructor_id: Some(3),
            status: "en_progreso".into(),
            completion_percentage: 40,
            assigned_at: training_core::time::fixed_now(),
            meeting_link: None,
            urls: vec![
                InstructorLinkRecord {
                    title: "Kickoff recording".into(),
                    url: "https://meet.example.com/rec/1".into(),
                    description: None,
                },
                InstructorLinkRecord {
                    title: "Slides".into(),
                    url: "docs.example.com/slides".into(),
                    description: None,
                },
            ],
        };
        let assignment = record.into_assignment().unwrap();
        assert_eq!(assignment.status(), AssignmentStatus::InProgress);
        assert_eq!(assignment.instructor_links()[0].id().as_str(), "12_url_0");
        assert_eq!(assignment.instructor_links()[1].id().as_str(), "12_url_1");
    }

    #[test]
    fn material_progress_requires_exactly_one_target() {
        let both = MaterialProgressWire {
            id: 1,
            assignment_id: 1,
            user_id: 1,
            material_id: Some(5),
            url_id: Some("1_url_0".into()),
            completed: "Y".into(),
        };
        assert!(both.into_record().is_err());

        let neither = MaterialProgressWire {
            id: 1,
            assignment_id: 1,
            user_id: 1,
            material_id: None,
            url_id: None,
            completed: "Y".into(),
        };
        assert!(neither.into_record().is_err());

        let link = MaterialProgressWire {
            id: 1,
            assignment_id: 1,
            user_id: 1,
            material_id: None,
            url_id: Some("1_url_0".into()),
            completed: "Y".into(),
        };
        let record = link.into_record().unwrap();
        assert_eq!(record.link_id().map(LinkId::as_str), Some("1_url_0"));
        assert!(record.completed);
    }

    #[test]
    fn team_member_display_name_tolerates_missing_part() {
        let member = TeamMemberRecord {
            user_id: 4,
            role: "Client".into(),
            first_name: "Ana".into(),
            last_name: "".into(),
        }
        .into_member()
        .unwrap();
        assert_eq!(member.display_name, "Ana");
        assert_eq!(member.role, MemberRole::Client);
    }

    #[test]
    fn user_update_skips_unset_fields() {
        let update = UserUpdate {
            first_name: Some("Ana".into()),
            status: Some(AccountStatus::Inactive),
            ..UserUpdate::default()
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json["first_name"], "Ana");
        assert_eq!(json["status"], "I");
        assert!(json.get("last_name").is_none());
    }
}
