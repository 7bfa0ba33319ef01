mod assignment;
mod identity;
mod ids;
mod progress;
mod role;
mod session;
mod team;
mod training;

pub use ids::{
    AssignmentId, LinkId, MaterialId, ParseIdError, ProgressId, TeamId, TechnologyId, TrainingId,
    UserId,
};

pub use assignment::{AssignmentError, AssignmentStatus, TrainingAssignment, UnknownStatus};
pub use identity::{Identity, IdentityError};
pub use progress::{
    MaterialProgressRecord, ProgressSummary, ProgressTarget, TechnologyProgressRecord,
    aggregate_progress,
};
pub use role::{ALL_ROLES, AccountStatus, Role, UnknownAccountStatus, UnknownRole};
pub use session::{Session, SessionState};
pub use team::{MemberRole, Team, TeamError, TeamMember};
pub use training::{
    InstructorLink, RequiredTechnology, StudyMaterial, Training, TrainingError,
};
