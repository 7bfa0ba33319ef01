use thiserror::Error;

use crate::model::{
    AssignmentError, IdentityError, TeamError, TrainingError, UnknownAccountStatus, UnknownRole,
    UnknownStatus,
};

/// Umbrella for domain validation failures, used where callers do not care
/// which entity rejected its input.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Identity(#[from] IdentityError),
    #[error(transparent)]
    Training(#[from] TrainingError),
    #[error(transparent)]
    Assignment(#[from] AssignmentError),
    #[error(transparent)]
    Team(#[from] TeamError),
    #[error(transparent)]
    Role(#[from] UnknownRole),
    #[error(transparent)]
    AccountStatus(#[from] UnknownAccountStatus),
    #[error(transparent)]
    Status(#[from] UnknownStatus),
}
