//! Shared error types for the services crate.

use thiserror::Error;

use training_api::{ApiError, VaultError};

/// Errors emitted by `SessionStore`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthError {
    /// The server refused the credentials; carries its message.
    #[error("{0}")]
    InvalidCredentials(String),

    /// The login response carried no token. Sessions are never fabricated
    /// client-side from credentials alone.
    #[error("server did not issue a session token")]
    MissingToken,

    #[error(transparent)]
    Api(ApiError),

    #[error(transparent)]
    Vault(#[from] VaultError),
}

/// Errors emitted by `UserService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum UserServiceError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors emitted by `TrainingService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TrainingServiceError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors emitted by `AssignmentService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AssignmentServiceError {
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors emitted by `ProgressService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressServiceError {
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors emitted by `TeamService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TeamServiceError {
    #[error(transparent)]
    Api(#[from] ApiError),
}

// A rejected bearer token can surface from any call; callers that need to
// force a re-login check for it uniformly.
macro_rules! impl_is_unauthorized {
    ($($err:ty),+ $(,)?) => {
        $(impl $err {
            /// True when the server rejected the bearer token.
            #[must_use]
            pub fn is_unauthorized(&self) -> bool {
                matches!(self, Self::Api(ApiError::Unauthorized))
            }
        })+
    };
}

impl_is_unauthorized!(
    AuthError,
    UserServiceError,
    TrainingServiceError,
    AssignmentServiceError,
    ProgressServiceError,
    TeamServiceError,
);
