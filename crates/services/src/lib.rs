#![forbid(unsafe_code)]

pub mod app_services;
pub mod assignment_service;
pub mod error;
pub mod progress_service;
pub mod session_store;
pub mod team_service;
pub mod training_service;
pub mod user_service;

pub use training_api::gateway::UserUpdate;

pub use app_services::AppServices;
pub use assignment_service::{AssignmentService, FanOutOutcome};
pub use error::{
    AssignmentServiceError, AuthError, ProgressServiceError, TeamServiceError,
    TrainingServiceError, UserServiceError,
};
pub use progress_service::{AssignmentChecklists, CompletionNotifier, ProgressService};
pub use session_store::{NoopTokenSink, SessionStore, TokenSink};
pub use team_service::TeamService;
pub use training_service::TrainingService;
pub use user_service::UserService;
