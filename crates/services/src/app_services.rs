use std::sync::Arc;

use training_api::gateway::{
    AssignmentGateway, AuthGateway, ProgressGateway, TeamGateway, TrainingGateway, UserGateway,
};
use training_api::memory::InMemoryGateway;
use training_api::rest::{ApiClient, ApiConfig};
use training_api::vault::SessionVault;

use crate::assignment_service::AssignmentService;
use crate::progress_service::ProgressService;
use crate::session_store::{NoopTokenSink, SessionStore, TokenSink};
use crate::team_service::TeamService;
use crate::training_service::TrainingService;
use crate::user_service::UserService;

/// Assembles the app-facing services over one gateway set.
#[derive(Clone)]
pub struct AppServices {
    session: Arc<SessionStore>,
    assignments: Arc<AssignmentService>,
    progress: Arc<ProgressService>,
    trainings: Arc<TrainingService>,
    teams: Arc<TeamService>,
    users: Arc<UserService>,
}

impl AppServices {
    /// Build services backed by the REST api. One shared `ApiClient`
    /// carries the bearer token for every gateway.
    #[must_use]
    pub fn new_rest(config: ApiConfig, vault: Arc<dyn SessionVault>) -> Self {
        let client = ApiClient::new(config);
        let sink: Arc<dyn TokenSink> = Arc::new(client.clone());
        Self::assemble(
            Arc::new(client.clone()),
            Arc::new(client.clone()),
            Arc::new(client.clone()),
            Arc::new(client.clone()),
            Arc::new(client.clone()),
            Arc::new(client),
            vault,
            sink,
        )
    }

    /// Build services over the in-memory gateway, for tests and demos.
    #[must_use]
    pub fn with_gateway(gateway: InMemoryGateway, vault: Arc<dyn SessionVault>) -> Self {
        Self::assemble(
            Arc::new(gateway.clone()),
            Arc::new(gateway.clone()),
            Arc::new(gateway.clone()),
            Arc::new(gateway.clone()),
            Arc::new(gateway.clone()),
            Arc::new(gateway),
            vault,
            Arc::new(NoopTokenSink),
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn assemble(
        auth: Arc<dyn AuthGateway>,
        user_gateway: Arc<dyn UserGateway>,
        training_gateway: Arc<dyn TrainingGateway>,
        assignment_gateway: Arc<dyn AssignmentGateway>,
        progress_gateway: Arc<dyn ProgressGateway>,
        team_gateway: Arc<dyn TeamGateway>,
        vault: Arc<dyn SessionVault>,
        sink: Arc<dyn TokenSink>,
    ) -> Self {
        let session = Arc::new(SessionStore::new(
            auth,
            Arc::clone(&user_gateway),
            vault,
            sink,
        ));
        let assignments = Arc::new(AssignmentService::new(Arc::clone(&assignment_gateway)));
        let progress = Arc::new(ProgressService::new(
            Arc::clone(&training_gateway),
            progress_gateway,
        ));
        let trainings = Arc::new(TrainingService::new(training_gateway));
        let teams = Arc::new(TeamService::new(team_gateway));
        let users = Arc::new(UserService::new(user_gateway));

        Self {
            session,
            assignments,
            progress,
            trainings,
            teams,
            users,
        }
    }

    #[must_use]
    pub fn session(&self) -> Arc<SessionStore> {
        Arc::clone(&self.session)
    }

    #[must_use]
    pub fn assignments(&self) -> Arc<AssignmentService> {
        Arc::clone(&self.assignments)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn trainings(&self) -> Arc<TrainingService> {
        Arc::clone(&self.trainings)
    }

    #[must_use]
    pub fn teams(&self) -> Arc<TeamService> {
        Arc::clone(&self.teams)
    }

    #[must_use]
    pub fn users(&self) -> Arc<UserService> {
        Arc::clone(&self.users)
    }
}
