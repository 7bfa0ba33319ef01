use std::sync::Arc;

use training_services::{
    AppServices, AssignmentService, ProgressService, SessionStore, TeamService, TrainingService,
    UserService,
};

/// Service handles the views pull out of Dioxus context.
///
/// A thin wrapper over [`AppServices`] so the composition root (the desktop
/// binary) decides which gateway set backs the UI.
#[derive(Clone)]
pub struct AppContext {
    services: AppServices,
}

impl AppContext {
    #[must_use]
    pub fn new(services: AppServices) -> Self {
        Self { services }
    }

    #[must_use]
    pub fn session(&self) -> Arc<SessionStore> {
        self.services.session()
    }

    #[must_use]
    pub fn assignments(&self) -> Arc<AssignmentService> {
        self.services.assignments()
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        self.services.progress()
    }

    #[must_use]
    pub fn trainings(&self) -> Arc<TrainingService> {
        self.services.trainings()
    }

    #[must_use]
    pub fn teams(&self) -> Arc<TeamService> {
        self.services.teams()
    }

    #[must_use]
    pub fn users(&self) -> Arc<UserService> {
        self.services.users()
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from the assembled services.
#[must_use]
pub fn build_app_context(services: AppServices) -> AppContext {
    AppContext::new(services)
}
