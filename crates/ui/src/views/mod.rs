mod assignments;
mod calendar;
mod dashboard;
mod login;
mod materials;
mod my_trainings;
mod reports;
mod settings;
mod state;
mod teams;
mod users;

pub use assignments::AssignmentsView;
pub use calendar::CalendarView;
pub use dashboard::DashboardView;
pub use login::LoginView;
pub use materials::MaterialsView;
pub use my_trainings::MyTrainingsView;
pub use reports::ReportsView;
pub use settings::SettingsView;
pub use state::{ErrorPane, ViewError, ViewState, view_state_from_resource};
pub use teams::TeamsView;
pub use users::UsersView;
