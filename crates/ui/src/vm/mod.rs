mod assignment_vm;
mod dashboard_vm;
mod team_vm;
mod user_vm;

pub use assignment_vm::{
    AssignmentCardVm, ChecklistItemVm, ChecklistTarget, map_assignment_card,
};
pub use dashboard_vm::{DashboardStatsVm, map_dashboard_stats};
pub use team_vm::{MemberRowVm, TeamVm, map_team};
pub use user_vm::{UserRowVm, map_user_rows};
