//! Sidebar menu derived from the shared access table.
//!
//! The menu never encodes its own role logic: it renders exactly
//! `visible_routes(role)`, so an entry can only appear if the router guard
//! would let the role through.

use training_core::access::{RouteId, visible_routes};
use training_core::model::Role;

use crate::routes::Route;

/// One sidebar entry.
#[derive(Debug, Clone, PartialEq)]
pub struct NavEntry {
    pub label: &'static str,
    pub target: Route,
}

/// Menu title for a screen.
#[must_use]
pub fn route_label(id: RouteId) -> &'static str {
    match id {
        RouteId::Dashboard => "Dashboard",
        RouteId::Users => "Users",
        RouteId::Assignments => "Assignments",
        RouteId::Teams => "Teams",
        RouteId::MyTrainings => "My Trainings",
        RouteId::Calendar => "Calendar",
        RouteId::Materials => "Materials",
        RouteId::Reports => "Reports",
        RouteId::Settings => "Settings",
    }
}

/// The sidebar for a role, in access-table order.
#[must_use]
pub fn menu_for(role: Role) -> Vec<NavEntry> {
    visible_routes(role)
        .into_iter()
        .map(|id| NavEntry {
            label: route_label(id),
            target: Route::for_route_id(id),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use training_core::access::{ALL_ROUTES, is_allowed};
    use training_core::model::ALL_ROLES;

    #[test]
    fn menu_entries_are_exactly_the_guarded_routes() {
        for role in ALL_ROLES {
            let menu = menu_for(role);
            for route_id in ALL_ROUTES {
                let in_menu = menu
                    .iter()
                    .any(|entry| entry.target.route_id() == Some(route_id));
                assert_eq!(
                    in_menu,
                    is_allowed(role, route_id),
                    "menu/guard disagree for {role:?} on {route_id:?}"
                );
            }
        }
    }

    #[test]
    fn labels_are_distinct() {
        let labels: std::collections::HashSet<_> =
            ALL_ROUTES.iter().map(|&id| route_label(id)).collect();
        assert_eq!(labels.len(), ALL_ROUTES.len());
    }

    #[test]
    fn trainee_menu_order_follows_the_table() {
        let menu = menu_for(Role::Client);
        let labels: Vec<_> = menu.iter().map(|entry| entry.label).collect();
        assert_eq!(labels, vec!["Dashboard", "My Trainings", "Materials"]);
    }
}
