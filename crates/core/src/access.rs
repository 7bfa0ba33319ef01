//! Single source of truth for role-based route access.
//!
//! Both the router guard and the navigation menu builder consume
//! [`ACCESS_TABLE`]; neither carries its own copy, so a menu item can never
//! link to a route the guard would reject.

use crate::model::Role;

/// Every navigable screen behind the authentication guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteId {
    Dashboard,
    Users,
    Assignments,
    Teams,
    MyTrainings,
    Calendar,
    Materials,
    Reports,
    Settings,
}

/// All protected routes, in menu order.
pub const ALL_ROUTES: [RouteId; 9] = [
    RouteId::Dashboard,
    RouteId::Users,
    RouteId::Assignments,
    RouteId::Teams,
    RouteId::MyTrainings,
    RouteId::Calendar,
    RouteId::Materials,
    RouteId::Reports,
    RouteId::Settings,
];

/// One row of the access table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteAccess {
    pub route: RouteId,
    pub allowed: &'static [Role],
}

/// The table. Order matters: the first entry's route is the deterministic
/// fallback landing for any role without an explicit mapping.
pub const ACCESS_TABLE: &[RouteAccess] = &[
    RouteAccess {
        route: RouteId::Dashboard,
        allowed: &[
            Role::SystemAdmin,
            Role::TrainingArea,
            Role::Client,
            Role::Instructor,
        ],
    },
    RouteAccess {
        route: RouteId::Users,
        allowed: &[Role::SystemAdmin],
    },
    RouteAccess {
        route: RouteId::Assignments,
        allowed: &[Role::SystemAdmin, Role::TrainingArea],
    },
    RouteAccess {
        route: RouteId::Teams,
        allowed: &[Role::SystemAdmin, Role::Supervisor],
    },
    RouteAccess {
        route: RouteId::MyTrainings,
        allowed: &[Role::Client],
    },
    RouteAccess {
        route: RouteId::Calendar,
        allowed: &[Role::Instructor],
    },
    RouteAccess {
        route: RouteId::Materials,
        allowed: &[Role::Instructor, Role::Client],
    },
    RouteAccess {
        route: RouteId::Reports,
        allowed: &[Role::SystemAdmin, Role::Supervisor, Role::ReportsAdmin],
    },
    RouteAccess {
        route: RouteId::Settings,
        allowed: &[Role::SystemAdmin],
    },
];

/// True when `role` may navigate to `route`.
#[must_use]
pub fn is_allowed(role: Role, route: RouteId) -> bool {
    ACCESS_TABLE
        .iter()
        .any(|entry| entry.route == route && entry.allowed.contains(&role))
}

/// The routes visible to `role`, in table order. The menu builder renders
/// exactly this list.
#[must_use]
pub fn visible_routes(role: Role) -> Vec<RouteId> {
    ACCESS_TABLE
        .iter()
        .filter(|entry| entry.allowed.contains(&role))
        .map(|entry| entry.route)
        .collect()
}

/// Where each role lands after login. Total over the known role set; any
/// future role value without a mapping falls back to the first table entry
/// rather than failing.
#[must_use]
pub fn landing_route(role: Role) -> RouteId {
    let mapped = match role {
        Role::SystemAdmin => Some(RouteId::Dashboard),
        Role::Supervisor => Some(RouteId::Teams),
        Role::Client => Some(RouteId::MyTrainings),
        Role::Instructor => Some(RouteId::Calendar),
        Role::TrainingArea => Some(RouteId::Assignments),
        Role::ReportsAdmin => Some(RouteId::Reports),
    };
    mapped.unwrap_or(ACCESS_TABLE[0].route)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ALL_ROLES;

    #[test]
    fn every_role_has_exactly_one_landing_route() {
        for role in ALL_ROLES {
            // Deterministic: calling twice yields the same route.
            assert_eq!(landing_route(role), landing_route(role));
        }
    }

    #[test]
    fn landing_route_is_always_allowed_for_its_role() {
        for role in ALL_ROLES {
            let landing = landing_route(role);
            assert!(
                is_allowed(role, landing),
                "{role:?} lands on {landing:?} but may not navigate there"
            );
        }
    }

    #[test]
    fn menu_visibility_matches_guard_for_all_roles_and_routes() {
        for role in ALL_ROLES {
            let visible = visible_routes(role);
            for route in ALL_ROUTES {
                assert_eq!(
                    visible.contains(&route),
                    is_allowed(role, route),
                    "menu/guard disagree for {role:?} on {route:?}"
                );
            }
        }
    }

    #[test]
    fn table_covers_every_route_exactly_once() {
        for route in ALL_ROUTES {
            let entries = ACCESS_TABLE.iter().filter(|e| e.route == route).count();
            assert_eq!(entries, 1, "{route:?} appears {entries} times");
        }
        assert_eq!(ACCESS_TABLE.len(), ALL_ROUTES.len());
    }

    #[test]
    fn expected_landings() {
        assert_eq!(landing_route(Role::SystemAdmin), RouteId::Dashboard);
        assert_eq!(landing_route(Role::Supervisor), RouteId::Teams);
        assert_eq!(landing_route(Role::Client), RouteId::MyTrainings);
        assert_eq!(landing_route(Role::Instructor), RouteId::Calendar);
        assert_eq!(landing_route(Role::TrainingArea), RouteId::Assignments);
        assert_eq!(landing_route(Role::ReportsAdmin), RouteId::Reports);
    }

    #[test]
    fn only_admins_see_user_management() {
        assert!(is_allowed(Role::SystemAdmin, RouteId::Users));
        for role in ALL_ROLES {
            if role != Role::SystemAdmin {
                assert!(!is_allowed(role, RouteId::Users));
            }
        }
    }
}
