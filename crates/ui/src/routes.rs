use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable, use_navigator, use_route};
use training_core::access::{RouteId, is_allowed, landing_route};
use training_core::model::Role;

use crate::app::use_session;
use crate::context::AppContext;
use crate::nav::menu_for;
use crate::views::{
    AssignmentsView, CalendarView, DashboardView, LoginView, MaterialsView, MyTrainingsView,
    ReportsView, SettingsView, TeamsView, UsersView,
};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[route("/login", LoginView)] Login {},
    #[layout(Layout)]
        #[route("/", DashboardView)] Dashboard {},
        #[route("/users", UsersView)] Users {},
        #[route("/assignments", AssignmentsView)] Assignments {},
        #[route("/teams", TeamsView)] Teams {},
        #[route("/my-trainings", MyTrainingsView)] MyTrainings {},
        #[route("/calendar", CalendarView)] Calendar {},
        #[route("/materials", MaterialsView)] Materials {},
        #[route("/reports", ReportsView)] Reports {},
        #[route("/settings", SettingsView)] Settings {},
}

impl Route {
    /// The screen behind a protected route; `None` for the login route.
    #[must_use]
    pub fn route_id(&self) -> Option<RouteId> {
        match self {
            Route::Login {} => None,
            Route::Dashboard {} => Some(RouteId::Dashboard),
            Route::Users {} => Some(RouteId::Users),
            Route::Assignments {} => Some(RouteId::Assignments),
            Route::Teams {} => Some(RouteId::Teams),
            Route::MyTrainings {} => Some(RouteId::MyTrainings),
            Route::Calendar {} => Some(RouteId::Calendar),
            Route::Materials {} => Some(RouteId::Materials),
            Route::Reports {} => Some(RouteId::Reports),
            Route::Settings {} => Some(RouteId::Settings),
        }
    }

    /// The router route for a screen id.
    #[must_use]
    pub fn for_route_id(id: RouteId) -> Self {
        match id {
            RouteId::Dashboard => Route::Dashboard {},
            RouteId::Users => Route::Users {},
            RouteId::Assignments => Route::Assignments {},
            RouteId::Teams => Route::Teams {},
            RouteId::MyTrainings => Route::MyTrainings {},
            RouteId::Calendar => Route::Calendar {},
            RouteId::Materials => Route::Materials {},
            RouteId::Reports => Route::Reports {},
            RouteId::Settings => Route::Settings {},
        }
    }

    /// Where a freshly signed-in role starts.
    #[must_use]
    pub fn landing_for(role: Role) -> Self {
        Self::for_route_id(landing_route(role))
    }
}

/// Wraps every protected route: authentication guard, sidebar, identity
/// header. Anonymous visitors are sent to login with no return path; an
/// authenticated visitor on a route outside their role's access list is
/// sent to their landing route.
#[component]
fn Layout() -> Element {
    let ctx = use_context::<AppContext>();
    let session = use_session();
    let navigator = use_navigator();
    let route = use_route::<Route>();

    let state = session();
    let Some(current) = state.session().cloned() else {
        let _ = navigator.replace(Route::Login {});
        return rsx! {};
    };
    let role = current.role();
    if let Some(route_id) = route.route_id() {
        if !is_allowed(role, route_id) {
            let _ = navigator.replace(Route::landing_for(role));
            return rsx! {};
        }
    }

    let display_name = current.identity().display_name();
    let entries = menu_for(role);

    rsx! {
        div { class: "app",
            nav { class: "sidebar",
                h1 { "Training" }
                ul {
                    for entry in entries {
                        li {
                            Link { to: entry.target.clone(), "{entry.label}" }
                        }
                    }
                }
            }
            main { class: "content",
                header { class: "identity-bar",
                    span { class: "identity-name", "{display_name}" }
                    span { class: "identity-role", "{role.display_name()}" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| {
                            ctx.session().logout();
                            let _ = navigator.replace(Route::Login {});
                        },
                        "Log out"
                    }
                }
                Outlet::<Route> {}
            }
        }
    }
}
