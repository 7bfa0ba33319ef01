use dioxus::prelude::*;
use training_core::model::{Role, UserId};

use crate::app::use_session;
use crate::context::AppContext;
use crate::views::{ErrorPane, ViewError, ViewState, view_state_from_resource};
use crate::vm::{DashboardStatsVm, map_dashboard_stats};

/// Whose assignments feed the stat cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum StatScope {
    /// A trainee sees their own assignments.
    Trainee(UserId),
    /// An instructor sees the assignments they teach.
    Instructor(UserId),
    /// Admin roles see everything, with a per-training breakdown.
    Organization,
}

#[derive(Clone, Debug, PartialEq)]
struct TrainingStatsRow {
    name: String,
    stats: DashboardStatsVm,
}

#[derive(Clone, Debug, PartialEq)]
struct DashboardData {
    stats: DashboardStatsVm,
    rows: Vec<TrainingStatsRow>,
}

#[component]
pub fn DashboardView() -> Element {
    let ctx = use_context::<AppContext>();
    let session = use_session();

    let state = session();
    let Some(identity) = state.identity().cloned() else {
        return rsx! {};
    };
    let scope = match identity.role() {
        Role::Client => StatScope::Trainee(identity.id()),
        Role::Instructor => StatScope::Instructor(identity.id()),
        _ => StatScope::Organization,
    };

    let assignments = ctx.assignments();
    let trainings = ctx.trainings();
    let resource = use_resource(move || {
        let assignments = assignments.clone();
        let trainings = trainings.clone();
        async move {
            match scope {
                StatScope::Trainee(user_id) => {
                    let own = assignments.assignments_for_user(user_id).await?;
                    Ok::<_, ViewError>(DashboardData {
                        stats: map_dashboard_stats(&own),
                        rows: Vec::new(),
                    })
                }
                StatScope::Instructor(instructor_id) => {
                    let catalog = trainings.list_trainings().await?;
                    let mut taught = Vec::new();
                    for training in &catalog {
                        let batch = assignments.assignments_for_training(training.id()).await?;
                        taught.extend(
                            batch
                                .into_iter()
                                .filter(|a| a.instructor_id() == Some(instructor_id)),
                        );
                    }
                    Ok(DashboardData {
                        stats: map_dashboard_stats(&taught),
                        rows: Vec::new(),
                    })
                }
                StatScope::Organization => {
                    let catalog = trainings.list_trainings().await?;
                    let mut all = Vec::new();
                    let mut rows = Vec::new();
                    for training in &catalog {
                        let batch = assignments.assignments_for_training(training.id()).await?;
                        rows.push(TrainingStatsRow {
                            name: training.name().to_owned(),
                            stats: map_dashboard_stats(&batch),
                        });
                        all.extend(batch);
                    }
                    Ok(DashboardData {
                        stats: map_dashboard_stats(&all),
                        rows,
                    })
                }
            }
        }
    });

    let state = view_state_from_resource(&resource);
    rsx! {
        div { class: "page dashboard-page",
            header { class: "view-header",
                h2 { class: "view-title", "Dashboard" }
            }
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    ErrorPane {
                        error: err,
                        on_retry: move |_| {
                            let mut resource = resource;
                            resource.restart();
                        },
                    }
                },
                ViewState::Ready(data) => rsx! {
                    div { class: "stat-grid",
                        StatCard { label: "Total", value: data.stats.total }
                        StatCard { label: "Assigned", value: data.stats.assigned }
                        StatCard { label: "In progress", value: data.stats.in_progress }
                        StatCard { label: "Completed", value: data.stats.completed }
                    }
                    p { class: "stat-summary", "{data.stats.completion_label}" }
                    if !data.rows.is_empty() {
                        table { class: "data-table",
                            thead {
                                tr {
                                    th { "Training" }
                                    th { "Total" }
                                    th { "Completed" }
                                    th { "Completion" }
                                }
                            }
                            tbody {
                                for row in data.rows {
                                    tr {
                                        td { "{row.name}" }
                                        td { "{row.stats.total}" }
                                        td { "{row.stats.completed}" }
                                        td { "{row.stats.completion_label}" }
                                    }
                                }
                            }
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn StatCard(label: &'static str, value: usize) -> Element {
    rsx! {
        div { class: "stat-card",
            span { class: "stat-value", "{value}" }
            span { class: "stat-label", "{label}" }
        }
    }
}
