use std::collections::HashSet;

use dioxus::prelude::*;
use training_core::model::ProgressSummary;

use crate::context::AppContext;
use crate::views::{ErrorPane, ViewError, ViewState, view_state_from_resource};

#[derive(Clone, Debug, PartialEq, Eq)]
struct TeamReportRow {
    team_name: String,
    trainees: usize,
    assignments: usize,
    completed: usize,
    completion_label: String,
}

/// Per-team completion overview. Counts come from the server-stored
/// assignment status.
#[component]
pub fn ReportsView() -> Element {
    let ctx = use_context::<AppContext>();

    let teams_service = ctx.teams();
    let trainings_service = ctx.trainings();
    let assignments_service = ctx.assignments();
    let resource = use_resource(move || {
        let teams_service = teams_service.clone();
        let trainings_service = trainings_service.clone();
        let assignments_service = assignments_service.clone();
        async move {
            let teams = teams_service.list_teams().await?;
            let catalog = trainings_service.list_trainings().await?;
            let mut all = Vec::new();
            for training in &catalog {
                all.extend(
                    assignments_service
                        .assignments_for_training(training.id())
                        .await?,
                );
            }

            let rows = teams
                .iter()
                .map(|team| {
                    let trainees: HashSet<_> = team.client_ids().into_iter().collect();
                    let held: Vec<_> = all
                        .iter()
                        .filter(|a| trainees.contains(&a.user_id()))
                        .collect();
                    let completed = held.iter().filter(|a| a.status().is_completed()).count();
                    let percentage =
                        ProgressSummary::from_counts(held.len(), completed).percentage();
                    TeamReportRow {
                        team_name: team.name().to_owned(),
                        trainees: trainees.len(),
                        assignments: held.len(),
                        completed,
                        completion_label: format!("{percentage}%"),
                    }
                })
                .collect::<Vec<_>>();
            Ok::<_, ViewError>(rows)
        }
    });

    let state = view_state_from_resource(&resource);
    rsx! {
        div { class: "page reports-page",
            header { class: "view-header",
                h2 { class: "view-title", "Reports" }
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
                ViewState::Ready(rows) => rsx! {
                    if rows.is_empty() {
                        p { class: "empty-hint", "No teams yet." }
                    } else {
                        table { class: "data-table",
                            thead {
                                tr {
                                    th { "Team" }
                                    th { "Trainees" }
                                    th { "Assignments" }
                                    th { "Completed" }
                                    th { "Completion" }
                                }
                            }
                            tbody {
                                for row in rows {
                                    tr {
                                        td { "{row.team_name}" }
                                        td { "{row.trainees}" }
                                        td { "{row.assignments}" }
                                        td { "{row.completed}" }
                                        td { "{row.completion_label}" }
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
