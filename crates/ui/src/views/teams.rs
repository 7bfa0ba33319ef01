use dioxus::prelude::*;
use training_core::model::{TeamId, TrainingId};

use crate::context::AppContext;
use crate::views::{ErrorPane, ViewError, ViewState, view_state_from_resource};
use crate::vm::{TeamVm, map_team};

#[derive(Clone, Debug, PartialEq)]
struct TeamsData {
    teams: Vec<TeamVm>,
    trainings: Vec<(u64, String)>,
}

#[component]
pub fn TeamsView() -> Element {
    let ctx = use_context::<AppContext>();
    let mut selected_team = use_signal(|| None::<u64>);
    let mut selected_training = use_signal(|| None::<u64>);
    let mut banner = use_signal(|| None::<String>);
    let mut action_error = use_signal(|| None::<ViewError>);
    let mut busy = use_signal(|| false);

    let teams_service = ctx.teams();
    let trainings_service = ctx.trainings();
    let resource = use_resource(move || {
        let teams_service = teams_service.clone();
        let trainings_service = trainings_service.clone();
        async move {
            let teams = teams_service.list_teams().await?;
            let trainings = trainings_service.list_trainings().await?;
            Ok::<_, ViewError>(TeamsData {
                teams: teams.iter().map(map_team).collect(),
                trainings: trainings
                    .iter()
                    .map(|t| (t.id().value(), t.name().to_owned()))
                    .collect(),
            })
        }
    });

    let assign = {
        let teams_service = ctx.teams();
        let assignments = ctx.assignments();
        move |_| {
            if busy() {
                return;
            }
            let Some(team_id) = selected_team() else {
                banner.set(Some("Pick a team first.".into()));
                return;
            };
            let Some(training_id) = selected_training() else {
                banner.set(Some("Pick a training first.".into()));
                return;
            };
            let teams_service = teams_service.clone();
            let assignments = assignments.clone();
            spawn(async move {
                busy.set(true);
                let result = async {
                    // Default target set: every trainee on the team, minus
                    // those who already hold the training.
                    let targets = teams_service
                        .assignment_targets(TeamId::new(team_id))
                        .await?;
                    let unassigned = assignments
                        .filter_unassigned(TrainingId::new(training_id), &targets)
                        .await?;
                    if unassigned.is_empty() {
                        return Ok::<_, ViewError>(
                            "Everyone on the team already has this training.".to_owned(),
                        );
                    }
                    let outcome = assignments
                        .assign_training(TrainingId::new(training_id), &unassigned, None)
                        .await;
                    Ok(outcome.summary())
                }
                .await;
                match result {
                    Ok(message) => {
                        banner.set(Some(message));
                        let mut resource = resource;
                        resource.restart();
                    }
                    Err(err) => action_error.set(Some(err)),
                }
                busy.set(false);
            });
        }
    };

    let state = view_state_from_resource(&resource);
    rsx! {
        div { class: "page teams-page",
            header { class: "view-header",
                h2 { class: "view-title", "Teams" }
            }
            if let Some(err) = action_error() {
                ErrorPane { error: err, on_retry: move |_| action_error.set(None) }
            }
            if let Some(message) = banner() {
                p { class: "action-banner", "{message}" }
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
                    div { class: "assign-controls",
                        select {
                            onchange: move |evt| selected_team.set(evt.value().parse().ok()),
                            option { value: "", "Select a team..." }
                            for team in &data.teams {
                                option { value: "{team.id.value()}", "{team.name}" }
                            }
                        }
                        select {
                            onchange: move |evt| selected_training.set(evt.value().parse().ok()),
                            option { value: "", "Select a training..." }
                            for (id, name) in &data.trainings {
                                option { value: "{id}", "{name}" }
                            }
                        }
                        button {
                            class: "btn btn-primary",
                            r#type: "button",
                            disabled: busy(),
                            onclick: assign,
                            "Assign to team"
                        }
                    }
                    for team in data.teams {
                        div { class: "team-card",
                            header { class: "team-card-header",
                                h3 { "{team.name}" }
                                span { class: "team-meta",
                                    "{team.member_count_label}, {team.client_count} trainee(s)"
                                }
                            }
                            ul { class: "roster",
                                for member in team.members {
                                    li { class: "roster-row",
                                        span { class: "roster-name", "{member.display_name}" }
                                        span { class: "roster-role", "{member.role_label}" }
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
