use std::collections::HashSet;

use dioxus::prelude::*;
use training_core::model::{Role, TrainingId, UserId};

use crate::context::AppContext;
use crate::views::{ErrorPane, ViewError, ViewState, view_state_from_resource};

#[derive(Clone, Debug, PartialEq, Eq)]
struct CandidateRow {
    user_id: u64,
    display_name: String,
    already_assigned: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct AssignmentsData {
    trainings: Vec<(u64, String)>,
    instructors: Vec<(u64, String)>,
    candidates: Vec<CandidateRow>,
}

/// Bulk assignment management for admin and training-area roles: pick a
/// training, tick trainees, fan the creation out one request per trainee.
#[component]
pub fn AssignmentsView() -> Element {
    let ctx = use_context::<AppContext>();
    let mut selected_training = use_signal(|| None::<u64>);
    let mut selected_instructor = use_signal(|| None::<u64>);
    let mut picked = use_signal(HashSet::<u64>::new);
    let mut banner = use_signal(|| None::<String>);
    let mut busy = use_signal(|| false);

    let trainings_service = ctx.trainings();
    let users_service = ctx.users();
    let assignments_service = ctx.assignments();
    // Reading the selection inside makes the resource refetch per training.
    let resource = use_resource(move || {
        let trainings_service = trainings_service.clone();
        let users_service = users_service.clone();
        let assignments_service = assignments_service.clone();
        let training = selected_training();
        async move {
            let catalog = trainings_service.list_trainings().await?;
            let users = users_service.list_all_users().await?;

            let instructors = users
                .iter()
                .filter(|u| u.role() == Role::Instructor)
                .map(|u| (u.id().value(), u.display_name()))
                .collect();

            let candidates = if let Some(training_id) = training {
                let existing = assignments_service
                    .assignments_for_training(TrainingId::new(training_id))
                    .await?;
                users
                    .iter()
                    .filter(|u| u.role() == Role::Client && u.status().is_active())
                    .map(|u| CandidateRow {
                        user_id: u.id().value(),
                        display_name: u.display_name(),
                        already_assigned: existing.iter().any(|a| a.user_id() == u.id()),
                    })
                    .collect()
            } else {
                Vec::new()
            };

            Ok::<_, ViewError>(AssignmentsData {
                trainings: catalog
                    .iter()
                    .map(|t| (t.id().value(), t.name().to_owned()))
                    .collect(),
                instructors,
                candidates,
            })
        }
    });

    let assign = {
        let assignments_service = ctx.assignments();
        move |_| {
            if busy() {
                return;
            }
            let Some(training_id) = selected_training() else {
                banner.set(Some("Pick a training first.".into()));
                return;
            };
            let targets: Vec<UserId> = picked().iter().copied().map(UserId::new).collect();
            if targets.is_empty() {
                banner.set(Some("Tick at least one trainee.".into()));
                return;
            }
            let instructor = selected_instructor().map(UserId::new);
            let assignments_service = assignments_service.clone();
            spawn(async move {
                busy.set(true);
                let outcome = assignments_service
                    .assign_training(TrainingId::new(training_id), &targets, instructor)
                    .await;
                banner.set(Some(outcome.summary()));
                picked.set(HashSet::new());
                let mut resource = resource;
                resource.restart();
                busy.set(false);
            });
        }
    };

    let state = view_state_from_resource(&resource);
    rsx! {
        div { class: "page assignments-page",
            header { class: "view-header",
                h2 { class: "view-title", "Assignments" }
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
                            onchange: move |evt| {
                                selected_training.set(evt.value().parse().ok());
                                picked.set(HashSet::new());
                            },
                            option { value: "", "Select a training..." }
                            for (id, name) in &data.trainings {
                                option { value: "{id}", "{name}" }
                            }
                        }
                        select {
                            onchange: move |evt| selected_instructor.set(evt.value().parse().ok()),
                            option { value: "", "No instructor" }
                            for (id, name) in &data.instructors {
                                option { value: "{id}", "{name}" }
                            }
                        }
                        button {
                            class: "btn btn-primary",
                            r#type: "button",
                            disabled: busy(),
                            onclick: assign,
                            "Assign"
                        }
                    }
                    if selected_training().is_none() {
                        p { class: "empty-hint", "Pick a training to see trainees." }
                    }
                    ul { class: "candidate-list",
                        for candidate in data.candidates {
                            li { class: "candidate-row",
                                label {
                                    input {
                                        r#type: "checkbox",
                                        disabled: candidate.already_assigned,
                                        checked: picked().contains(&candidate.user_id)
                                            || candidate.already_assigned,
                                        onchange: {
                                            let user_id = candidate.user_id;
                                            move |evt: FormEvent| {
                                                let mut set = picked();
                                                if evt.checked() {
                                                    set.insert(user_id);
                                                } else {
                                                    set.remove(&user_id);
                                                }
                                                picked.set(set);
                                            }
                                        },
                                    }
                                    span { class: "candidate-name", "{candidate.display_name}" }
                                    if candidate.already_assigned {
                                        span { class: "candidate-note", "already assigned" }
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
