use dioxus::prelude::*;
use training_core::model::AssignmentId;

use crate::app::use_session;
use crate::context::AppContext;
use crate::views::{ErrorPane, ViewError, ViewState, view_state_from_resource};

#[derive(Clone, Debug, PartialEq, Eq)]
struct ScheduleRow {
    assignment_id: AssignmentId,
    assigned_on: String,
    training_name: String,
    trainee_name: String,
    status_label: &'static str,
    meeting_link: Option<String>,
}

/// The instructor's schedule: every assignment they teach, oldest first,
/// with an inline editor for the meeting link.
#[component]
pub fn CalendarView() -> Element {
    let ctx = use_context::<AppContext>();
    let session = use_session();
    let mut editing = use_signal(|| None::<(AssignmentId, String)>);
    let mut action_error = use_signal(|| None::<ViewError>);

    let state = session();
    let Some(identity) = state.identity().cloned() else {
        return rsx! {};
    };
    let me = identity.id();

    let trainings_service = ctx.trainings();
    let assignments_service = ctx.assignments();
    let users_service = ctx.users();
    let resource = use_resource(move || {
        let trainings_service = trainings_service.clone();
        let assignments_service = assignments_service.clone();
        let users_service = users_service.clone();
        async move {
            let catalog = trainings_service.list_trainings().await?;
            let mut rows = Vec::new();
            for training in &catalog {
                let batch = assignments_service
                    .assignments_for_training(training.id())
                    .await?;
                for assignment in batch
                    .into_iter()
                    .filter(|a| a.instructor_id() == Some(me))
                {
                    let trainee = users_service.get_user(assignment.user_id()).await?;
                    rows.push((
                        assignment.assigned_at(),
                        ScheduleRow {
                            assignment_id: assignment.id(),
                            assigned_on: assignment.assigned_at().format("%Y-%m-%d").to_string(),
                            training_name: training.name().to_owned(),
                            trainee_name: trainee.display_name(),
                            status_label: assignment.status().label(),
                            meeting_link: assignment.meeting_link().map(str::to_owned),
                        },
                    ));
                }
            }
            rows.sort_by_key(|(assigned_at, _)| *assigned_at);
            Ok::<_, ViewError>(rows.into_iter().map(|(_, row)| row).collect::<Vec<_>>())
        }
    });

    let save_link = {
        let assignments_service = ctx.assignments();
        move |(assignment_id, link): (AssignmentId, String)| {
            let assignments_service = assignments_service.clone();
            spawn(async move {
                match assignments_service
                    .set_meeting_link(assignment_id, link.trim())
                    .await
                {
                    Ok(()) => {
                        editing.set(None);
                        let mut resource = resource;
                        resource.restart();
                    }
                    Err(err) => action_error.set(Some(err.into())),
                }
            });
        }
    };

    let state = view_state_from_resource(&resource);
    rsx! {
        div { class: "page calendar-page",
            header { class: "view-header",
                h2 { class: "view-title", "Calendar" }
            }
            if let Some(err) = action_error() {
                ErrorPane { error: err, on_retry: move |_| action_error.set(None) }
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
                        p { class: "empty-hint", "No assignments to teach yet." }
                    }
                    ul { class: "schedule-list",
                        for row in rows {
                            li { class: "schedule-row",
                                span { class: "schedule-date", "{row.assigned_on}" }
                                span { class: "schedule-training", "{row.training_name}" }
                                span { class: "schedule-trainee", "{row.trainee_name}" }
                                span { class: "status-chip", "{row.status_label}" }
                                if let Some((editing_id, draft)) = editing() {
                                    if editing_id == row.assignment_id {
                                        input {
                                            class: "field-input",
                                            r#type: "text",
                                            placeholder: "Meeting link",
                                            value: "{draft}",
                                            oninput: {
                                                let assignment_id = row.assignment_id;
                                                move |evt: FormEvent| {
                                                    editing.set(Some((assignment_id, evt.value())));
                                                }
                                            },
                                        }
                                        button {
                                            class: "btn btn-primary",
                                            r#type: "button",
                                            onclick: {
                                                let save_link = save_link.clone();
                                                let assignment_id = row.assignment_id;
                                                move |_| {
                                                    if let Some((id, draft)) = editing() {
                                                        if id == assignment_id {
                                                            save_link((id, draft));
                                                        }
                                                    }
                                                }
                                            },
                                            "Save"
                                        }
                                        button {
                                            class: "btn btn-secondary",
                                            r#type: "button",
                                            onclick: move |_| editing.set(None),
                                            "Cancel"
                                        }
                                    }
                                }
                                if editing().map(|(id, _)| id) != Some(row.assignment_id) {
                                    if let Some(link) = row.meeting_link.clone() {
                                        a { class: "schedule-link", href: "{link}", "Meeting" }
                                    }
                                    button {
                                        class: "btn btn-secondary",
                                        r#type: "button",
                                        onclick: {
                                            let assignment_id = row.assignment_id;
                                            let current = row.meeting_link.clone().unwrap_or_default();
                                            move |_| editing.set(Some((assignment_id, current.clone())))
                                        },
                                        "Set meeting link"
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
