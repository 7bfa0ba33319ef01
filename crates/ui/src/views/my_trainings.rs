use dioxus::prelude::*;
use training_core::model::AssignmentId;

use crate::app::use_session;
use crate::context::AppContext;
use crate::views::{ErrorPane, ViewError, ViewState, view_state_from_resource};
use crate::vm::{ChecklistItemVm, ChecklistTarget, map_assignment_card};

#[derive(Clone, Debug, PartialEq)]
struct CardData {
    vm: crate::vm::AssignmentCardVm,
    notice: Option<String>,
}

#[component]
pub fn MyTrainingsView() -> Element {
    let ctx = use_context::<AppContext>();
    let session = use_session();
    let mut action_error = use_signal(|| None::<ViewError>);

    let state = session();
    let Some(identity) = state.identity().cloned() else {
        return rsx! {};
    };
    let me = identity.id();

    let assignments = ctx.assignments();
    let progress = ctx.progress();
    let trainings = ctx.trainings();
    let resource = use_resource(move || {
        let assignments = assignments.clone();
        let progress = progress.clone();
        let trainings = trainings.clone();
        async move {
            let own = assignments.assignments_for_user(me).await?;
            let mut cards = Vec::new();
            for assignment in own {
                let training = trainings.get_training(assignment.training_id()).await?;
                let assignment_id = assignment.id();
                let checklists = progress.load_checklists(assignment).await?;
                let summary = checklists.summary();
                // One-time per assignment per run; the next reload clears it.
                let notice = progress.completion_notice(assignment_id, &summary);
                cards.push(CardData {
                    vm: map_assignment_card(training.name(), &checklists),
                    notice,
                });
            }
            Ok::<_, ViewError>(cards)
        }
    });

    let toggle = {
        let progress = ctx.progress();
        move |(assignment_id, target, checked): (AssignmentId, ChecklistTarget, bool)| {
            let progress = progress.clone();
            spawn(async move {
                let result = match target {
                    ChecklistTarget::Technology(id) => {
                        progress.set_technology(assignment_id, id, checked).await
                    }
                    ChecklistTarget::Material(id) => {
                        progress.set_material(assignment_id, me, id, checked).await
                    }
                    ChecklistTarget::InstructorLink(id) => {
                        progress
                            .set_instructor_link(assignment_id, me, id, checked)
                            .await
                    }
                };
                match result {
                    Ok(()) => {
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
        div { class: "page my-trainings-page",
            header { class: "view-header",
                h2 { class: "view-title", "My Trainings" }
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
                ViewState::Ready(cards) => rsx! {
                    if cards.is_empty() {
                        p { class: "empty-hint", "Nothing assigned yet." }
                    }
                    for card in cards {
                        div { class: "assignment-card",
                            header { class: "assignment-card-header",
                                h3 { class: "assignment-card-title", "{card.vm.training_name}" }
                                span { class: "status-chip", "{card.vm.status_label}" }
                                span { class: "assignment-date", "Assigned {card.vm.assigned_on}" }
                            }
                            div { class: "progress-bar",
                                div {
                                    class: "progress-fill",
                                    style: "width: {card.vm.percentage}%",
                                }
                            }
                            p { class: "progress-caption",
                                "{card.vm.percentage_label} ({card.vm.completed_label})"
                            }
                            if let Some(notice) = card.notice {
                                p { class: "completion-notice", "{notice}" }
                            }
                            if let Some(link) = card.vm.meeting_link.clone() {
                                a { class: "btn btn-secondary", href: "{link}", "Join meeting" }
                            }
                            ChecklistSection {
                                title: "Technologies",
                                items: card.vm.technologies.clone(),
                                on_toggle: {
                                    let toggle = toggle.clone();
                                    let assignment_id = card.vm.assignment_id;
                                    move |(target, checked)| toggle((assignment_id, target, checked))
                                },
                            }
                            ChecklistSection {
                                title: "Study materials",
                                items: card.vm.materials.clone(),
                                on_toggle: {
                                    let toggle = toggle.clone();
                                    let assignment_id = card.vm.assignment_id;
                                    move |(target, checked)| toggle((assignment_id, target, checked))
                                },
                            }
                            ChecklistSection {
                                title: "Instructor links",
                                items: card.vm.links.clone(),
                                on_toggle: {
                                    let toggle = toggle.clone();
                                    let assignment_id = card.vm.assignment_id;
                                    move |(target, checked)| toggle((assignment_id, target, checked))
                                },
                            }
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn ChecklistSection(
    title: &'static str,
    items: Vec<ChecklistItemVm>,
    on_toggle: EventHandler<(ChecklistTarget, bool)>,
) -> Element {
    if items.is_empty() {
        return rsx! {};
    }
    rsx! {
        section { class: "checklist-section",
            h4 { class: "checklist-title", "{title}" }
            ul { class: "checklist",
                for item in items {
                    li { class: "checklist-item",
                        label {
                            input {
                                r#type: "checkbox",
                                checked: item.checked,
                                onchange: {
                                    let target = item.target.clone();
                                    move |evt: FormEvent| on_toggle.call((target.clone(), evt.checked()))
                                },
                            }
                            span { class: "checklist-label", "{item.label}" }
                            if let Some(detail) = item.detail.clone() {
                                span { class: "checklist-detail", "{detail}" }
                            }
                        }
                    }
                }
            }
        }
    }
}
