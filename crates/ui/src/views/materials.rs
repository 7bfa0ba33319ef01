use dioxus::prelude::*;
use training_core::model::{Role, TrainingId};

use crate::app::use_session;
use crate::context::AppContext;
use crate::views::{ErrorPane, ViewError, ViewState, view_state_from_resource};

#[derive(Clone, Debug, PartialEq, Eq)]
struct MaterialRow {
    title: String,
    link: String,
    description: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct TrainingMaterials {
    training_id: u64,
    training_name: String,
    materials: Vec<MaterialRow>,
}

#[component]
pub fn MaterialsView() -> Element {
    let ctx = use_context::<AppContext>();
    let session = use_session();
    let mut selected_training = use_signal(|| None::<u64>);
    let mut title = use_signal(String::new);
    let mut link = use_signal(String::new);
    let mut description = use_signal(String::new);
    let mut form_error = use_signal(|| None::<String>);
    let mut action_error = use_signal(|| None::<ViewError>);
    let mut busy = use_signal(|| false);

    let is_instructor = session().role() == Some(Role::Instructor);

    let trainings_service = ctx.trainings();
    let resource = use_resource(move || {
        let trainings_service = trainings_service.clone();
        async move {
            let catalog = trainings_service.list_trainings().await?;
            let mut groups = Vec::new();
            for training in &catalog {
                let materials = trainings_service.list_materials(training.id()).await?;
                groups.push(TrainingMaterials {
                    training_id: training.id().value(),
                    training_name: training.name().to_owned(),
                    materials: materials
                        .iter()
                        .map(|m| MaterialRow {
                            title: m.title().to_owned(),
                            link: m.link().to_string(),
                            description: m.description().map(str::to_owned),
                        })
                        .collect(),
                });
            }
            Ok::<_, ViewError>(groups)
        }
    });

    let add_material = {
        let trainings_service = ctx.trainings();
        move |_| {
            if busy() {
                return;
            }
            let Some(training_id) = selected_training() else {
                form_error.set(Some("Pick a training first.".into()));
                return;
            };
            let trainings_service = trainings_service.clone();
            spawn(async move {
                busy.set(true);
                let about = description().trim().to_owned();
                let result = trainings_service
                    .add_material(
                        TrainingId::new(training_id),
                        &title(),
                        &link(),
                        (!about.is_empty()).then_some(about),
                    )
                    .await;
                match result {
                    Ok(_) => {
                        title.set(String::new());
                        link.set(String::new());
                        description.set(String::new());
                        form_error.set(None);
                        let mut resource = resource;
                        resource.restart();
                    }
                    Err(err) => {
                        let err: ViewError = err.into();
                        if err == ViewError::Unauthorized {
                            action_error.set(Some(err));
                        } else {
                            form_error.set(Some(err.message().to_owned()));
                        }
                    }
                }
                busy.set(false);
            });
        }
    };

    let state = view_state_from_resource(&resource);
    rsx! {
        div { class: "page materials-page",
            header { class: "view-header",
                h2 { class: "view-title", "Materials" }
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
                ViewState::Ready(groups) => rsx! {
                    if is_instructor {
                        div { class: "add-material-form",
                            h3 { "Attach a material" }
                            if let Some(message) = form_error() {
                                p { class: "error-banner", "{message}" }
                            }
                            select {
                                onchange: move |evt| selected_training.set(evt.value().parse().ok()),
                                option { value: "", "Select a training..." }
                                for group in &groups {
                                    option { value: "{group.training_id}", "{group.training_name}" }
                                }
                            }
                            input {
                                class: "field-input",
                                r#type: "text",
                                placeholder: "Title",
                                value: "{title()}",
                                oninput: move |evt| title.set(evt.value()),
                            }
                            input {
                                class: "field-input",
                                r#type: "text",
                                placeholder: "Link",
                                value: "{link()}",
                                oninput: move |evt| link.set(evt.value()),
                            }
                            input {
                                class: "field-input",
                                r#type: "text",
                                placeholder: "Description (optional)",
                                value: "{description()}",
                                oninput: move |evt| description.set(evt.value()),
                            }
                            button {
                                class: "btn btn-primary",
                                r#type: "button",
                                disabled: busy(),
                                onclick: add_material,
                                "Add material"
                            }
                        }
                    }
                    for group in groups {
                        section { class: "material-group",
                            h3 { class: "material-group-title", "{group.training_name}" }
                            if group.materials.is_empty() {
                                p { class: "empty-hint", "No materials yet." }
                            }
                            ul { class: "material-list",
                                for material in group.materials {
                                    li { class: "material-row",
                                        a { href: "{material.link}", "{material.title}" }
                                        if let Some(about) = material.description {
                                            span { class: "material-description", "{about}" }
                                        }
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
