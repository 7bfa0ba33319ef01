use dioxus::prelude::*;
use training_core::model::{ALL_ROLES, Role, UserId};

use crate::context::AppContext;
use crate::views::{ErrorPane, ViewError, ViewState, view_state_from_resource};
use crate::vm::map_user_rows;

#[component]
pub fn UsersView() -> Element {
    let ctx = use_context::<AppContext>();
    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut first_name = use_signal(String::new);
    let mut last_name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut role_id = use_signal(|| Role::Client.id());
    let mut form_error = use_signal(|| None::<String>);
    let mut action_error = use_signal(|| None::<ViewError>);
    let mut busy = use_signal(|| false);

    let users_service = ctx.users();
    let resource = use_resource(move || {
        let users_service = users_service.clone();
        async move {
            let users = users_service.list_all_users().await?;
            Ok::<_, ViewError>(map_user_rows(&users))
        }
    });

    let create = {
        let users_service = ctx.users();
        move |_| {
            if busy() {
                return;
            }
            let Ok(role) = Role::from_id(role_id()) else {
                form_error.set(Some("Pick a role.".into()));
                return;
            };
            let users_service = users_service.clone();
            spawn(async move {
                busy.set(true);
                let address = email().trim().to_owned();
                let result = users_service
                    .create_user(
                        &username(),
                        &password(),
                        &first_name(),
                        &last_name(),
                        (!address.is_empty()).then_some(address),
                        role,
                    )
                    .await;
                match result {
                    Ok(_) => {
                        username.set(String::new());
                        password.set(String::new());
                        first_name.set(String::new());
                        last_name.set(String::new());
                        email.set(String::new());
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

    let delete = {
        let users_service = ctx.users();
        move |user_id: UserId| {
            let users_service = users_service.clone();
            spawn(async move {
                match users_service.delete_user(user_id).await {
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
        div { class: "page users-page",
            header { class: "view-header",
                h2 { class: "view-title", "Users" }
            }
            if let Some(err) = action_error() {
                ErrorPane { error: err, on_retry: move |_| action_error.set(None) }
            }
            div { class: "create-user-form",
                h3 { "New account" }
                if let Some(message) = form_error() {
                    p { class: "error-banner", "{message}" }
                }
                input {
                    class: "field-input",
                    r#type: "text",
                    placeholder: "Username",
                    value: "{username()}",
                    oninput: move |evt| username.set(evt.value()),
                }
                input {
                    class: "field-input",
                    r#type: "password",
                    placeholder: "Password",
                    value: "{password()}",
                    oninput: move |evt| password.set(evt.value()),
                }
                input {
                    class: "field-input",
                    r#type: "text",
                    placeholder: "First name",
                    value: "{first_name()}",
                    oninput: move |evt| first_name.set(evt.value()),
                }
                input {
                    class: "field-input",
                    r#type: "text",
                    placeholder: "Last name",
                    value: "{last_name()}",
                    oninput: move |evt| last_name.set(evt.value()),
                }
                input {
                    class: "field-input",
                    r#type: "email",
                    placeholder: "Email (optional)",
                    value: "{email()}",
                    oninput: move |evt| email.set(evt.value()),
                }
                select {
                    onchange: move |evt| {
                        if let Ok(id) = evt.value().parse() {
                            role_id.set(id);
                        }
                    },
                    for role in ALL_ROLES {
                        option {
                            value: "{role.id()}",
                            selected: role.id() == role_id(),
                            "{role.display_name()}"
                        }
                    }
                }
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    disabled: busy(),
                    onclick: create,
                    "Create"
                }
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
                    table { class: "data-table",
                        thead {
                            tr {
                                th { "Username" }
                                th { "Name" }
                                th { "Role" }
                                th { "Email" }
                                th { "Status" }
                                th { "" }
                            }
                        }
                        tbody {
                            for row in rows {
                                tr { class: if row.is_active { "user-row" } else { "user-row user-row--inactive" },
                                    td { "{row.username}" }
                                    td { "{row.display_name}" }
                                    td { "{row.role_label}" }
                                    td { "{row.email}" }
                                    td { "{row.status_label}" }
                                    td {
                                        button {
                                            class: "btn btn-danger",
                                            r#type: "button",
                                            onclick: {
                                                let delete = delete.clone();
                                                let user_id = row.id;
                                                move |_| delete(user_id)
                                            },
                                            "Delete"
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
