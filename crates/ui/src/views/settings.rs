use dioxus::prelude::*;
use training_services::UserUpdate;

use crate::app::use_session;
use crate::context::AppContext;
use crate::views::{ErrorPane, ViewError};

/// Profile and password maintenance for the signed-in account. A saved
/// profile edit re-persists the cached identity so a restart shows it.
#[component]
pub fn SettingsView() -> Element {
    let ctx = use_context::<AppContext>();
    let session = use_session();

    let current = session().identity().cloned();
    let mut first_name = use_signal(|| {
        current
            .as_ref()
            .map(|i| i.first_name().to_owned())
            .unwrap_or_default()
    });
    let mut last_name = use_signal(|| {
        current
            .as_ref()
            .map(|i| i.last_name().to_owned())
            .unwrap_or_default()
    });
    let mut email = use_signal(|| {
        current
            .as_ref()
            .and_then(|i| i.email().map(str::to_owned))
            .unwrap_or_default()
    });
    let mut new_password = use_signal(String::new);
    let mut confirm_password = use_signal(String::new);
    let mut banner = use_signal(|| None::<String>);
    let mut form_error = use_signal(|| None::<String>);
    let mut action_error = use_signal(|| None::<ViewError>);
    let mut busy = use_signal(|| false);

    let Some(identity) = current else {
        return rsx! {};
    };
    let me = identity.id();

    let save_profile = {
        let users_service = ctx.users();
        let store = ctx.session();
        move |_| {
            if busy() {
                return;
            }
            let first = first_name().trim().to_owned();
            let last = last_name().trim().to_owned();
            if first.is_empty() && last.is_empty() {
                form_error.set(Some("A name is required.".into()));
                return;
            }
            let users_service = users_service.clone();
            let store = store.clone();
            spawn(async move {
                busy.set(true);
                let address = email().trim().to_owned();
                let update = UserUpdate {
                    first_name: Some(first),
                    last_name: Some(last),
                    email: (!address.is_empty()).then_some(address),
                    status: None,
                };
                let result = async {
                    let updated = users_service
                        .update_user(me, &update)
                        .await
                        .map_err(ViewError::from)?;
                    store.update_identity(updated).map_err(ViewError::from)?;
                    Ok::<_, ViewError>(())
                }
                .await;
                match result {
                    Ok(()) => {
                        form_error.set(None);
                        banner.set(Some("Profile updated.".into()));
                    }
                    Err(err) => {
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

    let change_password = {
        let users_service = ctx.users();
        move |_| {
            if busy() {
                return;
            }
            let password = new_password();
            if password.is_empty() {
                form_error.set(Some("Enter a new password.".into()));
                return;
            }
            if password != confirm_password() {
                form_error.set(Some("Passwords do not match.".into()));
                return;
            }
            let users_service = users_service.clone();
            spawn(async move {
                busy.set(true);
                match users_service.change_password(me, &password).await {
                    Ok(()) => {
                        new_password.set(String::new());
                        confirm_password.set(String::new());
                        form_error.set(None);
                        banner.set(Some("Password changed.".into()));
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

    rsx! {
        div { class: "page settings-page",
            header { class: "view-header",
                h2 { class: "view-title", "Settings" }
            }
            if let Some(err) = action_error() {
                ErrorPane { error: err, on_retry: move |_| action_error.set(None) }
            }
            if let Some(message) = banner() {
                p { class: "action-banner", "{message}" }
            }
            if let Some(message) = form_error() {
                p { class: "error-banner", "{message}" }
            }
            section { class: "settings-section",
                h3 { "Profile" }
                p { class: "settings-hint", "Signed in as {identity.username()}" }
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
                    placeholder: "Email",
                    value: "{email()}",
                    oninput: move |evt| email.set(evt.value()),
                }
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    disabled: busy(),
                    onclick: save_profile,
                    "Save profile"
                }
            }
            section { class: "settings-section",
                h3 { "Password" }
                input {
                    class: "field-input",
                    r#type: "password",
                    placeholder: "New password",
                    value: "{new_password()}",
                    oninput: move |evt| new_password.set(evt.value()),
                }
                input {
                    class: "field-input",
                    r#type: "password",
                    placeholder: "Confirm password",
                    value: "{confirm_password()}",
                    oninput: move |evt| confirm_password.set(evt.value()),
                }
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    disabled: busy(),
                    onclick: change_password,
                    "Change password"
                }
            }
        }
    }
}
