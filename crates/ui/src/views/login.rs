use dioxus::prelude::*;
use dioxus_router::use_navigator;

use crate::app::use_session;
use crate::context::AppContext;
use crate::routes::Route;

#[component]
pub fn LoginView() -> Element {
    let ctx = use_context::<AppContext>();
    let session = use_session();
    let navigator = use_navigator();
    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut busy = use_signal(|| false);

    // Already signed in: straight to the role's landing route.
    if let Some(role) = session().role() {
        let _ = navigator.replace(Route::landing_for(role));
        return rsx! {};
    }

    let store = ctx.session();
    let submit = move |_| {
        if busy() {
            return;
        }
        let user = username().trim().to_string();
        let pass = password();
        if user.is_empty() || pass.is_empty() {
            error.set(Some("Username and password are required.".into()));
            return;
        }
        let store = store.clone();
        spawn(async move {
            busy.set(true);
            match store.login(&user, &pass).await {
                Ok(session) => {
                    let _ = navigator.replace(Route::landing_for(session.role()));
                }
                Err(err) => error.set(Some(err.to_string())),
            }
            busy.set(false);
        });
    };

    rsx! {
        div { class: "page login-page",
            div { class: "login-card",
                h2 { class: "view-title", "Sign in" }
                if let Some(message) = error() {
                    p { class: "error-banner", "{message}" }
                }
                label { class: "field",
                    span { class: "field-label", "Username" }
                    input {
                        class: "field-input",
                        r#type: "text",
                        value: "{username()}",
                        oninput: move |evt| username.set(evt.value()),
                    }
                }
                label { class: "field",
                    span { class: "field-label", "Password" }
                    input {
                        class: "field-input",
                        r#type: "password",
                        value: "{password()}",
                        oninput: move |evt| password.set(evt.value()),
                    }
                }
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    disabled: busy(),
                    onclick: submit,
                    if busy() { "Signing in..." } else { "Sign in" }
                }
            }
        }
    }
}
