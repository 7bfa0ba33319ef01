use dioxus::prelude::*;
use dioxus_router::Router;
use training_core::model::SessionState;

use crate::context::AppContext;
use crate::routes::Route;

/// The session state as a reactive signal, provided at the root so the
/// guard and every view re-render when authentication changes.
#[derive(Clone, Copy)]
pub struct SessionSignal(pub(crate) Signal<SessionState>);

/// The current session signal from Dioxus context.
#[must_use]
pub fn use_session() -> Signal<SessionState> {
    use_context::<SessionSignal>().0
}

#[component]
pub fn App() -> Element {
    let ctx = use_context::<AppContext>();
    let mut session = use_signal(|| ctx.session().current());

    // Mirror the store's watch channel into the signal for the app's
    // lifetime. The receiver keeps the channel alive.
    let store = ctx.session();
    use_future(move || {
        let store = store.clone();
        async move {
            let mut rx = store.subscribe();
            loop {
                let state = rx.borrow_and_update().clone();
                session.set(state);
                if rx.changed().await.is_err() {
                    break;
                }
            }
        }
    });

    use_context_provider(|| SessionSignal(session));

    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }

        // Stable OS/window title. Per-route titles are rendered inside the right pane.
        document::Title { "Training" }

        // A single root container for global layout CSS hooks.
        div { class: "app-root",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    div { class: "fatal",
                        h1 { "Something went wrong" }
                        pre { "{errors:?}" }
                    }
                },
                Router::<Route> {}
            }
        }
    }
}
