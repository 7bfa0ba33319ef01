use dioxus::prelude::*;
use dioxus_router::use_navigator;
use training_services::{
    AssignmentServiceError, AuthError, ProgressServiceError, TeamServiceError,
    TrainingServiceError, UserServiceError,
};

use crate::context::AppContext;
use crate::routes::Route;

/// What a view shows when a fetch or mutation fails.
///
/// `Unauthorized` is special-cased: the bearer token was rejected, so the
/// only useful recovery is a fresh login.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewError {
    Unauthorized,
    Message(String),
}

impl ViewError {
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            ViewError::Unauthorized => "Your session has expired. Please sign in again.",
            ViewError::Message(text) => text,
        }
    }
}

macro_rules! impl_from_service_error {
    ($($err:ty),+ $(,)?) => {
        $(impl From<$err> for ViewError {
            fn from(err: $err) -> Self {
                if err.is_unauthorized() {
                    ViewError::Unauthorized
                } else {
                    ViewError::Message(err.to_string())
                }
            }
        })+
    };
}

impl_from_service_error!(
    AssignmentServiceError,
    AuthError,
    ProgressServiceError,
    TeamServiceError,
    TrainingServiceError,
    UserServiceError,
);

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: &Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(err.clone()),
            None => ViewState::Error(ViewError::Message("no data".into())),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}

/// Shared error rendering. A rejected token logs the session out and lands
/// on the login screen; anything else shows a banner with a retry.
#[component]
pub fn ErrorPane(error: ViewError, on_retry: EventHandler<()>) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();

    if error == ViewError::Unauthorized {
        ctx.session().logout();
        let _ = navigator.replace(Route::Login {});
        return rsx! {};
    }

    rsx! {
        div { class: "error-pane",
            p { class: "error-banner", "{error.message()}" }
            button {
                class: "btn btn-secondary",
                r#type: "button",
                onclick: move |_| on_retry.call(()),
                "Retry"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use training_api::ApiError;

    #[test]
    fn rejected_token_maps_to_unauthorized() {
        let err: ViewError = ProgressServiceError::from(ApiError::Unauthorized).into();
        assert_eq!(err, ViewError::Unauthorized);
    }

    #[test]
    fn other_failures_keep_their_message() {
        let err: ViewError = TrainingServiceError::Validation("material title is required".into())
            .into();
        assert_eq!(err.message(), "material title is required");
    }
}
