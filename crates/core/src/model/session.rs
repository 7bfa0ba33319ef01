use serde::{Deserialize, Serialize};

use crate::model::identity::Identity;
use crate::model::role::Role;

/// The client-held proof of authentication: a bearer token plus the cached
/// identity it belongs to. Persisted across reloads by the session vault.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    token: String,
    identity: Identity,
}

impl Session {
    #[must_use]
    pub fn new(token: String, identity: Identity) -> Self {
        Self { token, identity }
    }

    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    #[must_use]
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.identity.role()
    }

    /// Replaces the cached identity, keeping the token.
    #[must_use]
    pub fn with_identity(self, identity: Identity) -> Self {
        Self {
            token: self.token,
            identity,
        }
    }
}

/// Authentication state as the rest of the app sees it.
///
/// There is no partially-populated variant on purpose: either both token and
/// identity are present, or neither is.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Anonymous,
    Authenticated(Session),
}

impl SessionState {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }

    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        match self {
            SessionState::Anonymous => None,
            SessionState::Authenticated(session) => Some(session),
        }
    }

    #[must_use]
    pub fn identity(&self) -> Option<&Identity> {
        self.session().map(Session::identity)
    }

    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.session().map(Session::role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ids::UserId;
    use crate::model::role::AccountStatus;
    use crate::time::fixed_now;

    fn test_identity() -> Identity {
        Identity::new(
            UserId::new(9),
            "jlopez",
            "Juan",
            "Lopez",
            None,
            Role::Supervisor,
            AccountStatus::Active,
            fixed_now(),
        )
        .unwrap()
    }

    #[test]
    fn default_state_is_anonymous() {
        let state = SessionState::default();
        assert!(!state.is_authenticated());
        assert!(state.session().is_none());
        assert!(state.role().is_none());
    }

    #[test]
    fn authenticated_state_exposes_role() {
        let state =
            SessionState::Authenticated(Session::new("tok".into(), test_identity()));
        assert!(state.is_authenticated());
        assert_eq!(state.role(), Some(Role::Supervisor));
    }

    #[test]
    fn with_identity_keeps_token() {
        let session = Session::new("tok".into(), test_identity());
        let updated = session.with_identity(test_identity());
        assert_eq!(updated.token(), "tok");
    }
}
