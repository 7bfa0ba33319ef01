//! Authentication state: login, logout, startup rehydration.

use std::sync::Arc;

use tokio::sync::watch;

use training_api::error::ApiError;
use training_api::gateway::{AuthGateway, UserGateway};
use training_api::vault::SessionVault;
use training_core::model::{Identity, Session, SessionState};

use crate::error::AuthError;

/// Receives the bearer token whenever the session changes, so the HTTP
/// client authenticates subsequent requests without being rebuilt.
pub trait TokenSink: Send + Sync {
    fn set_token(&self, token: Option<String>);
}

impl TokenSink for training_api::ApiClient {
    fn set_token(&self, token: Option<String>) {
        training_api::ApiClient::set_token(self, token);
    }
}

/// Sink for setups without a shared HTTP client (tests, in-memory demos).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTokenSink;

impl TokenSink for NoopTokenSink {
    fn set_token(&self, _token: Option<String>) {}
}

/// Owns the session state and every transition into and out of it.
///
/// An explicit injected object rather than a global: views reach it through
/// the app context, tests construct their own. State changes are broadcast
/// over a `watch` channel; `subscribe` hands out receivers.
pub struct SessionStore {
    auth: Arc<dyn AuthGateway>,
    users: Arc<dyn UserGateway>,
    vault: Arc<dyn SessionVault>,
    tokens: Arc<dyn TokenSink>,
    state: watch::Sender<SessionState>,
}

impl SessionStore {
    #[must_use]
    pub fn new(
        auth: Arc<dyn AuthGateway>,
        users: Arc<dyn UserGateway>,
        vault: Arc<dyn SessionVault>,
        tokens: Arc<dyn TokenSink>,
    ) -> Self {
        let (state, _) = watch::channel(SessionState::Anonymous);
        Self {
            auth,
            users,
            vault,
            tokens,
            state,
        }
    }

    /// A receiver that observes every session-state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// The state as of now.
    #[must_use]
    pub fn current(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Rehydrates the session from the vault at startup. No network call:
    /// a stored token and identity are trusted until a request returns 401.
    /// A corrupted vault is treated as a full logout, never a half-session.
    pub fn load_session(&self) -> SessionState {
        match self.vault.load() {
            Ok(Some(session)) => {
                self.tokens.set_token(Some(session.token().to_owned()));
                let state = SessionState::Authenticated(session);
                self.state.send_replace(state.clone());
                state
            }
            Ok(None) => {
                self.state.send_replace(SessionState::Anonymous);
                SessionState::Anonymous
            }
            Err(err) => {
                tracing::warn!(error = %err, "session vault unreadable, discarding session");
                self.logout();
                SessionState::Anonymous
            }
        }
    }

    /// Exchanges credentials for a session: token from the auth endpoint,
    /// then the full identity, then one atomic vault write and a broadcast.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` when the server refuses the
    /// credentials, `AuthError::MissingToken` when it answers without a
    /// token, and `AuthError::Api`/`AuthError::Vault` for everything else.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, AuthError> {
        let response = self
            .auth
            .login(username, password)
            .await
            .map_err(login_error)?;
        let token = response.token.clone().ok_or(AuthError::MissingToken)?;

        self.tokens.set_token(Some(token.clone()));
        let identity = match self.users.get_user(response.user_id()).await {
            Ok(identity) => identity,
            Err(err) => {
                self.tokens.set_token(None);
                return Err(AuthError::Api(err));
            }
        };

        let session = Session::new(token, identity);
        self.vault.store(&session)?;
        self.state
            .send_replace(SessionState::Authenticated(session.clone()));
        tracing::info!(user = %session.identity().username(), "logged in");
        Ok(session)
    }

    /// Drops the token, clears the vault, broadcasts `Anonymous`.
    /// Idempotent; a vault that fails to clear is logged, not surfaced.
    pub fn logout(&self) {
        self.tokens.set_token(None);
        if let Err(err) = self.vault.clear() {
            tracing::warn!(error = %err, "failed to clear session vault");
        }
        self.state.send_replace(SessionState::Anonymous);
    }

    /// Replaces the cached identity after a profile edit, keeping the
    /// token, and re-persists the pair. No-op when anonymous.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Vault` if the updated session cannot be stored.
    pub fn update_identity(&self, identity: Identity) -> Result<(), AuthError> {
        let current = self.current();
        let Some(session) = current.session() else {
            return Ok(());
        };
        let updated = session.clone().with_identity(identity);
        self.vault.store(&updated)?;
        self.state
            .send_replace(SessionState::Authenticated(updated));
        Ok(())
    }
}

fn login_error(err: ApiError) -> AuthError {
    match err {
        ApiError::Unauthorized => {
            AuthError::InvalidCredentials("incorrect username or password".into())
        }
        ApiError::Rejected { detail, .. } => AuthError::InvalidCredentials(detail),
        other => AuthError::Api(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use training_api::{InMemoryGateway, InMemorySessionVault};
    use training_core::model::{AccountStatus, Role, UserId};
    use training_core::time::fixed_now;

    fn identity(id: u64) -> Identity {
        Identity::new(
            UserId::new(id),
            "mgarcia",
            "Maria",
            "Garcia",
            None,
            Role::Client,
            AccountStatus::Active,
            fixed_now(),
        )
        .unwrap()
    }

    fn store_with(
        gateway: &InMemoryGateway,
        vault: &Arc<InMemorySessionVault>,
    ) -> SessionStore {
        SessionStore::new(
            Arc::new(gateway.clone()),
            Arc::new(gateway.clone()),
            Arc::clone(vault) as Arc<dyn SessionVault>,
            Arc::new(NoopTokenSink),
        )
    }

    #[tokio::test]
    async fn login_persists_and_broadcasts() {
        let gateway = InMemoryGateway::new();
        gateway.register_account("mgarcia", "secret", identity(3));
        let vault = Arc::new(InMemorySessionVault::new());
        let store = store_with(&gateway, &vault);
        let mut receiver = store.subscribe();

        let session = store.login("mgarcia", "secret").await.unwrap();
        assert_eq!(session.token(), "token-3");
        assert_eq!(session.identity().id(), UserId::new(3));

        assert!(!vault.is_empty());
        receiver.changed().await.unwrap();
        assert!(receiver.borrow().is_authenticated());
    }

    #[tokio::test]
    async fn bad_credentials_surface_the_server_message() {
        let gateway = InMemoryGateway::new();
        gateway.register_account("mgarcia", "secret", identity(3));
        let vault = Arc::new(InMemorySessionVault::new());
        let store = store_with(&gateway, &vault);

        let err = store.login("mgarcia", "wrong").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials(_)));
        assert!(vault.is_empty());
        assert!(!store.current().is_authenticated());
    }

    #[tokio::test]
    async fn tokenless_login_response_is_rejected() {
        let gateway = InMemoryGateway::new();
        gateway.register_account("mgarcia", "secret", identity(3));
        gateway.withhold_token();
        let vault = Arc::new(InMemorySessionVault::new());
        let store = store_with(&gateway, &vault);

        let err = store.login("mgarcia", "secret").await.unwrap_err();
        assert!(matches!(err, AuthError::MissingToken));
        assert!(vault.is_empty());
        assert!(!store.current().is_authenticated());
    }

    #[tokio::test]
    async fn rehydrates_from_vault_without_network() {
        let vault = Arc::new(InMemorySessionVault::new());
        vault
            .store(&Session::new("tok-3".into(), identity(3)))
            .unwrap();
        // gateway has no accounts: any network call would fail
        let gateway = InMemoryGateway::new();
        let store = store_with(&gateway, &vault);

        let state = store.load_session();
        assert!(state.is_authenticated());
        assert_eq!(state.role(), Some(Role::Client));
    }

    #[tokio::test]
    async fn corrupted_vault_means_fully_logged_out() {
        let vault = Arc::new(InMemorySessionVault::new());
        vault.seed_raw("{ this is not json");
        let gateway = InMemoryGateway::new();
        let store = store_with(&gateway, &vault);

        let state = store.load_session();
        assert!(!state.is_authenticated());
        assert!(vault.is_empty());
    }

    #[tokio::test]
    async fn logout_clears_everything_and_is_idempotent() {
        let gateway = InMemoryGateway::new();
        gateway.register_account("mgarcia", "secret", identity(3));
        let vault = Arc::new(InMemorySessionVault::new());
        let store = store_with(&gateway, &vault);

        store.login("mgarcia", "secret").await.unwrap();
        store.logout();
        assert!(vault.is_empty());
        assert!(!store.current().is_authenticated());

        // a second logout changes nothing and does not fail
        store.logout();
        assert!(!store.current().is_authenticated());
    }

    #[tokio::test]
    async fn update_identity_keeps_the_token() {
        let gateway = InMemoryGateway::new();
        gateway.register_account("mgarcia", "secret", identity(3));
        let vault = Arc::new(InMemorySessionVault::new());
        let store = store_with(&gateway, &vault);
        store.login("mgarcia", "secret").await.unwrap();

        let renamed = Identity::new(
            UserId::new(3),
            "mgarcia",
            "Maria Jose",
            "Garcia",
            None,
            Role::Client,
            AccountStatus::Active,
            fixed_now(),
        )
        .unwrap();
        store.update_identity(renamed).unwrap();

        let state = store.current();
        let session = state.session().unwrap();
        assert_eq!(session.token(), "token-3");
        assert_eq!(session.identity().first_name(), "Maria Jose");
        assert_eq!(
            vault.load().unwrap().unwrap().identity().first_name(),
            "Maria Jose"
        );
    }
}
