//! Authenticated-session lifecycle.
//!
//! The [`SessionManager`] owns login, registration, logout and restore on
//! start-up. It is the only component that writes the session keys and the
//! only one that sets or clears the bearer token on the plan service.

use std::sync::{Arc, PoisonError, RwLock};

use log::{info, warn};

use crate::{
    api::{Credentials, PlanService, Registration},
    error::{PathwayError, Result},
    models::{Profile, Session, SessionState, UserIdentity},
    store::{keys, Store},
};

/// Manages the authenticated session.
pub struct SessionManager {
    service: Arc<dyn PlanService>,
    store: Store,
    state: RwLock<SessionState>,
}

impl SessionManager {
    pub fn new(service: Arc<dyn PlanService>, store: Store) -> Self {
        Self {
            service,
            store,
            state: RwLock::new(SessionState::Loading),
        }
    }

    /// Current session state.
    pub fn state(&self) -> SessionState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The active session, if signed in.
    pub fn current(&self) -> Option<Session> {
        self.state().session().cloned()
    }

    /// The signed-in user, or `NotSignedIn`.
    pub fn require_user(&self) -> Result<UserIdentity> {
        self.current()
            .map(|session| session.user)
            .ok_or(PathwayError::NotSignedIn)
    }

    fn set_state(&self, state: SessionState) {
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = state;
    }

    /// Restores a persisted session.
    ///
    /// The session is signed in only if both the token and the user record
    /// are stored and readable. Storage failures resolve to signed out.
    pub async fn restore(&self) -> SessionState {
        let restored = match self.read_persisted().await {
            Ok(Some(session)) => {
                self.service.set_bearer_token(Some(session.token.clone()));
                info!("Restored session for {}", session.user.email);
                SessionState::SignedIn(session)
            }
            Ok(None) => SessionState::SignedOut,
            Err(e) => {
                warn!("Failed to restore session: {e}");
                SessionState::SignedOut
            }
        };

        self.set_state(restored.clone());
        restored
    }

    async fn read_persisted(&self) -> Result<Option<Session>> {
        let token = self.store.get(keys::SESSION_TOKEN).await?;
        let user: Option<UserIdentity> = self.store.get_json(keys::SESSION_USER).await?;

        Ok(match (token, user) {
            (Some(token), Some(user)) if !token.is_empty() => Some(Session { user, token }),
            _ => None,
        })
    }

    /// Signs in and persists the session.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty email or password,
    /// `Authentication` when the service rejects the credentials (with the
    /// service message when it supplied one), or a connectivity/API error.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        let credentials = Credentials::new(email, password);
        if credentials.email.is_empty() {
            return Err(PathwayError::invalid_input("email").with_reason("must not be empty"));
        }
        if password.is_empty() {
            return Err(PathwayError::invalid_input("password").with_reason("must not be empty"));
        }

        let token = self.service.login(&credentials).await?;

        let profile: Profile = self.store.get_json_or_default(keys::PROFILE).await?;
        let user = UserIdentity::new(&credentials.email, profile.name.as_deref());

        self.store.set(keys::SESSION_TOKEN, token.clone()).await?;
        self.store.set_json(keys::SESSION_USER, &user).await?;

        self.service.set_bearer_token(Some(token.clone()));
        let session = Session { user, token };
        self.set_state(SessionState::SignedIn(session.clone()));

        info!("Signed in as {}", session.user.email);
        Ok(session)
    }

    /// Registers a new account. The user still has to sign in afterwards.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for empty fields or `Registration` with the
    /// most specific message the service supplied.
    pub async fn sign_up(&self, name: &str, email: &str, password: &str) -> Result<()> {
        let registration = Registration::new(name, email, password);
        for (field, value) in [
            ("name", registration.name.as_str()),
            ("email", registration.email.as_str()),
            ("password", registration.password.as_str()),
        ] {
            if value.is_empty() {
                return Err(PathwayError::invalid_input(field).with_reason("must not be empty"));
            }
        }

        self.service.register(&registration).await?;
        info!("Registered {}", registration.email);
        Ok(())
    }

    /// Signs out: removes the session keys and the cached profile, and stops
    /// sending the bearer token.
    ///
    /// # Errors
    ///
    /// Returns the storage error when the keys cannot be removed. The
    /// session then stays signed in.
    pub async fn sign_out(&self) -> Result<()> {
        self.store.remove(&keys::SESSION_SCOPED).await?;
        self.service.set_bearer_token(None);
        self.set_state(SessionState::SignedOut);
        info!("Signed out");
        Ok(())
    }
}
