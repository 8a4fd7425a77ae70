//! Session and user identity.

use serde::{Deserialize, Serialize};

use crate::store::keys::normalize_email;

/// Identity of the signed-in user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserIdentity {
    /// Normalized (trimmed, lowercased) email
    pub email: String,

    /// Name shown in greetings
    #[serde(default, alias = "name")]
    pub display_name: String,
}

impl UserIdentity {
    /// Builds an identity, normalizing the email. An empty display name is
    /// replaced by the local part of the email.
    pub fn new(email: &str, display_name: Option<&str>) -> Self {
        let email = normalize_email(email);
        let display_name = display_name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(String::from)
            .unwrap_or_else(|| email.split('@').next().unwrap_or_default().to_string());

        Self {
            email,
            display_name,
        }
    }
}

/// An authenticated session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user: UserIdentity,
    pub token: String,
}

/// Lifecycle of the session as seen by the rest of the client.
///
/// A session is signed in exactly when both identity and token are known,
/// which the [`SessionState::SignedIn`] variant carries together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    /// Restore from storage has not finished yet
    #[default]
    Loading,
    SignedOut,
    SignedIn(Session),
}

impl SessionState {
    pub fn is_signed_in(&self) -> bool {
        matches!(self, SessionState::SignedIn(_))
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            SessionState::SignedIn(session) => Some(session),
            _ => None,
        }
    }
}
