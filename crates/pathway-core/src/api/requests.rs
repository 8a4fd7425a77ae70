//! Request and response bodies exchanged with the plan service.

use serde::{Deserialize, Serialize};

use crate::store::keys::normalize_email;

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    /// Builds credentials with a normalized email.
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: normalize_email(email),
            password: password.to_string(),
        }
    }
}

/// Body of `POST /auth/register`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl Registration {
    /// Builds a registration with a normalized email and trimmed name.
    pub fn new(name: &str, email: &str, password: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            email: normalize_email(email),
            password: password.to_string(),
        }
    }
}

/// Body of `POST /api/v1/learning-paths`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewPlan {
    pub current_role: String,
    pub target_role: String,
}

/// Response of `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    #[serde(alias = "accessToken", alias = "jwt")]
    pub token: String,
}

/// Query parameters for listing plans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanQuery {
    pub page: u32,
    /// Page size; `None` leaves the service default
    pub size: Option<u32>,
    /// Sort by identifier, newest first
    pub newest_first: bool,
}

impl PlanQuery {
    /// The single most recently created plan.
    pub const fn latest() -> Self {
        Self {
            page: 0,
            size: Some(1),
            newest_first: true,
        }
    }

    /// Everything the service returns by default.
    pub const fn all() -> Self {
        Self {
            page: 0,
            size: None,
            newest_first: false,
        }
    }

    /// Query string, including the leading `?` when non-empty.
    pub fn to_query_string(&self) -> String {
        let mut parts = vec![format!("page={}", self.page)];
        if let Some(size) = self.size {
            parts.push(format!("size={size}"));
        }
        if self.newest_first {
            parts.push("sort=id,desc".to_string());
        }
        format!("?{}", parts.join("&"))
    }
}

impl Default for PlanQuery {
    fn default() -> Self {
        Self::all()
    }
}
