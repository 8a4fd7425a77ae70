//! Namespaced keys for the local store.
//!
//! Each record lives under its own key so reads and writes to different
//! records never touch each other.

use crate::models::PlanId;

/// Bearer token of the active session.
pub const SESSION_TOKEN: &str = "session:token";

/// JSON user record of the active session.
pub const SESSION_USER: &str = "session:user";

/// Cached profile document.
pub const PROFILE: &str = "profile";

/// Namespace for per-plan completed step indices.
pub const PROGRESS_NAMESPACE: &str = "path_progress";

/// Namespace for per-user owned plan identifiers.
pub const OWNERSHIP_NAMESPACE: &str = "my_path_ids";

/// Namespace for locally synthesized plan content.
pub const PLACEHOLDER_NAMESPACE: &str = "placeholder";

/// Keys removed on sign-out.
pub const SESSION_SCOPED: [&str; 3] = [SESSION_TOKEN, SESSION_USER, PROFILE];

/// Normalizes an email address for use as an identity key.
///
/// ```rust
/// use pathway_core::store::keys::normalize_email;
///
/// assert_eq!(normalize_email("  User@Example.com "), "user@example.com");
/// ```
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Key holding the completed step indices of a plan.
pub fn progress(plan_id: PlanId) -> String {
    format!("{PROGRESS_NAMESPACE}:{plan_id}")
}

/// Key holding the synthesized content shown for a plan that timed out.
pub fn placeholder(plan_id: PlanId) -> String {
    format!("{PLACEHOLDER_NAMESPACE}:{plan_id}")
}

/// Key holding the plan identifiers created by the user with this email.
pub fn ownership(email: &str) -> String {
    format!("{OWNERSHIP_NAMESPACE}:{}", normalize_email(email))
}
