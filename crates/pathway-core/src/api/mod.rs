//! Remote plan service contract.
//!
//! [`PlanService`] is the seam between the client logic and the network.
//! [`HttpPlanService`] talks to the real backend; tests substitute in-memory
//! implementations.

use async_trait::async_trait;

use crate::{
    error::Result,
    models::{CareerPlan, PlanId, Profile},
};

pub mod errors;
pub mod http;
pub mod requests;

pub use http::HttpPlanService;
pub use requests::{Credentials, NewPlan, PlanQuery, Registration};

/// Operations offered by the remote plan service.
///
/// Once a bearer token is set every request carries it as an
/// `Authorization` header until it is cleared again.
#[async_trait]
pub trait PlanService: Send + Sync {
    /// Exchanges credentials for a bearer token.
    async fn login(&self, credentials: &Credentials) -> Result<String>;

    /// Registers a new account. Does not sign in.
    async fn register(&self, registration: &Registration) -> Result<()>;

    /// Submits a plan for generation. The service does not return the new
    /// identifier.
    async fn create_plan(&self, plan: &NewPlan) -> Result<()>;

    /// Lists plans.
    async fn list_plans(&self, query: &PlanQuery) -> Result<Vec<CareerPlan>>;

    /// Fetches one plan; `None` when the service does not know it (yet).
    async fn get_plan(&self, id: PlanId) -> Result<Option<CareerPlan>>;

    /// Fetches the remote profile.
    async fn get_profile(&self) -> Result<Profile>;

    /// Replaces the remote profile, returning what the service stored.
    async fn update_profile(&self, profile: &Profile) -> Result<Profile>;

    /// Sets or clears the bearer credential used by later requests.
    fn set_bearer_token(&self, token: Option<String>);
}
