//! High-level client API.
//!
//! [`Pathway`] wires the plan service, the local store and the three
//! trackers together. The CLI talks only to this type.
//!
//! ```text
//! ┌──────────────┐    ┌──────────────────┐    ┌──────────────┐
//! │    Pathway   │───▶│ SessionManager   │───▶│ PlanService  │
//! │              │───▶│ GenerationTracker│───▶│  (HTTP)      │
//! │              │───▶│ ProgressTracker  │───▶│ Store (kv)   │
//! └──────────────┘    └──────────────────┘    └──────────────┘
//! ```
//!
//! ```rust,no_run
//! use pathway_core::{CancelToken, PathwayBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pathway = PathwayBuilder::new()
//!     .with_base_url("http://localhost:8080")
//!     .build()
//!     .await?;
//!
//! pathway.session().sign_in("ana@example.com", "secret").await?;
//! let outcome = pathway.generate("Data Engineer", &CancelToken::new()).await?;
//! println!("{outcome}");
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use crate::{
    api::PlanService,
    config::TrackerConfig,
    error::{PathwayError, Result},
    models::{CareerPlan, PlanId, Profile},
    profile::ProfileStore,
    progress::{PlanProgress, ProgressTracker, ToggleOutcome},
    session::SessionManager,
    store::Store,
    tracker::{
        CancelToken, GenerationOutcome, GenerationTracker, OwnershipIndex, PlaceholderStore,
    },
};

pub mod builder;
mod library;

pub use builder::PathwayBuilder;

/// Client facade.
pub struct Pathway {
    service: Arc<dyn PlanService>,
    store: Store,
    session: SessionManager,
    profiles: ProfileStore,
    progress: ProgressTracker,
    ownership: OwnershipIndex,
    placeholders: PlaceholderStore,
    tracker: Arc<GenerationTracker>,
}

impl Pathway {
    pub(crate) fn new(service: Arc<dyn PlanService>, store: Store, config: TrackerConfig) -> Self {
        let profiles = ProfileStore::new(store.clone());
        let ownership = OwnershipIndex::new(store.clone());
        let placeholders = PlaceholderStore::new(store.clone());
        Self {
            session: SessionManager::new(service.clone(), store.clone()),
            progress: ProgressTracker::new(store.clone(), profiles.clone()),
            tracker: Arc::new(GenerationTracker::new(
                service.clone(),
                profiles.clone(),
                ownership.clone(),
                placeholders.clone(),
                config,
            )),
            service,
            store,
            profiles,
            ownership,
            placeholders,
        }
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    pub fn profiles(&self) -> &ProfileStore {
        &self.profiles
    }

    pub fn progress(&self) -> &ProgressTracker {
        &self.progress
    }

    pub fn ownership(&self) -> &OwnershipIndex {
        &self.ownership
    }

    /// Shared handle to the generation tracker, for observing phases and
    /// status messages from another task.
    pub fn tracker(&self) -> Arc<GenerationTracker> {
        self.tracker.clone()
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Submits a new goal for the signed-in user.
    ///
    /// # Errors
    ///
    /// Returns `NotSignedIn` without a session. See
    /// [`GenerationTracker::generate`] for the rest.
    pub async fn generate(&self, target_role: &str, cancel: &CancelToken) -> Result<GenerationOutcome> {
        let user = self.session.require_user()?;
        self.tracker.generate(&user, target_role, cancel).await
    }

    /// Fetches a plan from the service.
    ///
    /// While the service copy has no usable content, the placeholder kept
    /// from a timed-out attempt stands in for it. A plan the service does not
    /// know is served from that placeholder alone.
    ///
    /// # Errors
    ///
    /// Returns `PlanNotFound` when neither the service nor the local store
    /// knows the plan.
    pub async fn fetch_plan(&self, id: PlanId) -> Result<CareerPlan> {
        match self.service.get_plan(id).await? {
            Some(plan) => self.with_placeholder(plan).await,
            None => self
                .placeholders
                .load(id)
                .await?
                .ok_or(PathwayError::PlanNotFound { id }),
        }
    }

    async fn with_placeholder(&self, plan: CareerPlan) -> Result<CareerPlan> {
        self.placeholders
            .resolve(plan, self.tracker.config().content_threshold)
            .await
    }

    /// A plan with its parsed steps and local progress.
    pub async fn show_plan(&self, id: PlanId) -> Result<PlanProgress> {
        let plan = self.fetch_plan(id).await?;
        self.progress.plan_progress(plan).await
    }

    /// Toggles step `index` (zero-based) of plan `id`.
    ///
    /// The step list is re-parsed from the current plan content, so the step
    /// title used for the skill is the one shown to the user.
    pub async fn toggle_step(&self, id: PlanId, index: usize) -> Result<(ToggleOutcome, PlanProgress)> {
        let plan = self.fetch_plan(id).await?;
        let current = self.progress.plan_progress(plan).await?;
        let title = current
            .steps
            .get(index)
            .and_then(|step| step.title.clone())
            .unwrap_or_default();

        let outcome = self
            .progress
            .toggle_step(id, index, &title, current.steps.len())
            .await?;

        let updated = PlanProgress {
            completed: outcome.completed.clone(),
            ..current
        };
        Ok((outcome, updated))
    }

    /// Replaces the cached profile with the one stored by the service.
    pub async fn pull_profile(&self) -> Result<Profile> {
        self.session.require_user()?;
        self.profiles.pull(&self.service).await
    }

    /// Sends the cached profile to the service.
    pub async fn push_profile(&self) -> Result<Profile> {
        self.session.require_user()?;
        self.profiles.push(&self.service).await
    }
}
