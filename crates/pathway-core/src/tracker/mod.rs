//! Plan generation: submit a goal, find the plan it created, wait for the
//! generated content.
//!
//! An attempt moves through
//! `Idle -> Submitting -> Discovering -> Polling -> {Complete, Failed, TimedOut}`.
//! Phase changes are published on a watch channel (see
//! [`GenerationTracker::subscribe`]); a rotating progress message is published
//! on a second one while the attempt runs.
//!
//! The service never returns the identifier of a created plan. It is inferred
//! by comparing listings taken before and after submitting, and guessed as
//! the next identifier when the new plan never shows up.

use std::sync::Arc;

use log::{info, warn};
use tokio::sync::watch;

use crate::{
    api::{NewPlan, PlanService},
    config::TrackerConfig,
    error::{PathwayError, Result},
    models::{CareerPlan, PlanId, UserIdentity},
    profile::ProfileStore,
};

pub mod cancel;
pub mod discovery;
pub mod ownership;
pub mod placeholder;
mod polling;
pub mod status;

pub use cancel::{CancelOnDrop, CancelToken, Cancelled};
pub use discovery::Baseline;
pub use ownership::OwnershipIndex;
pub use placeholder::{placeholder_plan, PlaceholderStore};
pub use status::{INITIAL_STATUS, STATUS_MESSAGES};

use discovery::Discovery;
use polling::PollResult;
use status::StatusTicker;

/// How the identifier of a submitted plan was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdSource {
    /// Seen in a listing after submitting
    Discovered,
    /// Assumed to be the next identifier after the baseline
    Guessed,
}

/// Observable phase of the current attempt.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GenerationPhase {
    #[default]
    Idle,
    Submitting,
    Discovering,
    Polling {
        plan_id: PlanId,
        source: IdSource,
    },
    Complete {
        plan_id: PlanId,
    },
    Failed,
    TimedOut {
        plan_id: PlanId,
    },
}

/// A plan handed back by an attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPlan {
    pub plan: CareerPlan,
    /// `None` for demo plans, which have no identifier
    pub id_source: Option<IdSource>,
    /// The content was synthesized locally rather than generated
    pub synthesized: bool,
}

impl ResolvedPlan {
    /// Demo plans exist only locally and cannot be reopened.
    pub fn is_demo(&self) -> bool {
        self.id_source.is_none()
    }
}

/// Result of one generation attempt.
#[derive(Debug)]
pub enum GenerationOutcome {
    /// Generated content arrived, or the service was unreachable before
    /// submitting and a demo plan stands in
    Completed(ResolvedPlan),
    /// The polling window elapsed; the plan carries placeholder content
    TimedOut(ResolvedPlan),
    /// Submission failed, the service reported a generation error, or every
    /// check during polling failed to reach the service
    Failed(PathwayError),
    Cancelled,
}

impl GenerationOutcome {
    pub fn plan(&self) -> Option<&ResolvedPlan> {
        match self {
            GenerationOutcome::Completed(resolved) | GenerationOutcome::TimedOut(resolved) => {
                Some(resolved)
            }
            GenerationOutcome::Failed(_) | GenerationOutcome::Cancelled => None,
        }
    }
}

/// Runs plan generation attempts.
pub struct GenerationTracker {
    service: Arc<dyn PlanService>,
    profiles: ProfileStore,
    ownership: OwnershipIndex,
    placeholders: PlaceholderStore,
    config: TrackerConfig,
    phase: watch::Sender<GenerationPhase>,
    status: Arc<watch::Sender<String>>,
}

impl GenerationTracker {
    pub fn new(
        service: Arc<dyn PlanService>,
        profiles: ProfileStore,
        ownership: OwnershipIndex,
        placeholders: PlaceholderStore,
        config: TrackerConfig,
    ) -> Self {
        let (phase, _) = watch::channel(GenerationPhase::Idle);
        let (status, _) = watch::channel(String::new());
        Self {
            service,
            profiles,
            ownership,
            placeholders,
            config,
            phase,
            status: Arc::new(status),
        }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Current phase.
    pub fn phase(&self) -> GenerationPhase {
        self.phase.borrow().clone()
    }

    /// Follows phase changes.
    pub fn subscribe(&self) -> watch::Receiver<GenerationPhase> {
        self.phase.subscribe()
    }

    /// Follows the rotating progress message.
    pub fn status_messages(&self) -> watch::Receiver<String> {
        self.status.subscribe()
    }

    fn enter(&self, phase: GenerationPhase) {
        info!("Generation phase: {phase:?}");
        self.phase.send_replace(phase);
    }

    /// Submits `target_role` as a new goal for `user` and follows it until
    /// the plan is ready.
    ///
    /// The starting role comes from the cached profile. Completed and
    /// timed-out plans are recorded as owned by `user`; demo plans are not.
    /// The placeholder content of a timed-out plan is kept locally so the
    /// plan can be reopened.
    /// Cancelling `cancel` stops the attempt at its next delay or check,
    /// without further phase changes or ownership writes.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty goal and storage errors from
    /// reading the profile. Service failures are reported as
    /// [`GenerationOutcome::Failed`].
    pub async fn generate(
        &self,
        user: &UserIdentity,
        target_role: &str,
        cancel: &CancelToken,
    ) -> Result<GenerationOutcome> {
        let target_role = target_role.trim();
        if target_role.is_empty() {
            return Err(PathwayError::invalid_input("goal").with_reason("must not be empty"));
        }

        let profile = self.profiles.load().await?;
        let request = NewPlan {
            current_role: profile.current_role().to_string(),
            target_role: target_role.to_string(),
        };

        let _ticker = StatusTicker::start(self.status.clone(), self.config.status_interval);

        self.enter(GenerationPhase::Submitting);
        let baseline = self.snapshot().await;
        if cancel.is_cancelled() {
            return Ok(GenerationOutcome::Cancelled);
        }

        if let Err(e) = self.service.create_plan(&request).await {
            warn!("Failed to submit goal '{target_role}': {e}");
            self.enter(GenerationPhase::Failed);
            return Ok(GenerationOutcome::Failed(e));
        }
        info!("Submitted goal '{target_role}' from '{}'", request.current_role);
        if cancel.is_cancelled() {
            return Ok(GenerationOutcome::Cancelled);
        }

        self.enter(GenerationPhase::Discovering);
        let (plan_id, source) = match self.discover(baseline, cancel).await {
            Discovery::Found(id) => (id, IdSource::Discovered),
            Discovery::Guessed(id) => (id, IdSource::Guessed),
            Discovery::Unavailable => return Ok(self.demo(&request)),
            Discovery::Cancelled => return Ok(GenerationOutcome::Cancelled),
        };

        Ok(self.follow(user, &request, plan_id, source, cancel).await)
    }

    /// Stands in a demo plan when the service could not be reached at all.
    fn demo(&self, request: &NewPlan) -> GenerationOutcome {
        warn!("Service unreachable before submit, showing a demo plan");
        let plan = placeholder_plan(
            PlanId::UNASSIGNED,
            &request.target_role,
            &request.current_role,
        );
        self.enter(GenerationPhase::Complete {
            plan_id: PlanId::UNASSIGNED,
        });
        GenerationOutcome::Completed(ResolvedPlan {
            plan,
            id_source: None,
            synthesized: true,
        })
    }

    /// Polls the submitted plan and settles the attempt.
    async fn follow(
        &self,
        user: &UserIdentity,
        request: &NewPlan,
        plan_id: PlanId,
        source: IdSource,
        cancel: &CancelToken,
    ) -> GenerationOutcome {
        self.enter(GenerationPhase::Polling { plan_id, source });
        let (outcome, phase) = match self.poll_until_ready(plan_id, cancel).await {
            PollResult::Ready(plan) => (
                GenerationOutcome::Completed(ResolvedPlan {
                    plan,
                    id_source: Some(source),
                    synthesized: false,
                }),
                GenerationPhase::Complete { plan_id },
            ),
            PollResult::GenerationFailed => {
                self.enter(GenerationPhase::Failed);
                return GenerationOutcome::Failed(PathwayError::Generation { plan_id });
            }
            PollResult::TimedOut {
                reached: false,
                last_error: Some(e),
            } => {
                warn!("Service unreachable while polling plan {plan_id}");
                self.enter(GenerationPhase::Failed);
                return GenerationOutcome::Failed(e);
            }
            PollResult::TimedOut { .. } => {
                warn!("Plan {plan_id} not ready in time, using placeholder content");
                let plan = placeholder_plan(plan_id, &request.target_role, &request.current_role);
                if let Err(e) = self.placeholders.save(&plan).await {
                    warn!("Failed to store placeholder content for plan {plan_id}: {e}");
                }
                (
                    GenerationOutcome::TimedOut(ResolvedPlan {
                        plan,
                        id_source: Some(source),
                        synthesized: true,
                    }),
                    GenerationPhase::TimedOut { plan_id },
                )
            }
            PollResult::Cancelled => return GenerationOutcome::Cancelled,
        };

        if let Err(e) = self.ownership.record(&user.email, plan_id).await {
            warn!("Failed to record plan {plan_id} for {}: {e}", user.email);
        }
        self.enter(phase);
        outcome
    }
}
