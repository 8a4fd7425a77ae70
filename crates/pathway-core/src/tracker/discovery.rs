//! Identifier discovery.
//!
//! Creating a plan does not return its identifier. The tracker records the
//! highest identifier visible before submitting and then re-lists until a
//! higher one shows up.

use log::{debug, info, warn};

use super::{cancel::CancelToken, GenerationTracker};
use crate::{
    api::PlanQuery,
    models::{CareerPlan, PlanId},
};

/// High-water mark taken before a plan is submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Baseline {
    /// No plans were visible
    Empty,
    /// Highest identifier visible
    Max(PlanId),
}

impl Baseline {
    pub fn from_plans(plans: &[CareerPlan]) -> Self {
        newest(plans).map_or(Baseline::Empty, Baseline::Max)
    }

    /// Whether `candidate` is newer than everything seen before submitting.
    ///
    /// ```rust
    /// use pathway_core::models::PlanId;
    /// use pathway_core::tracker::Baseline;
    ///
    /// let baseline = Baseline::Max(PlanId::new(9));
    /// assert!(baseline.admits(PlanId::new(10)));
    /// assert!(!baseline.admits(PlanId::new(9)));
    /// ```
    pub fn admits(&self, candidate: PlanId) -> bool {
        match self {
            Baseline::Empty => candidate.is_assigned(),
            Baseline::Max(max) => candidate > *max,
        }
    }

    /// Identifier assumed when discovery gives up.
    pub fn guess(&self) -> PlanId {
        match self {
            Baseline::Empty => PlanId::UNASSIGNED.next(),
            Baseline::Max(max) => max.next(),
        }
    }
}

/// Highest identifier in a listing. The listing order is not trusted.
pub fn newest(plans: &[CareerPlan]) -> Option<PlanId> {
    plans.iter().map(|plan| plan.id).max()
}

/// How discovery ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Discovery {
    Found(PlanId),
    Guessed(PlanId),
    /// No usable baseline, the identifier cannot be inferred
    Unavailable,
    Cancelled,
}

impl GenerationTracker {
    /// Takes the pre-submission baseline. `None` when the listing failed.
    pub(super) async fn snapshot(&self) -> Option<Baseline> {
        match self.service.list_plans(&PlanQuery::latest()).await {
            Ok(plans) => {
                let baseline = Baseline::from_plans(&plans);
                debug!("Baseline before submit: {baseline:?}");
                Some(baseline)
            }
            Err(e) => {
                warn!("Failed to list plans before submit: {e}");
                None
            }
        }
    }

    pub(super) async fn discover(
        &self,
        baseline: Option<Baseline>,
        cancel: &CancelToken,
    ) -> Discovery {
        let Some(baseline) = baseline else {
            return Discovery::Unavailable;
        };

        if cancel.sleep(self.config.settle_delay).await.is_err() {
            return Discovery::Cancelled;
        }

        let attempts = self.config.discovery_attempts.max(1);
        for attempt in 1..=attempts {
            if cancel.is_cancelled() {
                return Discovery::Cancelled;
            }

            match self.service.list_plans(&PlanQuery::latest()).await {
                Ok(plans) => match newest(&plans).filter(|id| baseline.admits(*id)) {
                    Some(id) => {
                        info!("Discovered plan {id} on attempt {attempt}");
                        return Discovery::Found(id);
                    }
                    None => debug!("Attempt {attempt}/{attempts}: no new plan yet"),
                },
                Err(e) => warn!("Attempt {attempt}/{attempts}: listing failed: {e}"),
            }

            if attempt < attempts && cancel.sleep(self.config.discovery_interval).await.is_err() {
                return Discovery::Cancelled;
            }
        }

        let guess = baseline.guess();
        warn!("New plan not visible after {attempts} attempts, assuming {guess}");
        Discovery::Guessed(guess)
    }
}
