//! Completion polling.

use log::{debug, info, warn};
use tokio::time::{self, MissedTickBehavior};

use super::{cancel::CancelToken, GenerationTracker};
use crate::{
    error::PathwayError,
    models::{CareerPlan, PlanId, PlanStatus},
};

/// How polling ended.
#[derive(Debug)]
pub(super) enum PollResult {
    Ready(CareerPlan),
    /// The service reported a generation error
    GenerationFailed,
    /// The window elapsed. `reached` is `false` when no fetch got an answer
    /// from the service.
    TimedOut {
        reached: bool,
        last_error: Option<PathwayError>,
    },
    Cancelled,
}

impl GenerationTracker {
    /// Polls `plan_id` until it is ready, failed, the window elapses or the
    /// attempt is cancelled. The first check runs immediately.
    pub(super) async fn poll_until_ready(&self, plan_id: PlanId, cancel: &CancelToken) -> PollResult {
        let deadline = time::sleep(self.config.poll_timeout);
        tokio::pin!(deadline);

        let mut ticker = time::interval(self.config.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut reached = false;
        let mut last_error = None;
        let mut checks = 0u32;

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return PollResult::Cancelled,
                _ = &mut deadline => return PollResult::TimedOut { reached, last_error },
                _ = ticker.tick() => {}
            }

            checks += 1;
            let fetched = tokio::select! {
                biased;
                _ = cancel.cancelled() => return PollResult::Cancelled,
                _ = &mut deadline => return PollResult::TimedOut { reached, last_error },
                fetched = self.service.get_plan(plan_id) => fetched,
            };

            match fetched {
                Ok(Some(plan)) => {
                    reached = true;
                    last_error = None;
                    if plan.is_ready(self.config.content_threshold) {
                        info!("Plan {plan_id} ready after {checks} checks");
                        return PollResult::Ready(plan);
                    }
                    if plan.status == PlanStatus::Error {
                        warn!("Service reported a generation error for plan {plan_id}");
                        return PollResult::GenerationFailed;
                    }
                    debug!("Plan {plan_id} is {}", plan.status);
                }
                Ok(None) => {
                    reached = true;
                    debug!("Plan {plan_id} not visible yet");
                }
                Err(e) => {
                    warn!("Failed to check plan {plan_id}: {e}");
                    if !matches!(e, PathwayError::Connectivity { .. }) {
                        reached = true;
                    }
                    last_error = Some(e);
                }
            }
        }
    }
}
