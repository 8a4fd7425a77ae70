//! "My Plans": the plans the signed-in user created, with their progress.

use log::debug;

use super::Pathway;
use crate::{
    api::PlanQuery,
    error::Result,
    models::{CareerPlan, PlanSummary, ProgressState},
    progress::{compute_progress, plan_steps},
};

impl Pathway {
    /// Lists the signed-in user's plans in service order.
    ///
    /// Plans still generating are reported as
    /// [`ProgressState::Processing`] unless a timed-out attempt left
    /// placeholder content for them; the others carry their completion
    /// percentage.
    ///
    /// # Errors
    ///
    /// Returns `NotSignedIn` without a session, or the listing error.
    pub async fn my_plans(&self) -> Result<Vec<PlanSummary>> {
        let user = self.session.require_user()?;
        let plans = self.service.list_plans(&PlanQuery::all()).await?;
        let total = plans.len();
        let owned = self.ownership.filter_owned(&user.email, plans).await?;
        debug!("{} of {total} plans belong to {}", owned.len(), user.email);

        let mut summaries = Vec::with_capacity(owned.len());
        for plan in owned {
            summaries.push(self.summarize(plan).await?);
        }
        Ok(summaries)
    }

    async fn summarize(&self, plan: CareerPlan) -> Result<PlanSummary> {
        let plan = self.with_placeholder(plan).await?;
        let ready = plan.is_ready(self.tracker.config().content_threshold);
        let steps = if ready { plan_steps(&plan) } else { Vec::new() };
        let completed = self.progress.load_progress(plan.id).await?;
        let completed_steps = completed.range(..steps.len()).count();
        let percent = compute_progress(steps.len(), completed_steps);

        Ok(PlanSummary {
            id: plan.id,
            target_role: plan.target_role,
            status: plan.status,
            total_steps: steps.len(),
            completed_steps,
            percent,
            progress: if ready {
                ProgressState::from_percent(percent)
            } else {
                ProgressState::Processing
            },
        })
    }
}
