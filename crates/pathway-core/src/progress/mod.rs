//! Step completion tracking.
//!
//! Completion is recorded locally per plan as a set of zero-based step
//! indices into the step list as parsed when the step was toggled. The
//! indices are positional: if a plan's content is ever regenerated with a
//! different step order, recorded progress no longer lines up with the
//! steps it was recorded against.

use std::collections::BTreeSet;

use log::{info, warn};

use crate::{
    error::{PathwayError, Result},
    models::{CareerPlan, PlanId, Step},
    profile::ProfileStore,
    store::{keys, Store},
};

pub mod parse;

pub use parse::{parse_steps, plan_steps};

/// Completion percentage, `0.0` when there are no steps.
///
/// ```rust
/// use pathway_core::progress::compute_progress;
///
/// assert_eq!(compute_progress(0, 0), 0.0);
/// assert_eq!(compute_progress(4, 2), 50.0);
/// ```
pub fn compute_progress(total_steps: usize, completed: usize) -> f64 {
    if total_steps == 0 {
        return 0.0;
    }
    completed as f64 / total_steps as f64 * 100.0
}

/// Result of toggling one step.
#[derive(Debug, Clone, PartialEq)]
pub struct ToggleOutcome {
    /// Completed indices after the toggle
    pub completed: BTreeSet<usize>,
    /// `true` when the step became completed, `false` when it was unchecked
    pub checked: bool,
    /// Skill newly added to the profile by this toggle
    pub skill_unlocked: Option<String>,
    /// Every step of the plan is now completed
    pub plan_completed: bool,
}

/// A plan together with its parsed steps and local progress.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanProgress {
    pub plan: CareerPlan,
    pub steps: Vec<Step>,
    pub completed: BTreeSet<usize>,
}

impl PlanProgress {
    /// Completed steps that still exist in the parsed step list.
    pub fn completed_count(&self) -> usize {
        self.completed.range(..self.steps.len()).count()
    }

    pub fn percent(&self) -> f64 {
        compute_progress(self.steps.len(), self.completed_count())
    }

    pub fn is_fully_completed(&self) -> bool {
        !self.steps.is_empty() && self.completed_count() == self.steps.len()
    }

    pub fn is_step_done(&self, index: usize) -> bool {
        self.completed.contains(&index)
    }
}

/// Reads and updates per-plan progress.
#[derive(Clone)]
pub struct ProgressTracker {
    store: Store,
    profiles: ProfileStore,
}

impl ProgressTracker {
    pub fn new(store: Store, profiles: ProfileStore) -> Self {
        Self { store, profiles }
    }

    /// Completed step indices of a plan; empty when nothing was recorded.
    pub async fn load_progress(&self, plan_id: PlanId) -> Result<BTreeSet<usize>> {
        let indices: Vec<usize> = self.store.get_json_or_default(&keys::progress(plan_id)).await?;
        Ok(indices.into_iter().collect())
    }

    /// Bundles a plan with its steps and recorded progress.
    pub async fn plan_progress(&self, plan: CareerPlan) -> Result<PlanProgress> {
        let steps = plan_steps(&plan);
        let completed = self.load_progress(plan.id).await?;
        Ok(PlanProgress {
            plan,
            steps,
            completed,
        })
    }

    /// Flips the completion of one step and persists the result.
    ///
    /// Completing a step with a non-empty title adds that title to the
    /// profile skills. A failure to update the profile is logged and does
    /// not undo the toggle.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when `step_index` is not below `total_steps`.
    pub async fn toggle_step(
        &self,
        plan_id: PlanId,
        step_index: usize,
        step_title: &str,
        total_steps: usize,
    ) -> Result<ToggleOutcome> {
        if step_index >= total_steps {
            return Err(PathwayError::invalid_input("step").with_reason(format!(
                "step {} does not exist; the plan has {total_steps} steps",
                step_index + 1
            )));
        }

        let mut completed = self.load_progress(plan_id).await?;
        let checked = completed.insert(step_index);
        if !checked {
            completed.remove(&step_index);
        }

        let indices: Vec<usize> = completed.iter().copied().collect();
        self.store
            .set_json(&keys::progress(plan_id), &indices)
            .await?;

        let skill_unlocked = if checked {
            self.unlock_skill(step_title).await
        } else {
            None
        };

        let plan_completed = checked && completed.range(..total_steps).count() == total_steps;
        if plan_completed {
            info!("Plan {plan_id} fully completed");
        }

        Ok(ToggleOutcome {
            completed,
            checked,
            skill_unlocked,
            plan_completed,
        })
    }

    async fn unlock_skill(&self, step_title: &str) -> Option<String> {
        let skill = step_title.trim();
        if skill.is_empty() {
            return None;
        }

        match self.profiles.add_skill(skill).await {
            Ok(true) => {
                info!("Skill unlocked: {skill}");
                Some(skill.to_string())
            }
            Ok(false) => None,
            Err(e) => {
                warn!("Failed to add skill '{skill}' to profile: {e}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests;
