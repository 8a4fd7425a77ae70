//! Wrappers for displaying operation outcomes.

use std::fmt;

use super::collections::StepList;
use crate::{
    progress::{plan_steps, PlanProgress, ToggleOutcome},
    tracker::{GenerationOutcome, IdSource, ResolvedPlan},
};

impl fmt::Display for GenerationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationOutcome::Completed(resolved) if resolved.is_demo() => {
                writeln!(
                    f,
                    "The plan service could not be reached. Showing a demo plan that is not saved."
                )?;
                writeln!(f)?;
                fmt_resolved(resolved, f)
            }
            GenerationOutcome::Completed(resolved) => {
                writeln!(f, "Your plan is ready (ID: {}).", resolved.plan.id)?;
                if resolved.id_source == Some(IdSource::Guessed) {
                    writeln!(
                        f,
                        "The plan identifier was inferred; if the plan looks wrong, check `pathway plan list`."
                    )?;
                }
                writeln!(f)?;
                fmt_resolved(resolved, f)
            }
            GenerationOutcome::TimedOut(resolved) => {
                writeln!(
                    f,
                    "Generation is taking longer than expected (ID: {}). Here is a starter plan; \
                     `pathway plan show {}` will show the generated one once it is ready.",
                    resolved.plan.id, resolved.plan.id
                )?;
                writeln!(f)?;
                fmt_resolved(resolved, f)
            }
            GenerationOutcome::Failed(e) => writeln!(f, "Error: {e}"),
            GenerationOutcome::Cancelled => writeln!(f, "Generation cancelled."),
        }
    }
}

fn fmt_resolved(resolved: &ResolvedPlan, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let plan = &resolved.plan;
    writeln!(f, "# {}", plan.target_role)?;
    writeln!(f)?;
    if !plan.current_role.is_empty() {
        writeln!(f, "From: {}", plan.current_role)?;
        writeln!(f)?;
    }
    let steps = plan_steps(plan);
    write!(f, "{}", StepList::plain(&steps))
}

/// A toggled step together with the plan it belongs to.
pub struct ToggleResult<'a> {
    pub outcome: &'a ToggleOutcome,
    pub progress: &'a PlanProgress,
    pub index: usize,
}

impl fmt::Display for ToggleResult<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = self
            .progress
            .steps
            .get(self.index)
            .map(|step| step.display_title())
            .unwrap_or_default();
        let verb = if self.outcome.checked {
            "Completed"
        } else {
            "Reopened"
        };
        writeln!(f, "{verb} step {}: {title}", self.index + 1)?;

        if let Some(skill) = &self.outcome.skill_unlocked {
            writeln!(f)?;
            writeln!(f, "Skill unlocked: **{skill}**")?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "Progress: {}/{} steps ({:.0}%)",
            self.progress.completed_count(),
            self.progress.steps.len(),
            self.progress.percent()
        )?;
        if self.outcome.plan_completed {
            writeln!(f)?;
            writeln!(f, "Plan finished. Congratulations!")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::PathwayError,
        models::PlanId,
        tracker::placeholder_plan,
    };

    #[test]
    fn test_demo_plan_is_flagged() {
        let outcome = GenerationOutcome::Completed(ResolvedPlan {
            plan: placeholder_plan(PlanId::UNASSIGNED, "UX Designer", "Schoolteacher"),
            id_source: None,
            synthesized: true,
        });
        let output = outcome.to_string();
        assert!(output.contains("demo plan"));
        assert!(output.contains("# UX Designer"));
        assert!(output.contains("### 5. Certification and community"));
    }

    #[test]
    fn test_timed_out_points_to_plan_show() {
        let outcome = GenerationOutcome::TimedOut(ResolvedPlan {
            plan: placeholder_plan(PlanId::new(12), "UX Designer", "Schoolteacher"),
            id_source: Some(IdSource::Discovered),
            synthesized: true,
        });
        assert!(outcome.to_string().contains("pathway plan show 12"));
    }

    #[test]
    fn test_failure_shows_error() {
        let outcome = GenerationOutcome::Failed(PathwayError::Generation {
            plan_id: PlanId::new(5),
        });
        assert!(outcome.to_string().starts_with("Error:"));
    }
}
