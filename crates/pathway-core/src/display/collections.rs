//! Collection wrappers.

use std::{collections::BTreeSet, fmt};

use crate::models::{PlanSummary, Step};

/// The user's plans, or a hint when there are none.
///
/// ```rust
/// use pathway_core::{
///     display::PlanSummaries,
///     models::{PlanId, PlanStatus, PlanSummary, ProgressState},
/// };
///
/// let summaries = PlanSummaries(vec![PlanSummary {
///     id: PlanId::new(42),
///     target_role: "Data Engineer".to_string(),
///     status: PlanStatus::Complete,
///     total_steps: 5,
///     completed_steps: 2,
///     percent: 40.0,
///     progress: ProgressState::InProgress { percent: 40.0 },
/// }]);
/// let output = summaries.to_string();
/// assert!(output.contains("Data Engineer (ID: 42)"));
/// assert!(output.contains("2/5"));
/// ```
pub struct PlanSummaries(pub Vec<PlanSummary>);

impl PlanSummaries {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for PlanSummaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No plans yet. Start one with `pathway goal <target role>`.");
        }
        for summary in &self.0 {
            write!(f, "{summary}")?;
        }
        Ok(())
    }
}

/// Numbered steps, optionally with checkboxes for completed ones.
pub struct StepList<'a> {
    pub steps: &'a [Step],
    pub completed: Option<&'a BTreeSet<usize>>,
}

impl<'a> StepList<'a> {
    pub fn plain(steps: &'a [Step]) -> Self {
        Self {
            steps,
            completed: None,
        }
    }

    pub fn with_progress(steps: &'a [Step], completed: &'a BTreeSet<usize>) -> Self {
        Self {
            steps,
            completed: Some(completed),
        }
    }
}

impl fmt::Display for StepList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.steps.is_empty() {
            return writeln!(f, "No steps could be read from this plan.");
        }

        for (index, step) in self.steps.iter().enumerate() {
            let marker = match self.completed {
                Some(done) if done.contains(&index) => "[x] ",
                Some(_) => "[ ] ",
                None => "",
            };
            writeln!(f, "### {}. {marker}{}", index + 1, step.display_title())?;
            writeln!(f)?;
            if let Some(kind) = step.step_type.as_deref().filter(|k| !k.trim().is_empty()) {
                writeln!(f, "*{kind}*")?;
                writeln!(f)?;
            }
            writeln!(f, "{}", step.display_description())?;
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(title: Option<&str>, kind: Option<&str>) -> Step {
        Step {
            title: title.map(str::to_string),
            description: None,
            step_type: kind.map(str::to_string),
        }
    }

    #[test]
    fn test_step_list_marks_completed_steps() {
        let steps = vec![step(Some("SQL"), Some("course")), step(None, None)];
        let done = BTreeSet::from([0]);
        let output = StepList::with_progress(&steps, &done).to_string();

        assert!(output.contains("### 1. [x] SQL"));
        assert!(output.contains("*course*"));
        assert!(output.contains("### 2. [ ] Untitled step"));
        assert!(output.contains("No description."));
    }

    #[test]
    fn test_empty_collections_have_hints() {
        assert!(PlanSummaries(vec![]).to_string().contains("No plans yet"));
        assert!(StepList::plain(&[]).to_string().contains("No steps"));
    }
}
