//! Display implementations for domain models.

use std::fmt;

use super::{collections::StepList, datetime::LocalDateTime};
use crate::{
    models::{PlanSummary, Profile, ProgressState, SessionState},
    progress::PlanProgress,
};

impl fmt::Display for ProgressState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgressState::Processing => write!(f, "Generating..."),
            ProgressState::NotStarted => write!(f, "Not started"),
            ProgressState::InProgress { percent } => write!(f, "In progress ({percent:.0}%)"),
            ProgressState::Finished => write!(f, "Finished"),
        }
    }
}

impl fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {} (ID: {})", self.target_role, self.id)?;
        writeln!(f)?;
        writeln!(f, "- **Status**: {}", self.progress)?;
        if self.total_steps > 0 {
            writeln!(
                f,
                "- **Steps**: {}/{}",
                self.completed_steps, self.total_steps
            )?;
        }
        writeln!(f)
    }
}

impl fmt::Display for PlanProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plan = &self.plan;
        writeln!(f, "# {} (ID: {})", plan.target_role, plan.id)?;
        writeln!(f)?;
        writeln!(f, "- Status: {}", plan.status)?;
        if !plan.current_role.is_empty() {
            writeln!(f, "- From: {}", plan.current_role)?;
        }
        writeln!(
            f,
            "- Progress: {}/{} steps ({:.0}%)",
            self.completed_count(),
            self.steps.len(),
            self.percent()
        )?;
        if self.is_fully_completed() {
            writeln!(f, "\nAll steps completed. Well done!")?;
        }
        writeln!(f, "\n## Steps")?;
        writeln!(f)?;
        write!(f, "{}", StepList::with_progress(&self.steps, &self.completed))
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Profile")?;
        writeln!(f)?;
        writeln!(f, "- Name: {}", self.name.as_deref().unwrap_or("(not set)"))?;
        writeln!(f, "- Current role: {}", self.current_role())?;
        if let Some(updated_at) = &self.updated_at {
            writeln!(f, "- Updated: {}", LocalDateTime(updated_at))?;
        }

        writeln!(f, "\n## Skills")?;
        writeln!(f)?;
        if self.skills.is_empty() {
            writeln!(f, "No skills yet. Completing plan steps adds them here.")?;
        }
        for skill in &self.skills {
            writeln!(f, "- {skill}")?;
        }
        Ok(())
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Loading => writeln!(f, "Session is loading."),
            SessionState::SignedOut => writeln!(f, "Not signed in."),
            SessionState::SignedIn(session) => writeln!(
                f,
                "Signed in as **{}** ({})",
                session.user.display_name, session.user.email
            ),
        }
    }
}
