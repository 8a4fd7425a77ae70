//! Plan summaries for the "My Plans" listing.

use serde::{Deserialize, Serialize};

use super::{PlanId, PlanStatus};

/// Where the user stands on a plan.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ProgressState {
    /// Generation has not completed yet
    Processing,
    NotStarted,
    InProgress { percent: f64 },
    Finished,
}

impl ProgressState {
    /// Classifies a completed plan by its completion percentage.
    pub fn from_percent(percent: f64) -> Self {
        if percent >= 100.0 {
            ProgressState::Finished
        } else if percent > 0.0 {
            ProgressState::InProgress { percent }
        } else {
            ProgressState::NotStarted
        }
    }
}

/// A plan owned by the current user, enriched with local progress.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanSummary {
    pub id: PlanId,
    pub target_role: String,
    pub status: PlanStatus,
    pub total_steps: usize,
    pub completed_steps: usize,
    pub percent: f64,
    pub progress: ProgressState,
}
