//! User profile.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Role assumed for a new plan when the profile names none.
pub const DEFAULT_CURRENT_ROLE: &str = "Professional in transition";

/// Profile cached locally and mirrored to the service.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Current job title, used as the starting role of new plans
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,

    /// Skills in the order they were added, without duplicates
    #[serde(default)]
    pub skills: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
}

impl Profile {
    /// Adds a trimmed skill unless it is empty or already present.
    /// Returns whether the profile changed.
    pub fn add_skill(&mut self, skill: &str) -> bool {
        let skill = skill.trim();
        if skill.is_empty() || self.skills.iter().any(|s| s == skill) {
            return false;
        }
        self.skills.push(skill.to_string());
        true
    }

    /// Removes a skill. Returns whether it was present.
    pub fn remove_skill(&mut self, skill: &str) -> bool {
        let before = self.skills.len();
        self.skills.retain(|s| s != skill.trim());
        self.skills.len() != before
    }

    /// Role used as the starting point of a new plan.
    pub fn current_role(&self) -> &str {
        self.job_title
            .as_deref()
            .map(str::trim)
            .filter(|title| !title.is_empty())
            .unwrap_or(DEFAULT_CURRENT_ROLE)
    }
}
