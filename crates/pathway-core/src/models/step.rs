//! Steps of a generated learning plan.

use serde::{Deserialize, Serialize};

/// Title shown when a step carries none.
pub const UNTITLED_STEP: &str = "Untitled step";

/// Description shown when a step carries none.
pub const NO_DESCRIPTION: &str = "No description.";

/// One step of a learning plan, as decoded from generated content.
///
/// Every field is optional in the source document. Use the `display_*`
/// accessors for the presentation fallbacks.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Step {
    /// Short title of the step
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// What the step asks the learner to do
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Kind of step (course, project, reading, ...)
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub step_type: Option<String>,
}

impl Step {
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(UNTITLED_STEP)
    }

    pub fn display_description(&self) -> &str {
        self.description.as_deref().unwrap_or(NO_DESCRIPTION)
    }
}
