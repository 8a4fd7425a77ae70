//! Locally synthesized plans shown when the service cannot deliver one.
//!
//! A timed-out plan keeps its synthesized content in the local store, so it
//! can be reopened and its steps toggled while the service copy is still
//! empty.

use log::debug;
use serde_json::json;

use crate::{
    error::Result,
    models::{CareerPlan, PlanId, PlanStatus},
    store::{keys, Store},
};

/// A generic five-step plan from `current_role` to `target_role`.
///
/// Used when generation does not finish in time and when the service was
/// unreachable before submitting. The content decodes like service-generated
/// content. Timed-out plans are kept in a [`PlaceholderStore`]; demo plans
/// have no identifier and are not kept.
pub fn placeholder_plan(id: PlanId, target_role: &str, current_role: &str) -> CareerPlan {
    let steps = json!({
        "steps": [
            {
                "title": format!("Foundations of {target_role}"),
                "description": format!(
                    "Review the core concepts and vocabulary a {target_role} works with every day."
                ),
                "type": "course",
            },
            {
                "title": "Skill gap analysis",
                "description": format!(
                    "List what you already do as {current_role} and mark what a {target_role} still needs."
                ),
                "type": "exercise",
            },
            {
                "title": "Guided hands-on practice",
                "description": "Follow a hands-on tutorial that covers the main tools of the role.",
                "type": "practice",
            },
            {
                "title": "Portfolio project",
                "description": format!("Build a small project that shows {target_role} skills end to end."),
                "type": "project",
            },
            {
                "title": "Certification and community",
                "description": "Pick a recognised certification or community and set a date for it.",
                "type": "milestone",
            },
        ]
    });

    CareerPlan {
        id,
        target_role: target_role.to_string(),
        current_role: current_role.to_string(),
        status: PlanStatus::Complete,
        generated_content: Some(steps),
    }
}

/// Synthesized plans kept per identifier.
#[derive(Debug, Clone)]
pub struct PlaceholderStore {
    store: Store,
}

impl PlaceholderStore {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Keeps `plan` under its identifier. Unassigned plans are skipped.
    pub async fn save(&self, plan: &CareerPlan) -> Result<()> {
        if !plan.id.is_assigned() {
            return Ok(());
        }
        self.store.set_json(&keys::placeholder(plan.id), plan).await?;
        debug!("Stored placeholder content for plan {}", plan.id);
        Ok(())
    }

    pub async fn load(&self, id: PlanId) -> Result<Option<CareerPlan>> {
        self.store.get_json(&keys::placeholder(id)).await
    }

    /// Returns `plan` unchanged once it is ready. Before that, a stored
    /// placeholder supplies the content and the service status is kept.
    pub async fn resolve(&self, plan: CareerPlan, threshold: usize) -> Result<CareerPlan> {
        if plan.is_ready(threshold) {
            return Ok(plan);
        }
        Ok(match self.load(plan.id).await? {
            Some(stored) => CareerPlan {
                generated_content: stored.generated_content,
                ..plan
            },
            None => plan,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::plan_steps;
    use tempfile::TempDir;

    async fn create_test_placeholders() -> (TempDir, PlaceholderStore) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = Store::open(temp_dir.path().join("test.db"))
            .await
            .expect("Failed to open store");
        (temp_dir, PlaceholderStore::new(store))
    }

    fn pending(id: u64) -> CareerPlan {
        CareerPlan {
            id: PlanId::new(id),
            target_role: "Cloud Architect".to_string(),
            current_role: "Sysadmin".to_string(),
            status: PlanStatus::Processing,
            generated_content: None,
        }
    }

    #[test]
    fn test_placeholder_decodes_to_steps() {
        let plan = placeholder_plan(PlanId::new(7), "Cloud Architect", "Sysadmin");
        let steps = plan_steps(&plan);

        assert_eq!(steps.len(), 5);
        assert_eq!(steps[0].display_title(), "Foundations of Cloud Architect");
        assert!(steps.iter().all(|s| s.title.is_some() && s.description.is_some()));
        assert!(plan.is_ready(20));
    }

    #[tokio::test]
    async fn test_stored_placeholder_fills_plan_until_ready() {
        let (_temp_dir, placeholders) = create_test_placeholders().await;
        placeholders
            .save(&placeholder_plan(PlanId::new(7), "Cloud Architect", "Sysadmin"))
            .await
            .expect("save");

        let resolved = placeholders.resolve(pending(7), 20).await.expect("resolve");
        assert_eq!(resolved.status, PlanStatus::Processing);
        assert_eq!(plan_steps(&resolved).len(), 5);

        let generated = CareerPlan {
            status: PlanStatus::Complete,
            generated_content: Some(json!({"steps": [{"title": "Real step"}]})),
            ..pending(7)
        };
        let resolved = placeholders.resolve(generated.clone(), 20).await.expect("resolve");
        assert_eq!(resolved, generated);
    }

    #[tokio::test]
    async fn test_unassigned_placeholder_is_not_stored() {
        let (_temp_dir, placeholders) = create_test_placeholders().await;
        placeholders
            .save(&placeholder_plan(PlanId::UNASSIGNED, "Cloud Architect", "Sysadmin"))
            .await
            .expect("save");

        assert_eq!(placeholders.load(PlanId::UNASSIGNED).await.expect("load"), None);
        let resolved = placeholders.resolve(pending(0), 20).await.expect("resolve");
        assert_eq!(resolved.generated_content, None);
    }
}
