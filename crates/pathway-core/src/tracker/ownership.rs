//! Local record of which plans the user created.
//!
//! The service lists every plan regardless of author, so "My Plans" is the
//! intersection of this record with the service listing.

use std::collections::HashSet;

use log::debug;

use crate::{
    error::Result,
    models::{CareerPlan, PlanId},
    store::{keys, Store},
};

/// Per-user sets of owned plan identifiers.
#[derive(Debug, Clone)]
pub struct OwnershipIndex {
    store: Store,
}

impl OwnershipIndex {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Identifiers owned by `email`, in the order they were recorded.
    pub async fn plan_ids(&self, email: &str) -> Result<Vec<PlanId>> {
        self.store.get_json_or_default(&keys::ownership(email)).await
    }

    /// Records `plan_id` as owned by `email`. Returns `false` when it was
    /// already recorded or is unassigned.
    pub async fn record(&self, email: &str, plan_id: PlanId) -> Result<bool> {
        if !plan_id.is_assigned() {
            return Ok(false);
        }

        let mut ids = self.plan_ids(email).await?;
        if ids.contains(&plan_id) {
            return Ok(false);
        }

        ids.push(plan_id);
        self.store.set_json(&keys::ownership(email), &ids).await?;
        debug!("Recorded plan {plan_id} for {email}");
        Ok(true)
    }

    /// Keeps the plans owned by `email`, preserving the listing order.
    pub async fn filter_owned(&self, email: &str, plans: Vec<CareerPlan>) -> Result<Vec<CareerPlan>> {
        let owned: HashSet<PlanId> = self.plan_ids(email).await?.into_iter().collect();
        Ok(plans
            .into_iter()
            .filter(|plan| owned.contains(&plan.id))
            .collect())
    }
}
