//! Locally cached profile and its synchronization with the service.

use std::sync::Arc;

use jiff::Timestamp;
use log::info;

use crate::{
    api::PlanService,
    error::Result,
    models::Profile,
    store::{keys, Store},
};

/// Reads and writes the cached profile.
#[derive(Clone)]
pub struct ProfileStore {
    store: Store,
}

impl ProfileStore {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Loads the cached profile; an absent or unreadable record yields an
    /// empty profile.
    pub async fn load(&self) -> Result<Profile> {
        self.store.get_json_or_default(keys::PROFILE).await
    }

    /// Stores the profile, stamping `updated_at`.
    pub async fn save(&self, mut profile: Profile) -> Result<Profile> {
        profile.updated_at = Some(Timestamp::now());
        self.store.set_json(keys::PROFILE, &profile).await?;
        Ok(profile)
    }

    /// Updates name and/or job title. Empty strings clear the field.
    pub async fn update_details(
        &self,
        name: Option<&str>,
        job_title: Option<&str>,
    ) -> Result<Profile> {
        let mut profile = self.load().await?;
        let normalize = |value: &str| {
            let value = value.trim();
            (!value.is_empty()).then(|| value.to_string())
        };
        if let Some(name) = name {
            profile.name = normalize(name);
        }
        if let Some(job_title) = job_title {
            profile.job_title = normalize(job_title);
        }
        self.save(profile).await
    }

    /// Adds a skill. Returns `true` when the skill was new and got saved.
    pub async fn add_skill(&self, skill: &str) -> Result<bool> {
        let mut profile = self.load().await?;
        if !profile.add_skill(skill) {
            return Ok(false);
        }
        self.save(profile).await?;
        Ok(true)
    }

    /// Removes a skill. Returns `true` when it was present.
    pub async fn remove_skill(&self, skill: &str) -> Result<bool> {
        let mut profile = self.load().await?;
        if !profile.remove_skill(skill) {
            return Ok(false);
        }
        self.save(profile).await?;
        Ok(true)
    }

    /// Replaces the cached profile with the remote one.
    pub async fn pull(&self, service: &Arc<dyn PlanService>) -> Result<Profile> {
        let remote = service.get_profile().await?;
        info!("Pulled profile with {} skills", remote.skills.len());
        self.save(remote).await
    }

    /// Sends the cached profile to the service and caches its answer.
    pub async fn push(&self, service: &Arc<dyn PlanService>) -> Result<Profile> {
        let local = self.load().await?;
        let stored = service.update_profile(&local).await?;
        info!("Pushed profile with {} skills", stored.skills.len());
        self.save(stored).await
    }
}
