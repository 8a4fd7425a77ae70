//! Builder for creating and configuring Pathway instances.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use super::Pathway;
use crate::{
    api::{http::DEFAULT_REQUEST_TIMEOUT, HttpPlanService, PlanService},
    config::{TrackerConfig, DEFAULT_BASE_URL},
    error::{PathwayError, Result},
    store::Store,
};

/// Builder for creating and configuring [`Pathway`] instances.
#[derive(Clone)]
pub struct PathwayBuilder {
    database_path: Option<PathBuf>,
    base_url: String,
    request_timeout: Duration,
    tracker_config: TrackerConfig,
    service: Option<Arc<dyn PlanService>>,
}

impl PathwayBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            database_path: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            tracker_config: TrackerConfig::default(),
            service: None,
        }
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/pathway/pathway.db` or
    /// `~/.local/share/pathway/pathway.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Sets the plan service address.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the timeout of individual HTTP requests.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_tracker_config(mut self, config: TrackerConfig) -> Self {
        self.tracker_config = config;
        self
    }

    /// Uses `service` instead of an HTTP client. The base URL and request
    /// timeout are then ignored.
    pub fn with_service(mut self, service: Arc<dyn PlanService>) -> Self {
        self.service = Some(service);
        self
    }

    /// Opens the store, connects the service and restores any persisted
    /// session.
    ///
    /// # Errors
    ///
    /// Returns `PathwayError::FileSystem` if the database path is invalid,
    /// `PathwayError::Database` if database initialization fails and
    /// `PathwayError::Configuration` for an unusable base URL.
    pub async fn build(self) -> Result<Pathway> {
        let db_path = match self.database_path {
            Some(path) => path,
            None => Self::default_database_path()?,
        };
        let store = Store::open(&db_path).await?;

        let service = match self.service {
            Some(service) => service,
            None => Arc::new(HttpPlanService::new(&self.base_url, self.request_timeout)?),
        };

        let pathway = Pathway::new(service, store, self.tracker_config);
        pathway.session().restore().await;
        Ok(pathway)
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("pathway")
            .place_data_file("pathway.db")
            .map_err(|e| PathwayError::XdgDirectory(e.to_string()))
    }
}

impl Default for PathwayBuilder {
    fn default() -> Self {
        Self::new()
    }
}
