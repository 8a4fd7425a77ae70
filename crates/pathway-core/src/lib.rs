//! Core library for the Pathway career-plan client.
//!
//! A signed-in user submits a career goal (a target role); the plan service
//! generates a step-by-step learning plan asynchronously. This crate finds
//! the plan the submission created, waits for its content, records which
//! plans belong to the user and tracks step completion locally.
//!
//! - [`session`]: sign in, sign up, sign out and restore on start-up
//! - [`tracker`]: plan generation attempts
//! - [`progress`]: step parsing and completion tracking
//! - [`api`]: the plan service contract and its HTTP client
//! - [`store`]: the local key-value store
//! - [`display`]: markdown formatting for the terminal
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use pathway_core::{CancelToken, PathwayBuilder, PlanId};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pathway = PathwayBuilder::new()
//!     .with_database_path(Some("pathway.db"))
//!     .build()
//!     .await?;
//!
//! pathway.session().sign_in("ana@example.com", "secret").await?;
//! pathway.generate("Cloud Architect", &CancelToken::new()).await?;
//!
//! for plan in pathway.my_plans().await? {
//!     println!("{plan}");
//! }
//!
//! let (outcome, progress) = pathway.toggle_step(PlanId::new(42), 0).await?;
//! println!("{} ({:.0}%)", outcome.checked, progress.percent());
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod db;
pub mod display;
pub mod error;
pub mod models;
pub mod pathway;
pub mod profile;
pub mod progress;
pub mod session;
pub mod store;
pub mod tracker;

// Re-export commonly used types
pub use api::{HttpPlanService, PlanService};
pub use config::{TrackerConfig, DEFAULT_BASE_URL};
pub use db::Database;
pub use display::{OperationStatus, PlanSummaries, StepList, ToggleResult};
pub use error::{PathwayError, Result};
pub use models::{
    CareerPlan, PlanId, PlanStatus, PlanSummary, Profile, ProgressState, Session, SessionState,
    Step, UserIdentity,
};
pub use pathway::{Pathway, PathwayBuilder};
pub use profile::ProfileStore;
pub use progress::{PlanProgress, ProgressTracker, ToggleOutcome};
pub use session::SessionManager;
pub use tracker::{
    CancelToken, GenerationOutcome, GenerationPhase, GenerationTracker, IdSource, ResolvedPlan,
};
