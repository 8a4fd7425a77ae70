//! Data models for plans, steps, sessions and profiles.
//!
//! Wire-facing types ([`CareerPlan`], [`PlanStatus`], [`PlanId`]) are
//! deliberately lenient when decoding: the plan service has shipped several
//! field spellings over time and this client accepts all of them. Encoding
//! always uses the canonical camelCase English names.
//!
//! Markdown `Display` implementations for these models live in
//! [`crate::display::models`].

pub mod plan;
pub mod plan_id;
pub mod profile;
pub mod session;
pub mod status;
pub mod step;
pub mod summary;


pub use plan::{CareerPlan, PlanListing};
pub use plan_id::PlanId;
pub use profile::{Profile, DEFAULT_CURRENT_ROLE};
pub use session::{Session, SessionState, UserIdentity};
pub use status::PlanStatus;
pub use step::Step;
pub use summary::{PlanSummary, ProgressState};
