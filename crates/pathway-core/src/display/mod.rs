//! Markdown formatting for terminal output.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! collections and operation results are wrapped in newtypes so the same data
//! can be shown differently depending on context. Every formatter produces
//! markdown, which the CLI renders with termimad.
//!
//! ```rust
//! use pathway_core::display::OperationStatus;
//!
//! let status = OperationStatus::success("Signed in as ana@example.com");
//! assert!(status.to_string().contains("Success:"));
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

pub use collections::{PlanSummaries, StepList};
pub use datetime::LocalDateTime;
pub use results::ToggleResult;
pub use status::OperationStatus;
