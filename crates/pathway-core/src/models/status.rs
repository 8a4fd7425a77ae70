//! Generation status of a career plan.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Server-side generation status of a plan.
///
/// Decoding accepts the English names as well as the names used by the
/// generation backend (`PENDENTE`, `PROCESSANDO`, `CONCLUIDA`, `ERRO`).
/// Anything else decodes as [`PlanStatus::Unknown`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", from = "String")]
pub enum PlanStatus {
    /// Accepted, generation not started
    #[default]
    Pending,

    /// Generation in progress
    Processing,

    /// Generated content is available
    Complete,

    /// Generation failed
    Error,

    /// Status value this client does not recognise
    Unknown,
}

impl FromStr for PlanStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "PENDING" | "PENDENTE" => Ok(PlanStatus::Pending),
            "PROCESSING" | "PROCESSANDO" => Ok(PlanStatus::Processing),
            "COMPLETE" | "COMPLETED" | "CONCLUIDA" => Ok(PlanStatus::Complete),
            "ERROR" | "ERRO" => Ok(PlanStatus::Error),
            _ => Err(format!("Invalid plan status: {s}")),
        }
    }
}

impl From<String> for PlanStatus {
    fn from(value: String) -> Self {
        value.parse().unwrap_or(PlanStatus::Unknown)
    }
}

impl PlanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanStatus::Pending => "PENDING",
            PlanStatus::Processing => "PROCESSING",
            PlanStatus::Complete => "COMPLETE",
            PlanStatus::Error => "ERROR",
            PlanStatus::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for PlanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
