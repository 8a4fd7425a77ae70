//! Server-assigned plan identifiers.

use std::{fmt, str::FromStr};

use serde::{de, Deserialize, Deserializer, Serialize};

use crate::error::PathwayError;

/// Numeric identifier of a career plan.
///
/// The service may send identifiers as JSON numbers or numeric strings; both
/// decode to the same value and always compare numerically, so `"10"` is
/// newer than `"9"`.
///
/// ```rust
/// use pathway_core::models::PlanId;
///
/// let nine: PlanId = "9".parse().unwrap();
/// let ten: PlanId = "10".parse().unwrap();
/// assert!(nine < ten);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct PlanId(u64);

impl PlanId {
    /// Identifier carried by locally synthesized plans that never received
    /// one from the service.
    pub const UNASSIGNED: PlanId = PlanId(0);

    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u64 {
        self.0
    }

    /// Whether this identifier was handed out by the service.
    pub const fn is_assigned(self) -> bool {
        self.0 != 0
    }

    /// The identifier the service would assign after this one.
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for PlanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for PlanId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl FromStr for PlanId {
    type Err = PathwayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u64>().map(Self).map_err(|_| {
            PathwayError::invalid_input("id").with_reason(format!("'{s}' is not a numeric plan id"))
        })
    }
}

impl<'de> Deserialize<'de> for PlanId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Number(u64),
            Text(String),
        }

        match Wire::deserialize(deserializer)? {
            Wire::Number(value) => Ok(Self(value)),
            Wire::Text(text) => text.parse().map_err(de::Error::custom),
        }
    }
}
