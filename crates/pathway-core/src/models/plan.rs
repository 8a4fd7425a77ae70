//! Career plan resource as served by the plan service.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{PlanId, PlanStatus};

/// A generated learning plan.
///
/// Plans are not scoped by user on the server; ownership is tracked locally
/// (see [`crate::tracker::OwnershipIndex`]).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", try_from = "WirePlan")]
pub struct CareerPlan {
    /// Server-assigned identifier
    pub id: PlanId,

    /// Role the user wants to reach
    pub target_role: String,

    /// Role the user holds today
    pub current_role: String,

    /// Generation status
    pub status: PlanStatus,

    /// Generated document, present once generation produced something
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_content: Option<Value>,
}

impl CareerPlan {
    /// Whether the plan can be shown: either the service marked it complete,
    /// or it already carries content longer than `threshold` characters.
    pub fn is_ready(&self, threshold: usize) -> bool {
        self.status == PlanStatus::Complete || self.content_len() > threshold
    }

    /// Length of the generated content as text. String payloads count their
    /// own characters; structured payloads count their JSON encoding.
    pub fn content_len(&self) -> usize {
        match &self.generated_content {
            None | Some(Value::Null) => 0,
            Some(Value::String(text)) => text.chars().count(),
            Some(other) => other.to_string().chars().count(),
        }
    }
}

/// Field layout accepted from the service. Each field may arrive under its
/// English name or under the name used by the generation backend.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WirePlan {
    #[serde(default)]
    id: Option<PlanId>,
    #[serde(default)]
    id_trilha: Option<PlanId>,
    #[serde(default)]
    target_role: Option<String>,
    #[serde(default)]
    titulo_objetivo: Option<String>,
    #[serde(default)]
    current_role: Option<String>,
    #[serde(default)]
    cargo_atual: Option<String>,
    #[serde(default)]
    status: Option<PlanStatus>,
    #[serde(default)]
    generated_content: Option<Value>,
    #[serde(default, rename = "dadosJsonIA")]
    dados_json_ia: Option<Value>,
}

impl TryFrom<WirePlan> for CareerPlan {
    type Error = String;

    fn try_from(wire: WirePlan) -> Result<Self, Self::Error> {
        let id = wire
            .id_trilha
            .or(wire.id)
            .ok_or_else(|| "plan is missing an identifier".to_string())?;

        Ok(Self {
            id,
            target_role: wire.target_role.or(wire.titulo_objetivo).unwrap_or_default(),
            current_role: wire.current_role.or(wire.cargo_atual).unwrap_or_default(),
            status: wire.status.unwrap_or_default(),
            generated_content: wire
                .generated_content
                .or(wire.dados_json_ia)
                .filter(|v| !v.is_null()),
        })
    }
}

/// A listing response: either a page object or a bare array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum PlanListing {
    /// `{ "content": [...], ... }`
    Page { content: Vec<CareerPlan> },
    /// `[...]`
    Bare(Vec<CareerPlan>),
}

impl PlanListing {
    pub fn into_plans(self) -> Vec<CareerPlan> {
        match self {
            PlanListing::Page { content } => content,
            PlanListing::Bare(plans) => plans,
        }
    }
}
