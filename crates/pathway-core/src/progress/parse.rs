//! Tolerant decoding of generated plan content into steps.
//!
//! Generated content has no fixed shape. It may be a JSON document, or a
//! string holding JSON wrapped in a Markdown code fence, and the step list
//! may sit at the top level or under one of several keys. Decoding tries
//! each known shape in a fixed order and gives up quietly: content that
//! cannot be understood yields no steps.

use log::warn;
use serde_json::{Map, Value};

use crate::models::{CareerPlan, Step};

/// Code-fence markers removed from string payloads, longest first.
const FENCE_MARKERS: [&str; 2] = ["```json", "```"];

/// Keys that may hold the step list, in priority order.
const STEP_LIST_KEYS: [&str; 3] = ["steps", "trilha", "passos"];

const TITLE_KEYS: [&str; 3] = ["title", "titulo", "nome"];
const DESCRIPTION_KEYS: [&str; 3] = ["description", "descricao", "conteudo"];
const TYPE_KEYS: [&str; 2] = ["type", "tipo"];

/// String payloads may hold JSON that itself holds a string payload.
const MAX_NESTING: usize = 3;

/// Removes every known code-fence marker and surrounding whitespace.
pub fn strip_fences(raw: &str) -> String {
    FENCE_MARKERS
        .iter()
        .fold(raw.to_string(), |text, marker| text.replace(marker, ""))
        .trim()
        .to_string()
}

/// Finds the raw step entries inside generated content.
pub fn decode_step_list(content: &Value) -> Option<Vec<Value>> {
    decode_at_depth(content, 0)
}

fn decode_at_depth(content: &Value, depth: usize) -> Option<Vec<Value>> {
    if depth > MAX_NESTING {
        return None;
    }

    match content {
        Value::Array(items) => Some(items.clone()),
        Value::Object(map) => STEP_LIST_KEYS
            .iter()
            .filter_map(|key| map.get(*key))
            .find_map(|value| decode_at_depth(value, depth + 1)),
        Value::String(raw) => {
            let parsed: Value = serde_json::from_str(&strip_fences(raw)).ok()?;
            decode_at_depth(&parsed, depth + 1)
        }
        _ => None,
    }
}

fn first_text(map: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| map.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .find(|text| !text.is_empty())
        .map(String::from)
}

fn to_step(entry: &Value) -> Step {
    match entry {
        Value::Object(map) => Step {
            title: first_text(map, &TITLE_KEYS),
            description: first_text(map, &DESCRIPTION_KEYS),
            step_type: first_text(map, &TYPE_KEYS),
        },
        Value::String(title) if !title.trim().is_empty() => Step {
            title: Some(title.trim().to_string()),
            ..Step::default()
        },
        _ => Step::default(),
    }
}

/// Decodes generated content into ordered steps. Never fails: absent or
/// unrecognised content yields an empty list.
pub fn parse_steps(content: Option<&Value>) -> Vec<Step> {
    let Some(content) = content else {
        return Vec::new();
    };

    match decode_step_list(content) {
        Some(entries) => entries.iter().map(to_step).collect(),
        None => {
            warn!("Generated content has no recognisable step list; showing no steps");
            Vec::new()
        }
    }
}

/// Steps of a plan's generated content.
pub fn plan_steps(plan: &CareerPlan) -> Vec<Step> {
    parse_steps(plan.generated_content.as_ref())
}
