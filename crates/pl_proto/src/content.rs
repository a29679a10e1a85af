//! Content helpers shared by the envelope builder.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::schema::{ActType, ActionItem, ValueType};

/// Most actions a single notification may carry.
pub const MAX_ACTIONS: usize = 4;

/// Named timeline entry. The value is lenient on purpose: it arrives from
/// untyped JSON, and only signed 64-bit integers and 64-bit floats survive
/// encoding — anything else is skipped, not rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeItem {
    pub name: String,
    pub value: Value,
}

impl TimeItem {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self { name: name.into(), value: value.into() }
    }

    /// Coerce to a wire item, or None when the value kind is unsupported.
    pub(crate) fn to_wire(&self) -> Option<crate::schema::TimeItem> {
        if let Some(v) = self.value.as_i64() {
            return Some(crate::schema::TimeItem {
                value_type: ValueType::Integer as i32,
                name: self.name.clone(),
                integer_value: v,
                double_value: 0.0,
            });
        }
        if let Some(v) = self.value.as_f64() {
            return Some(crate::schema::TimeItem {
                value_type: ValueType::Double as i32,
                name: self.name.clone(),
                integer_value: 0,
                double_value: v,
            });
        }
        None
    }
}

/// Parse `"name|link"` action strings. Entries without a `|` are dropped,
/// order is preserved, and at most [`MAX_ACTIONS`] entries are kept.
pub(crate) fn parse_actions(actions: &[String]) -> Vec<ActionItem> {
    actions
        .iter()
        .take(MAX_ACTIONS)
        .filter_map(|act| {
            let (name, link) = act.split_once('|')?;
            Some(ActionItem {
                act_type: ActType::Url as i32,
                name: name.to_string(),
                link: link.to_string(),
            })
        })
        .collect()
}
