//! Query Intent: the validated, structured form of a user question.
//!
//! The interpreter's reply arrives as loosely-typed JSON; every field is
//! independently optional and gets an explicit default here. The raw
//! `object_type` string is preserved as given so unknown types (for
//! example "products") still render a generic header downstream.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::catalog::Catalog;

pub const DEFAULT_LIMIT: u32 = 10;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryType {
    #[default]
    List,
    Count,
    Total,
}

impl SummaryType {
    /// Unrecognized values normalize to `List` rather than erroring.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "count" => Self::Count,
            "total" => Self::Total,
            _ => Self::List,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Count => "count",
            Self::Total => "total",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryIntent {
    /// Raw object type as returned by the interpreter, case preserved.
    pub object_type: String,
    pub filters: BTreeMap<String, String>,
    pub properties: Vec<String>,
    pub limit: u32,
    pub summary_type: SummaryType,
}

impl QueryIntent {
    /// The deterministic intent substituted when interpretation fails.
    pub fn fallback() -> Self {
        Self {
            object_type: "deals".to_string(),
            filters: BTreeMap::new(),
            properties: vec!["dealname".to_string(), "amount".to_string()],
            limit: DEFAULT_LIMIT,
            summary_type: SummaryType::List,
        }
    }

    /// Validate a raw interpreter reply into an intent.
    ///
    /// Returns `None` only when the reply is not a JSON object; within an
    /// object every field is optional and unknown fields are ignored.
    pub fn from_reply(reply: &Value, catalog: &Catalog) -> Option<Self> {
        let fields = reply.as_object()?;

        let object_type = fields
            .get("object_type")
            .and_then(Value::as_str)
            .unwrap_or("deals")
            .to_string();

        let filters = fields
            .get("filters")
            .and_then(Value::as_object)
            .map(|raw_filters| {
                raw_filters
                    .iter()
                    .filter_map(|(key, value)| {
                        filter_value(value).map(|value| (key.clone(), value))
                    })
                    .collect()
            })
            .unwrap_or_default();

        let mut properties: Vec<String> = fields
            .get("properties")
            .and_then(Value::as_array)
            .map(|raw_properties| {
                raw_properties
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        if properties.is_empty() {
            let entry = catalog.entry_for(&object_type);
            properties =
                entry.default_properties.iter().take(3).map(|name| name.to_string()).collect();
        }

        let limit = fields
            .get("limit")
            .and_then(Value::as_u64)
            .map(|limit| limit.min(u32::MAX as u64) as u32)
            .unwrap_or(DEFAULT_LIMIT);

        let summary_type = fields
            .get("summary_type")
            .and_then(Value::as_str)
            .map(SummaryType::parse)
            .unwrap_or_default();

        Some(Self { object_type, filters, properties, limit, summary_type })
    }
}

/// Filter values are strings as far as the pipeline is concerned; numeric
/// JSON values are carried over as their literal rendering, anything else
/// is dropped.
fn filter_value(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}
