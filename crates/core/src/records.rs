//! Raw result set returned by the CRM read call.
//!
//! Records are carried verbatim; reads are defensive, with absent or null
//! properties mapped to per-call defaults instead of errors.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(default)]
    pub properties: serde_json::Map<String, Value>,
}

impl Record {
    pub fn text(&self, name: &str) -> Option<&str> {
        self.properties.get(name).and_then(Value::as_str)
    }

    pub fn text_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.text(name).unwrap_or(default)
    }

    /// Lenient numeric read: missing, null, or non-numeric values count
    /// as zero so aggregations never fail on dirty data.
    pub fn number(&self, name: &str) -> f64 {
        match self.properties.get(name) {
            Some(Value::Number(number)) => number.as_f64().unwrap_or(0.0),
            Some(Value::String(text)) => text.trim().parse().unwrap_or(0.0),
            _ => 0.0,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResultSet {
    pub results: Vec<Record>,
    pub error: Option<String>,
}

impl ResultSet {
    /// Build a result set from a successful response payload. A missing
    /// `results` key is an empty list, not an error; malformed elements
    /// degrade to empty records.
    pub fn from_payload(payload: &Value) -> Self {
        let results = payload
            .get("results")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .map(|item| serde_json::from_value(item.clone()).unwrap_or_default())
                    .collect()
            })
            .unwrap_or_default();
        Self { results, error: None }
    }

    pub fn from_error(detail: impl Into<String>) -> Self {
        Self { results: Vec::new(), error: Some(detail.into()) }
    }
}
