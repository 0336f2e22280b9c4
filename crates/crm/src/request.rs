//! Maps a validated intent onto a concrete API request.
//!
//! Pure and deterministic: the same intent always yields an identical
//! request, and the intent itself is never mutated.

use hublens_core::{Catalog, QueryIntent, StageVocabulary};
use secrecy::{ExposeSecret, SecretString};
use serde_json::{json, Value};

/// Hard page-size cap enforced by the remote API.
pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiRequest {
    pub url: String,
    /// `limit`, `properties`, and (only when filters exist) `filterGroups`.
    pub query: Vec<(String, String)>,
    pub authorization: String,
}

pub fn build_request(
    intent: &QueryIntent,
    catalog: &Catalog,
    stages: &StageVocabulary,
    base_url: &str,
    access_token: &SecretString,
) -> ApiRequest {
    let entry = catalog.entry_for(&intent.object_type);

    let limit = intent.limit.clamp(1, MAX_PAGE_SIZE);
    let properties = if intent.properties.is_empty() {
        entry.default_properties.iter().take(3).copied().collect::<Vec<_>>().join(",")
    } else {
        intent.properties.join(",")
    };

    let mut query = vec![
        ("limit".to_string(), limit.to_string()),
        ("properties".to_string(), properties),
    ];

    let filter_groups: Vec<Value> = intent
        .filters
        .iter()
        .map(|(key, value)| {
            // Free-text stage references resolve to internal codes; every
            // other filter value passes through as a literal.
            let resolved = if key == "dealstage" && intent.object_type == "deals" {
                stages.code_for(value)
            } else {
                value.as_str()
            };
            json!({
                "filters": [{
                    "propertyName": key,
                    "operator": "EQ",
                    "value": resolved,
                }]
            })
        })
        .collect();
    if !filter_groups.is_empty() {
        query.push(("filterGroups".to_string(), Value::Array(filter_groups).to_string()));
    }

    ApiRequest {
        url: format!("{}{}", base_url.trim_end_matches('/'), entry.path),
        query,
        authorization: format!("Bearer {}", access_token.expose_secret()),
    }
}
