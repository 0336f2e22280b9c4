//! Turns a free-form user question into a validated [`QueryIntent`].
//!
//! The system prompt embeds the known stage labels and a few worked
//! examples to steer the model toward the three object types and three
//! summary types. Every failure mode of the external call degrades to the
//! deterministic fallback intent; interpretation never errors.

use hublens_core::{Catalog, QueryIntent, StageVocabulary};
use serde_json::Value;
use tracing::warn;

use crate::llm::LlmClient;

pub struct Interpreter<'a> {
    llm: &'a dyn LlmClient,
    catalog: &'a Catalog,
    stages: &'a StageVocabulary,
}

impl<'a> Interpreter<'a> {
    pub fn new(llm: &'a dyn LlmClient, catalog: &'a Catalog, stages: &'a StageVocabulary) -> Self {
        Self { llm, catalog, stages }
    }

    pub async fn interpret(&self, user_query: &str) -> QueryIntent {
        let prompt = system_prompt(self.stages);
        let reply = match self.llm.complete(&prompt, user_query).await {
            Ok(reply) => reply,
            Err(error) => {
                warn!(error = %error, "query interpretation call failed, using fallback intent");
                return QueryIntent::fallback();
            }
        };

        match parse_reply(&reply, self.catalog) {
            Some(intent) => intent,
            None => {
                warn!(
                    reply_bytes = reply.len(),
                    "query interpretation reply was not a json object, using fallback intent"
                );
                QueryIntent::fallback()
            }
        }
    }
}

fn parse_reply(reply: &str, catalog: &Catalog) -> Option<QueryIntent> {
    let stripped = strip_code_fence(reply);
    let value: Value = serde_json::from_str(stripped).ok()?;
    QueryIntent::from_reply(&value, catalog)
}

/// Models sometimes wrap the JSON object in a markdown code fence even
/// when asked not to.
fn strip_code_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    let without_open = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    without_open.strip_suffix("```").unwrap_or(without_open).trim()
}

fn system_prompt(stages: &StageVocabulary) -> String {
    let stage_labels = stages.labels().collect::<Vec<_>>().join(", ");
    format!(
        r#"You are a CRM API query interpreter. Analyze the user's question and extract:
1. The object type they're asking about (deals, contacts, or companies)
2. Any filters they want to apply
3. What specific information they want to see

Available deal stages: {stage_labels}

Return a JSON object with:
- object_type: "deals", "contacts", or "companies"
- filters: object with filter criteria
- properties: array of properties to return
- limit: number of results (default 10)
- summary_type: "list", "count", "total" (for aggregations)

Examples:
"What deals are in negotiation?" -> {{"object_type": "deals", "filters": {{"dealstage": "decisionmakerboughtin"}}, "properties": ["dealname", "amount", "closedate"], "limit": 10, "summary_type": "list"}}
"How many contacts do we have?" -> {{"object_type": "contacts", "filters": {{}}, "properties": ["email"], "limit": 1000, "summary_type": "count"}}
"Total value of deals in contract sent stage?" -> {{"object_type": "deals", "filters": {{"dealstage": "contractsent"}}, "properties": ["amount"], "limit": 1000, "summary_type": "total"}}"#
    )
}
