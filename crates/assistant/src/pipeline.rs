use std::time::Duration;

use anyhow::Result;
use hublens_agent::{Interpreter, LlmClient, OpenAiClient};
use hublens_core::config::AppConfig;
use hublens_core::{format_response, Catalog, QueryIntent, ResultSet, StageVocabulary};
use hublens_crm::{build_request, CrmClient};
use reqwest::Client;
use secrecy::SecretString;
use tracing::info;

/// One pipeline instance per process; per-user state (credentials, chat
/// history) stays with the front-end and is passed into each call.
pub struct Assistant {
    config: AppConfig,
    llm_http: Client,
    crm: CrmClient,
    catalog: Catalog,
    stages: StageVocabulary,
}

impl Assistant {
    /// Errors only on catastrophic misconfiguration (HTTP client setup).
    pub fn new(config: AppConfig) -> Result<Self> {
        let llm_http =
            Client::builder().timeout(Duration::from_secs(config.llm.timeout_secs)).build()?;
        let crm_http =
            Client::builder().timeout(Duration::from_secs(config.crm.timeout_secs)).build()?;

        Ok(Self {
            config,
            llm_http,
            crm: CrmClient::new(crm_http),
            catalog: Catalog::new(),
            stages: StageVocabulary::new(),
        })
    }

    /// Interpret, build, fetch, format - strictly in that order, each query
    /// independent of any previous one. Always returns display text.
    pub async fn process(
        &self,
        user_query: &str,
        crm_token: &SecretString,
        llm_token: &SecretString,
    ) -> String {
        let llm = OpenAiClient::new(
            self.llm_http.clone(),
            self.config.llm.base_url.clone(),
            self.config.llm.model.clone(),
            llm_token.clone(),
        );
        self.process_with(&llm, user_query, crm_token).await
    }

    /// Same pipeline with the language-model seam injected; the public
    /// entry wires in the configured client.
    pub async fn process_with(
        &self,
        llm: &dyn LlmClient,
        user_query: &str,
        crm_token: &SecretString,
    ) -> String {
        let interpreter = Interpreter::new(llm, &self.catalog, &self.stages);
        let intent = interpreter.interpret(user_query).await;
        info!(
            object_type = %intent.object_type,
            summary_type = intent.summary_type.as_str(),
            filter_count = intent.filters.len(),
            limit = intent.limit,
            "query interpreted"
        );

        let request = build_request(
            &intent,
            &self.catalog,
            &self.stages,
            &self.config.crm.base_url,
            crm_token,
        );
        let result_set = self.crm.fetch(&request).await;
        info!(
            result_count = result_set.results.len(),
            fetch_error = result_set.error.is_some(),
            "crm fetch completed"
        );

        self.render(&result_set, &intent)
    }

    pub fn render(&self, result_set: &ResultSet, intent: &QueryIntent) -> String {
        format_response(result_set, intent, &self.stages)
    }
}
