use hublens_core::ResultSet;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use tracing::error;

use crate::request::ApiRequest;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("crm request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("crm endpoint returned {status}: {body}")]
    Status { status: reqwest::StatusCode, body: String },
}

/// Read-only client for the remote objects API. One GET per query, no
/// retries, no pagination beyond the first page.
#[derive(Clone)]
pub struct CrmClient {
    client: Client,
}

impl CrmClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Never errors to the caller: any transport or status failure is
    /// logged and degraded to an error-carrying [`ResultSet`].
    pub async fn fetch(&self, request: &ApiRequest) -> ResultSet {
        match self.execute(request).await {
            Ok(payload) => ResultSet::from_payload(&payload),
            Err(fetch_error) => {
                error!(error = %fetch_error, url = %request.url, "crm fetch failed");
                ResultSet::from_error(fetch_error.to_string())
            }
        }
    }

    async fn execute(&self, request: &ApiRequest) -> Result<Value, FetchError> {
        let response = self
            .client
            .get(&request.url)
            .query(&request.query)
            .header("Authorization", &request.authorization)
            .header("Content-Type", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status { status, body: truncate(&body, 200) });
        }

        Ok(response.json().await?)
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
