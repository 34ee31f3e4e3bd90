use crate::adapters::http::error_body;
use crate::domain::model::FeedbackReport;
use crate::domain::ports::ReportStore;
use crate::utils::error::{Result, TrustError};
use async_trait::async_trait;
use reqwest::Client;

pub const DEFAULT_REPORTS_TABLE: &str = "reports";

/// Inserts feedback rows through Supabase's PostgREST interface.
#[derive(Debug, Clone)]
pub struct SupabaseReportStore {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    table: String,
}

impl SupabaseReportStore {
    pub fn new(
        client: Client,
        base_url: impl Into<String>,
        api_key: Option<String>,
        table: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key,
            table: table.into(),
        }
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url.trim_end_matches('/'), self.table)
    }
}

#[async_trait]
impl ReportStore for SupabaseReportStore {
    async fn insert(&self, report: &FeedbackReport) -> Result<serde_json::Value> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| TrustError::PersistenceError {
                message: "SUPABASE_ANON_KEY is not set".to_string(),
            })?;

        let response = self
            .client
            .post(self.table_url())
            .header("apikey", api_key)
            .bearer_auth(api_key)
            .header("Prefer", "return=representation")
            .json(&[report])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TrustError::PersistenceError {
                message: format!("{} {}", status.as_u16(), error_body(response).await),
            });
        }

        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }
}
