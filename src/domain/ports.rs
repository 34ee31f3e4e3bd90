use crate::domain::model::{DomainRecord, FeedbackReport};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Domain-registration lookup (WHOIS). Treated as untrusted and optional.
#[async_trait]
pub trait DomainLookup: Send + Sync {
    async fn lookup(&self, domain: &str) -> Result<DomainRecord>;
}

/// Text-completion model. Returns the raw completion text, unparsed.
#[async_trait]
pub trait ModelInference: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// Write-only store for user feedback.
#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Inserts one report and returns whatever rows the store echoes back.
    async fn insert(&self, report: &FeedbackReport) -> Result<serde_json::Value>;
}

pub trait ConfigProvider: Send + Sync {
    fn port(&self) -> u16;
    fn openai_api_key(&self) -> Option<&str>;
    fn openai_base_url(&self) -> &str;
    fn openai_model(&self) -> &str;
    fn whois_api_key(&self) -> Option<&str>;
    fn whois_endpoint(&self) -> &str;
    fn supabase_url(&self) -> &str;
    fn supabase_key(&self) -> Option<&str>;
    fn supabase_table(&self) -> &str;
    fn request_timeout_seconds(&self) -> u64;
}
