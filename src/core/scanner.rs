use crate::core::aggregator::{aggregate_text, aggregate_url};
use crate::core::formatter::{format_response, ScanResponse};
use crate::core::normalizer::{
    extract_domain, normalize_domain_age, normalize_model_signal,
};
use crate::core::prompts::{text_prompt, url_prompt};
use crate::domain::model::{FeedbackReport, ScanKind, ScanRequest};
use crate::domain::ports::{DomainLookup, ModelInference, ReportStore};
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Runs scans against injected collaborator handles.
///
/// A URL scan waits for the domain lookup before issuing the model call.
/// Collaborator failures never escape a scan; only `submit_report` can fail.
#[derive(Clone)]
pub struct ScanEngine {
    lookup: Arc<dyn DomainLookup>,
    model: Arc<dyn ModelInference>,
    store: Arc<dyn ReportStore>,
    clock: fn() -> DateTime<Utc>,
}

impl ScanEngine {
    pub fn new(
        lookup: Arc<dyn DomainLookup>,
        model: Arc<dyn ModelInference>,
        store: Arc<dyn ReportStore>,
    ) -> Self {
        Self {
            lookup,
            model,
            store,
            clock: Utc::now,
        }
    }

    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    pub async fn scan(&self, request: &ScanRequest) -> ScanResponse {
        match request {
            ScanRequest::Url { url } => self.scan_url(url).await,
            ScanRequest::Text { message } => self.scan_text(message).await,
        }
    }

    pub async fn scan_url(&self, url: &str) -> ScanResponse {
        let domain = extract_domain(url);
        tracing::debug!("Scanning URL {} (domain {})", url, domain);

        let age = normalize_domain_age(self.lookup.lookup(&domain).await, (self.clock)());
        let signal =
            normalize_model_signal(self.model.complete(&url_prompt(url)).await, ScanKind::Url);

        let result = aggregate_url(&domain, age, signal);
        tracing::info!(
            domain = %domain,
            trust_score = result.trust_score,
            status = ?result.status_label,
            "URL scan complete"
        );
        format_response(result, ScanKind::Url)
    }

    pub async fn scan_text(&self, message: &str) -> ScanResponse {
        tracing::debug!("Scanning message ({} chars)", message.chars().count());

        let signal = normalize_model_signal(
            self.model.complete(&text_prompt(message)).await,
            ScanKind::Text,
        );

        let result = aggregate_text(signal);
        tracing::info!(
            trust_score = result.trust_score,
            status = ?result.status_label,
            "Message scan complete"
        );
        format_response(result, ScanKind::Text)
    }

    pub async fn submit_report(&self, report: &FeedbackReport) -> Result<serde_json::Value> {
        let stored = self.store.insert(report).await?;
        tracing::info!(url = %report.url, vote = %report.user_vote, "Feedback report saved");
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::DomainRecord;
    use crate::utils::error::TrustError;
    use async_trait::async_trait;
    use chrono::TimeZone;
    use std::sync::Mutex;

    struct FixedLookup(Option<&'static str>);

    #[async_trait]
    impl DomainLookup for FixedLookup {
        async fn lookup(&self, _domain: &str) -> Result<DomainRecord> {
            match self.0 {
                Some(created) => Ok(DomainRecord {
                    created_date: Some(created.to_string()),
                }),
                None => Err(TrustError::UpstreamError {
                    service: "whois",
                    status: 500,
                    message: "down".to_string(),
                }),
            }
        }
    }

    #[derive(Default)]
    struct RecordingModel {
        reply: Option<&'static str>,
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ModelInference for RecordingModel {
        async fn complete(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.reply
                .map(str::to_string)
                .ok_or_else(|| TrustError::MissingConfigError {
                    field: "OPENAI_API_KEY".to_string(),
                })
        }
    }

    struct NullStore;

    #[async_trait]
    impl ReportStore for NullStore {
        async fn insert(&self, report: &FeedbackReport) -> Result<serde_json::Value> {
            Ok(serde_json::json!([report]))
        }
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 0, 0, 0).unwrap()
    }

    fn engine(lookup: FixedLookup, model: Arc<RecordingModel>) -> ScanEngine {
        ScanEngine::new(Arc::new(lookup), model, Arc::new(NullStore)).with_clock(fixed_now)
    }

    #[tokio::test]
    async fn test_scan_url_combines_age_and_model() {
        let model = Arc::new(RecordingModel {
            reply: Some(r#"{"risk_level":"high","risk_score":80,"reasons":["Lookalike brand"]}"#),
            ..Default::default()
        });
        let engine = engine(FixedLookup(Some("2026-04-16T00:00:00Z")), model.clone());

        let response = engine.scan_url("https://paypa1-login.example/verify").await;

        // 100 - 25 - 48
        assert_eq!(response.mona_score, 27);
        assert_eq!(response.domain.as_deref(), Some("paypa1-login.example"));
        assert_eq!(response.reasons, vec!["Very new domain", "Lookalike brand"]);
        assert_eq!(response.ai_risk_level, "high");

        let prompts = model.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Link: https://paypa1-login.example/verify"));
    }

    #[tokio::test]
    async fn test_scan_url_degrades_when_everything_fails() {
        let model = Arc::new(RecordingModel::default());
        let engine = engine(FixedLookup(None), model);

        let response = engine.scan_url("example.com").await;

        assert_eq!(response.mona_score, 82);
        assert_eq!(response.ai_risk_level, "medium");
        assert_eq!(
            response.reasons,
            vec!["Domain age unavailable", "AI API request failed"]
        );
    }

    #[tokio::test]
    async fn test_scan_text_uses_message_prompt() {
        let model = Arc::new(RecordingModel {
            reply: Some("not json at all"),
            ..Default::default()
        });
        let engine = engine(FixedLookup(None), model.clone());

        let response = engine
            .scan(&ScanRequest::Text {
                message: "Send $200 to unlock your job offer".to_string(),
            })
            .await;

        assert_eq!(response.mona_score, 60);
        assert_eq!(response.scan_type, Some("message_scan"));
        assert_eq!(response.reasons, vec!["AI output could not be parsed"]);
        assert!(model.prompts.lock().unwrap()[0].contains("Send $200 to unlock your job offer"));
    }
}
