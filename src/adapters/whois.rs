use crate::adapters::http::error_body;
use crate::domain::model::DomainRecord;
use crate::domain::ports::DomainLookup;
use crate::utils::error::{Result, TrustError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

pub const DEFAULT_WHOIS_ENDPOINT: &str = "https://www.whoisxmlapi.com/whoisserver/WhoisService";

#[derive(Debug, Deserialize)]
struct WhoisResponse {
    #[serde(rename = "WhoisRecord")]
    whois_record: Option<WhoisRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WhoisRecord {
    created_date: Option<String>,
    registry_data: Option<RegistryData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegistryData {
    created_date: Option<String>,
}

/// WhoisXML API lookup.
#[derive(Debug, Clone)]
pub struct WhoisXmlClient {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl WhoisXmlClient {
    pub fn new(client: Client, endpoint: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            api_key,
        }
    }

    fn request_url(&self, api_key: &str, domain: &str) -> Result<Url> {
        Url::parse_with_params(
            &self.endpoint,
            &[
                ("apiKey", api_key),
                ("domainName", domain),
                ("outputFormat", "JSON"),
            ],
        )
        .map_err(|e| TrustError::InvalidConfigValueError {
            field: "whois_endpoint".to_string(),
            value: self.endpoint.clone(),
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl DomainLookup for WhoisXmlClient {
    async fn lookup(&self, domain: &str) -> Result<DomainRecord> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| TrustError::MissingConfigError {
                field: "WHOIS_API_KEY".to_string(),
            })?;

        let url = self.request_url(api_key, domain)?;
        tracing::debug!("WHOIS lookup for {}", domain);
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TrustError::UpstreamError {
                service: "whois",
                status: status.as_u16(),
                message: error_body(response).await,
            });
        }

        let body: WhoisResponse = response.json().await?;
        let created_date = body.whois_record.and_then(|record| {
            record
                .created_date
                .or_else(|| record.registry_data.and_then(|data| data.created_date))
        });

        Ok(DomainRecord { created_date })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use tokio_test::{assert_err, assert_ok};

    fn client(server: &MockServer, api_key: Option<&str>) -> WhoisXmlClient {
        WhoisXmlClient::new(
            Client::new(),
            server.url("/whoisserver/WhoisService"),
            api_key.map(str::to_string),
        )
    }

    #[tokio::test]
    async fn test_lookup_reads_created_date() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/whoisserver/WhoisService")
                .query_param("apiKey", "whois-key")
                .query_param("domainName", "example.com")
                .query_param("outputFormat", "JSON");
            then.status(200).json_body(serde_json::json!({
                "WhoisRecord": {"createdDate": "1995-08-14T04:00:00Z"}
            }));
        });

        let record = assert_ok!(client(&server, Some("whois-key")).lookup("example.com").await);

        mock.assert();
        assert_eq!(record.created_date.as_deref(), Some("1995-08-14T04:00:00Z"));
    }

    #[tokio::test]
    async fn test_lookup_falls_back_to_registry_data() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/whoisserver/WhoisService");
            then.status(200).json_body(serde_json::json!({
                "WhoisRecord": {"registryData": {"createdDate": "2001-01-01T00:00:00Z"}}
            }));
        });

        let record = assert_ok!(client(&server, Some("k")).lookup("example.org").await);
        assert_eq!(record.created_date.as_deref(), Some("2001-01-01T00:00:00Z"));
    }

    #[tokio::test]
    async fn test_lookup_without_record_has_no_date() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/whoisserver/WhoisService");
            then.status(200).json_body(serde_json::json!({
                "ErrorMessage": {"msg": "quota exceeded"}
            }));
        });

        let record = assert_ok!(client(&server, Some("k")).lookup("example.org").await);
        assert_eq!(record.created_date, None);
    }

    #[tokio::test]
    async fn test_lookup_error_status() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/whoisserver/WhoisService");
            then.status(503).body("maintenance");
        });

        let err = assert_err!(client(&server, Some("k")).lookup("example.org").await);
        assert!(matches!(err, TrustError::UpstreamError { status: 503, .. }));
    }

    #[tokio::test]
    async fn test_lookup_without_key_makes_no_request() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/whoisserver/WhoisService");
            then.status(200);
        });

        let err = assert_err!(client(&server, None).lookup("example.org").await);
        assert!(matches!(err, TrustError::MissingConfigError { .. }));
        mock.assert_hits(0);
    }
}
