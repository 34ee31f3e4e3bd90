use crate::utils::error::Result;
use reqwest::Client;
use std::time::Duration;

const USER_AGENT: &str = concat!("trustmona/", env!("CARGO_PKG_VERSION"));

/// Shared outbound client. One instance is cloned into every adapter.
pub fn build_http_client(timeout_seconds: u64) -> Result<Client> {
    let client = Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

/// Reads an error body for logging, capped so a huge HTML page does not flood the logs.
pub(crate) async fn error_body(response: reqwest::Response) -> String {
    let text = response.text().await.unwrap_or_default();
    text.chars().take(500).collect()
}
