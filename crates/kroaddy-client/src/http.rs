//! Shared reqwest plumbing for the backend clients.

use std::time::Duration;

use serde::Serialize;

use crate::error::ClientError;

const REQUEST_TIMEOUT_SECS: u64 = 60;
const CONNECT_TIMEOUT_SECS: u64 = 10;

pub(crate) fn build_http_client() -> Result<reqwest::Client, ClientError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .build()
        .map_err(|e| ClientError::HttpClientBuild(e.to_string()))
}

/// Normalize a configured base URL so paths can be appended directly.
pub(crate) fn normalize_base(base_url: &str) -> String {
    base_url.trim().trim_end_matches('/').to_string()
}

/// POST `body` as JSON and return the status code with the raw body text.
pub(crate) async fn post_json(
    http: &reqwest::Client,
    url: &str,
    body: &impl Serialize,
) -> Result<(u16, String), ClientError> {
    let response = http
        .post(url)
        .header(reqwest::header::ACCEPT, "application/json")
        .json(body)
        .send()
        .await
        .map_err(|e| ClientError::Request(e.to_string()))?;

    let status = response.status().as_u16();
    let text = response
        .text()
        .await
        .map_err(|e| ClientError::Request(e.to_string()))?;
    Ok((status, text))
}

/// POST `body` as JSON, failing on any non-2xx status.
pub(crate) async fn send_json(
    http: &reqwest::Client,
    url: &str,
    body: &impl Serialize,
) -> Result<String, ClientError> {
    let (status, text) = post_json(http, url, body).await?;
    if !is_success(status) {
        tracing::warn!(url, status, body = %text, "Backend returned error status");
        return Err(ClientError::Status { status, body: text });
    }
    Ok(text)
}

pub(crate) fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}
