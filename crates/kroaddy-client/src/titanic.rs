//! Titanic passenger search client.

use async_trait::async_trait;

use kroaddy_chat::{ChatError, PassengerSearch};
use kroaddy_core::types::{PassengerSearchResponse, SearchFilter};

use crate::error::ClientError;
use crate::http::{build_http_client, normalize_base, send_json};

/// Client for `POST {base}/search`.
pub struct TitanicClient {
    http: reqwest::Client,
    base_url: String,
}

impl TitanicClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Ok(Self {
            http: build_http_client()?,
            base_url: normalize_base(base_url),
        })
    }

    pub fn search_url(&self) -> String {
        format!("{}/search", self.base_url)
    }

    pub async fn search_passengers(
        &self,
        filter: &SearchFilter,
    ) -> Result<PassengerSearchResponse, ClientError> {
        let url = self.search_url();
        tracing::debug!(%url, ?filter, "Titanic search request");
        let text = send_json(&self.http, &url, filter).await?;
        let response: PassengerSearchResponse =
            serde_json::from_str(&text).map_err(|e| ClientError::Parse(e.to_string()))?;
        tracing::debug!(total = response.total_results, "Titanic search response");
        Ok(response)
    }
}

#[async_trait]
impl PassengerSearch for TitanicClient {
    async fn search(&self, filter: &SearchFilter) -> Result<PassengerSearchResponse, ChatError> {
        Ok(self.search_passengers(filter).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_url_joins_base() {
        let client = TitanicClient::new("http://localhost:9010/").unwrap();
        assert_eq!(client.search_url(), "http://localhost:9010/search");
    }
}
