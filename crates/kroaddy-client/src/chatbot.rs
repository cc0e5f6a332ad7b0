//! Freeform chatbot client.

use async_trait::async_trait;
use serde_json::Value;

use kroaddy_chat::{ChatBackend, ChatError};
use kroaddy_core::types::ChatbotRequest;

use crate::error::ClientError;
use crate::http::{build_http_client, normalize_base, send_json};

/// Client for `POST {base}/chat`.
pub struct ChatbotClient {
    http: reqwest::Client,
    base_url: String,
}

impl ChatbotClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Ok(Self {
            http: build_http_client()?,
            base_url: normalize_base(base_url),
        })
    }

    pub fn chat_url(&self) -> String {
        format!("{}/chat", self.base_url)
    }

    /// Send one turn. `Ok(None)` when the body holds no usable reply.
    pub async fn send(&self, request: &ChatbotRequest) -> Result<Option<String>, ClientError> {
        let url = self.chat_url();
        tracing::debug!(
            %url,
            history_len = request.conversation_history.len(),
            has_context = request.context_info.is_some(),
            "Chatbot request"
        );
        let text = send_json(&self.http, &url, request).await?;
        let body: Value =
            serde_json::from_str(&text).map_err(|e| ClientError::Parse(e.to_string()))?;

        let reply = extract_reply(&body).map(str::to_string);
        if reply.is_none() {
            tracing::warn!(%body, "Chatbot response has no reply field");
        }
        Ok(reply)
    }
}

#[async_trait]
impl ChatBackend for ChatbotClient {
    async fn chat(&self, request: &ChatbotRequest) -> Result<Option<String>, ChatError> {
        Ok(self.send(request).await?)
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

/// Pull the reply text out of a chatbot response body.
///
/// Tries `.response` (string), then `.message` (string), then
/// `.response.response`. Empty strings do not count.
pub fn extract_reply(body: &Value) -> Option<&str> {
    non_empty_str(body.get("response"))
        .or_else(|| non_empty_str(body.get("message")))
        .or_else(|| non_empty_str(body.get("response").and_then(|r| r.get("response"))))
}
