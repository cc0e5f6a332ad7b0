//! Login gateway client: social-login audit log and email/password login.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::Value;

use kroaddy_core::i18n::Phrase;
use kroaddy_core::types::Language;

use crate::error::ClientError;
use crate::http::{build_http_client, is_success, normalize_base, post_json};

/// Social login providers offered on the login page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SocialProvider {
    Kakao,
    Naver,
    Google,
}

impl SocialProvider {
    pub fn as_str(self) -> &'static str {
        match self {
            SocialProvider::Kakao => "kakao",
            SocialProvider::Naver => "naver",
            SocialProvider::Google => "google",
        }
    }

    /// Audit-log action recorded when a social login starts.
    pub fn log_action(self) -> &'static str {
        match self {
            SocialProvider::Kakao => "Gateway 카카오 연결 시작",
            SocialProvider::Naver => "Gateway 네이버 연결 시작",
            SocialProvider::Google => "Gateway 구글 연결 시작",
        }
    }
}

impl fmt::Display for SocialProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SocialProvider {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "kakao" => Ok(SocialProvider::Kakao),
            "naver" => Ok(SocialProvider::Naver),
            "google" => Ok(SocialProvider::Google),
            other => Err(ClientError::UnsupportedProvider(other.to_string())),
        }
    }
}

/// Result of an email/password login attempt that reached the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Success,
    /// Rejected by the server, with the message to show the user.
    Rejected(String),
}

#[derive(Serialize)]
struct LogRequest<'a> {
    action: &'a str,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Client for the login gateway.
pub struct GatewayClient {
    http: reqwest::Client,
    base_url: String,
    language: Language,
}

impl GatewayClient {
    pub fn new(base_url: &str, language: Language) -> Result<Self, ClientError> {
        Ok(Self {
            http: build_http_client()?,
            base_url: normalize_base(base_url),
            language,
        })
    }

    /// Record a login action. Failures are logged and otherwise ignored.
    pub async fn log_login(&self, action: &str) {
        let url = format!("{}/api/log/login", self.base_url);
        match post_json(&self.http, &url, &LogRequest { action }).await {
            Ok((status, _)) if is_success(status) => {
                tracing::debug!(action, "Login action logged");
            }
            Ok((status, _)) => {
                tracing::debug!(action, status, "Login log rejected");
            }
            Err(e) => {
                tracing::debug!(action, error = %e, "Login log failed");
            }
        }
    }

    pub async fn log_social_login(&self, provider: SocialProvider) {
        self.log_login(provider.log_action()).await;
    }

    /// Attempt an email/password login.
    ///
    /// Transport failures come back as `Err`; any response from the server,
    /// successful or not, is a [`LoginOutcome`].
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, ClientError> {
        let url = format!("{}/api/auth/login", self.base_url);
        let (status, text) = post_json(&self.http, &url, &LoginRequest { email, password }).await?;

        if is_success(status) {
            tracing::info!(email, "Login succeeded");
            return Ok(LoginOutcome::Success);
        }

        let message = serde_json::from_str::<Value>(&text)
            .ok()
            .as_ref()
            .and_then(|body| body.get("message"))
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| Phrase::LoginFailed.text(self.language).to_string());
        tracing::info!(email, status, "Login rejected");
        Ok(LoginOutcome::Rejected(message))
    }
}
