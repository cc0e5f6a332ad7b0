use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{KroaddyError, Result};
use crate::types::Language;

/// Environment variable overriding `endpoints.gateway_url`.
pub const GATEWAY_URL_ENV: &str = "KROADDY_GATEWAY_URL";
/// Environment variable overriding `endpoints.titanic_url`.
pub const TITANIC_URL_ENV: &str = "KROADDY_TITANIC_URL";
/// Environment variable overriding `endpoints.chatbot_url`.
pub const CHATBOT_URL_ENV: &str = "KROADDY_CHATBOT_URL";

/// Top-level configuration for the kroaddy assistant.
///
/// Loaded from `~/.kroaddy/config.toml` by default. Every section falls back
/// to its defaults when missing from the file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KroaddyConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub endpoints: EndpointConfig,
    #[serde(default)]
    pub chat: ChatConfig,
}

impl KroaddyConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: KroaddyConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| KroaddyError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }

    /// Override endpoint URLs from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Override endpoint URLs using `lookup` as the variable source.
    ///
    /// Blank values are ignored.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let targets = [
            (GATEWAY_URL_ENV, &mut self.endpoints.gateway_url),
            (TITANIC_URL_ENV, &mut self.endpoints.titanic_url),
            (CHATBOT_URL_ENV, &mut self.endpoints.chatbot_url),
        ];
        for (key, slot) in targets {
            if let Some(value) = lookup(key).filter(|v| !v.trim().is_empty()) {
                info!(variable = key, url = %value, "Endpoint overridden from environment");
                *slot = value.trim().to_string();
            }
        }
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
    /// Reply language.
    pub language: Language,
    /// Optional JSON file holding the onboarding profile sent to the chatbot.
    pub profile_path: Option<String>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            language: Language::Ko,
            profile_path: None,
        }
    }
}

/// Base URLs of the backend services.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    /// Login gateway.
    pub gateway_url: String,
    /// Titanic passenger search service.
    pub titanic_url: String,
    /// Chatbot service (usually routed through the gateway).
    pub chatbot_url: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            gateway_url: "http://localhost:8080".to_string(),
            titanic_url: "http://localhost:9010".to_string(),
            chatbot_url: "http://localhost:8080/api/chatbot".to_string(),
        }
    }
}

/// Home-screen chat behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Simulated "thinking" delay before a canned reply replaces the placeholder.
    pub canned_reply_delay_ms: u64,
    /// Delay before a slash-search is acknowledged.
    pub slash_ack_delay_ms: u64,
    /// Deadline for a freeform chat request.
    pub request_timeout_secs: u64,
    /// Longest accepted utterance, in characters.
    pub max_message_length: usize,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            canned_reply_delay_ms: 5000,
            slash_ack_delay_ms: 300,
            request_timeout_secs: 30,
            max_message_length: 2000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config() {
        let config = KroaddyConfig::default();
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.general.language, Language::Ko);
        assert!(config.general.profile_path.is_none());
        assert_eq!(config.endpoints.titanic_url, "http://localhost:9010");
        assert_eq!(config.endpoints.chatbot_url, "http://localhost:8080/api/chatbot");
        assert_eq!(config.chat.canned_reply_delay_ms, 5000);
        assert_eq!(config.chat.slash_ack_delay_ms, 300);
        assert_eq!(config.chat.request_timeout_secs, 30);
    }

    #[test]
    fn test_load_valid_config() {
        let content = r#"
[general]
log_level = "debug"
language = "en"
profile_path = "/tmp/profile.json"

[endpoints]
gateway_url = "https://gw.example.com"
titanic_url = "https://titanic.example.com"
chatbot_url = "https://gw.example.com/api/chatbot"

[chat]
canned_reply_delay_ms = 100
slash_ack_delay_ms = 10
request_timeout_secs = 5
max_message_length = 500
"#;
        let file = create_temp_config(content);
        let config = KroaddyConfig::load(file.path()).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.general.language, Language::En);
        assert_eq!(config.general.profile_path.as_deref(), Some("/tmp/profile.json"));
        assert_eq!(config.endpoints.titanic_url, "https://titanic.example.com");
        assert_eq!(config.chat.canned_reply_delay_ms, 100);
        assert_eq!(config.chat.max_message_length, 500);
    }

    #[test]
    fn test_load_partial_config_uses_defaults() {
        let content = r#"
[chat]
canned_reply_delay_ms = 1
"#;
        let file = create_temp_config(content);
        let config = KroaddyConfig::load(file.path()).unwrap();
        assert_eq!(config.chat.canned_reply_delay_ms, 1);
        assert_eq!(config.chat.slash_ack_delay_ms, 300);
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.endpoints.gateway_url, "http://localhost:8080");
    }

    #[test]
    fn test_load_invalid_language_fails() {
        let file = create_temp_config("[general]\nlanguage = \"fr\"\n");
        assert!(KroaddyConfig::load(file.path()).is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = KroaddyConfig::load_or_default(Path::new("/nonexistent/kroaddy.toml"));
        assert_eq!(config.chat.request_timeout_secs, 30);
    }

    #[test]
    fn test_load_or_default_garbage_file() {
        let file = create_temp_config("[[[ nope");
        let config = KroaddyConfig::load_or_default(file.path());
        assert_eq!(config.general.log_level, "info");
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = KroaddyConfig::default();
        config.general.language = Language::En;
        config.chat.slash_ack_delay_ms = 42;
        config.save(&path).unwrap();

        let reloaded = KroaddyConfig::load(&path).unwrap();
        assert_eq!(reloaded.general.language, Language::En);
        assert_eq!(reloaded.chat.slash_ack_delay_ms, 42);
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            (TITANIC_URL_ENV, " http://titanic:9010 "),
            (CHATBOT_URL_ENV, "   "),
        ]
        .into_iter()
        .collect();

        let mut config = KroaddyConfig::default();
        config.apply_overrides_from(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(config.endpoints.titanic_url, "http://titanic:9010");
        // Blank value leaves the default in place.
        assert_eq!(config.endpoints.chatbot_url, "http://localhost:8080/api/chatbot");
        assert_eq!(config.endpoints.gateway_url, "http://localhost:8080");
    }
}
