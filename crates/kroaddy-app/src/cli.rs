//! CLI argument definitions for the Kroaddy terminal client.
//!
//! Priority resolution: CLI args > env vars > config file > defaults.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use kroaddy_client::SocialProvider;
use kroaddy_core::types::Language;

/// Kroaddy: Seoul travel assistant chat in the terminal.
#[derive(Parser, Debug)]
#[command(name = "kroaddy", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,

    /// Reply language (ko, en).
    #[arg(long = "language")]
    pub language: Option<Language>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Interactive home-screen chat (default).
    Chat,
    /// Print the Titanic search filter extracted from TEXT as JSON.
    Filters {
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Log in to the gateway with email and password.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Record the start of a social login (kakao, naver, google).
    Social { provider: SocialProvider },
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > KROADDY_CONFIG env var > ~/.kroaddy/config.toml.
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("KROADDY_CONFIG") {
            if !p.trim().is_empty() {
                return PathBuf::from(p);
            }
        }
        default_config_path()
    }

    /// Resolve the log level.
    ///
    /// Priority: --log-level flag > config file value.
    pub fn resolve_log_level(&self, config_level: &str) -> String {
        self.log_level
            .clone()
            .unwrap_or_else(|| config_level.to_string())
    }

    /// Subcommand to run; `chat` when none was given.
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Chat)
    }
}

/// Default config file path for the current platform.
fn default_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    if let Ok(home) = std::env::var("USERPROFILE") {
        return PathBuf::from(home).join(".kroaddy").join("config.toml");
    }
    #[cfg(not(target_os = "windows"))]
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".kroaddy").join("config.toml");
    }
    PathBuf::from("config.toml")
}
