//! Kroaddy terminal client.
//!
//! Startup sequence:
//! 1. Parse CLI arguments
//! 2. Load configuration from TOML and apply env overrides
//! 3. Initialize tracing
//! 4. Run the selected subcommand (interactive chat by default)

mod cli;

use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use kroaddy_chat::{extract_filters, ConversationState, EventOutcome, HomeSession, SessionSettings};
use kroaddy_client::{
    ChatbotClient, GatewayClient, LoginOutcome, SocialProvider, TitanicClient,
};
use kroaddy_core::config::KroaddyConfig;
use kroaddy_core::i18n::Phrase;
use kroaddy_core::types::{Language, Role};

use crate::cli::{CliArgs, Command};

type AppResult<T> = Result<T, Box<dyn std::error::Error>>;

#[tokio::main]
async fn main() -> AppResult<()> {
    let args = CliArgs::parse();

    // Config.
    let config_file = args.resolve_config_path();
    let mut config = KroaddyConfig::load_or_default(&config_file);
    config.apply_env_overrides();
    if let Some(language) = args.language {
        config.general.language = language;
    }

    // Tracing. RUST_LOG wins over the configured level.
    let level = args.resolve_log_level(&config.general.log_level);
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&level)),
        )
        .init();

    tracing::info!("Starting Kroaddy v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(path = %config_file.display(), "Configuration loaded");

    match args.command() {
        Command::Chat => run_chat(&config).await,
        Command::Filters { text } => print_filters(&text.join(" ")),
        Command::Login { email, password } => run_login(&config, &email, &password).await,
        Command::Social { provider } => run_social(&config, provider).await,
    }
}

// =============================================================================
// One-shot commands
// =============================================================================

fn print_filters(text: &str) -> AppResult<()> {
    let filter = extract_filters(text);
    println!("{}", serde_json::to_string_pretty(&filter)?);
    Ok(())
}

async fn run_login(config: &KroaddyConfig, email: &str, password: &str) -> AppResult<()> {
    let language = config.general.language;
    let gateway = GatewayClient::new(&config.endpoints.gateway_url, language)?;

    match gateway.login(email, password).await {
        Ok(LoginOutcome::Success) => {
            println!("OK");
            Ok(())
        }
        Ok(LoginOutcome::Rejected(message)) => {
            eprintln!("{}", message);
            std::process::exit(1);
        }
        Err(e) => {
            tracing::warn!(error = %e, "Login request failed");
            eprintln!("{}", Phrase::ServerUnreachable.text(language));
            std::process::exit(1);
        }
    }
}

async fn run_social(config: &KroaddyConfig, provider: SocialProvider) -> AppResult<()> {
    let gateway = GatewayClient::new(&config.endpoints.gateway_url, config.general.language)?;
    gateway.log_social_login(provider).await;
    println!("{}", provider.log_action());
    Ok(())
}

// =============================================================================
// Interactive chat
// =============================================================================

const HELP: &str = "\
Type a message and press enter. Lines starting with ':' are commands:
  :help                      show this help
  :lang ko|en                switch reply language
  :loc LAT LNG               set current location
  :weather TEMP CITY DESC..  set current weather
  :select PLACE_ID           select a place on the route
  :close                     close the place detail
  :route                     show the current route
  :reset                     clear the conversation
  :quit                      exit";

/// One turn of the interactive loop.
enum Step {
    Input(Option<String>),
    Settled(Option<EventOutcome>),
}

enum LineAction {
    Continue,
    Quit,
}

async fn run_chat(config: &KroaddyConfig) -> AppResult<()> {
    let titanic = TitanicClient::new(&config.endpoints.titanic_url)?;
    let chatbot = ChatbotClient::new(&config.endpoints.chatbot_url)?;
    let mut session = HomeSession::new(
        SessionSettings::from_config(config),
        Arc::new(titanic),
        Arc::new(chatbot),
    );

    if let Some(path) = config.general.profile_path.as_deref() {
        if let Some(profile) = load_profile(Path::new(path)) {
            session.set_user_profile(profile);
        }
    }

    println!("{}", HELP);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut transcript = Transcript::default();

    loop {
        let step = tokio::select! {
            line = lines.next_line() => Step::Input(line?),
            outcome = session.next_event(), if !session.is_idle() => Step::Settled(outcome),
        };

        match step {
            Step::Input(None) => break,
            Step::Input(Some(line)) => {
                if let LineAction::Quit = handle_line(&mut session, &mut transcript, &line) {
                    break;
                }
            }
            Step::Settled(outcome) => {
                tracing::trace!(?outcome, "Session event applied");
            }
        }
        transcript.flush(session.state());
    }

    tracing::info!("Chat session ended");
    Ok(())
}

fn handle_line(session: &mut HomeSession, transcript: &mut Transcript, line: &str) -> LineAction {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return LineAction::Continue;
    }

    let Some(command) = trimmed.strip_prefix(':') else {
        if let Err(e) = session.route(line) {
            eprintln!("{}", e);
        }
        return LineAction::Continue;
    };

    let mut parts = command.split_whitespace();
    match parts.next().unwrap_or("") {
        "quit" | "exit" | "q" => return LineAction::Quit,
        "help" => println!("{}", HELP),
        "lang" => match parts.next().map(str::parse::<Language>) {
            Some(Ok(language)) => session.set_language(language),
            Some(Err(e)) => eprintln!("{}", e),
            None => println!("{}", session.language()),
        },
        "loc" => match parse_pair(parts.next(), parts.next()) {
            Some((lat, lng)) => session.update_location(lat, lng),
            None => eprintln!("usage: :loc LAT LNG"),
        },
        "weather" => {
            let temp = parts.next().and_then(|t| t.parse::<f64>().ok());
            let city = parts.next();
            let description = parts.collect::<Vec<_>>().join(" ");
            match (temp, city) {
                (Some(temp), Some(city)) => session.update_weather(temp, description, city),
                _ => eprintln!("usage: :weather TEMP CITY DESCRIPTION"),
            }
        }
        "select" => {
            let id = parts.next().unwrap_or("");
            let place = session
                .state()
                .route()
                .iter()
                .find(|p| p.id == id)
                .cloned()
                .or_else(|| kroaddy_chat::places::find_place(id));
            match place {
                Some(place) => {
                    println!("{} ({})", place.name, place.address);
                    session.select_place(place);
                }
                None => eprintln!("unknown place: {}", id),
            }
        }
        "close" => session.close_place(),
        "route" => print_route(session.state()),
        "reset" => {
            session.reset();
            transcript.clear();
        }
        other => eprintln!("unknown command: :{}", other),
    }
    LineAction::Continue
}

fn parse_pair(a: Option<&str>, b: Option<&str>) -> Option<(f64, f64)> {
    Some((a?.parse().ok()?, b?.parse().ok()?))
}

/// Read the onboarding profile. A missing or malformed file is logged and
/// skipped.
fn load_profile(path: &Path) -> Option<serde_json::Value> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to read user profile");
            return None;
        }
    };
    match serde_json::from_str(&text) {
        Ok(profile) => {
            tracing::info!(path = %path.display(), "User profile loaded");
            Some(profile)
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to parse user profile");
            None
        }
    }
}

fn print_route(state: &ConversationState) {
    if state.route().is_empty() {
        println!("(no route)");
        return;
    }
    for (i, place) in state.route().iter().enumerate() {
        println!("{}. [{}] {} - {}", i + 1, place.id, place.name, place.address);
    }
}

/// Prints assistant messages as they become final.
///
/// The typing placeholder is shown once and reprinted only after it has
/// been replaced with its final content.
#[derive(Default)]
struct Transcript {
    printed: usize,
    typing_shown: Option<u64>,
    route_ids: Vec<String>,
    draw_generation: u64,
}

impl Transcript {
    fn clear(&mut self) {
        *self = Self::default();
    }

    fn flush(&mut self, state: &ConversationState) {
        let messages = state.messages();
        if messages.len() < self.printed {
            self.printed = 0;
        }

        for (idx, message) in messages.iter().enumerate().skip(self.printed) {
            let is_placeholder = state.placeholder().is_some() && idx + 1 == messages.len();
            if is_placeholder {
                if self.typing_shown != state.placeholder() {
                    println!("... {}", message.content);
                    self.typing_shown = state.placeholder();
                }
                break;
            }
            if message.role == Role::Assistant {
                println!("\n{}\n", message.content);
            }
            self.printed = idx + 1;
        }

        let route_ids: Vec<String> = state.route().iter().map(|p| p.id.clone()).collect();
        if route_ids != self.route_ids {
            self.route_ids = route_ids;
            if !self.route_ids.is_empty() {
                let names: Vec<&str> = state.route().iter().map(|p| p.name.as_str()).collect();
                println!("[route] {}", names.join(" -> "));
            }
        }
        if state.route_draw_generation() != self.draw_generation {
            self.draw_generation = state.route_draw_generation();
            if self.draw_generation > 0 {
                println!("[route] drawing {} stops", state.route().len());
            }
        }
    }
}
