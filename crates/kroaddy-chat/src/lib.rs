//! Home-screen chat engine for Kroaddy.
//!
//! Classifies utterances into intents, extracts Titanic search filters from
//! free text, and drives the conversation state through a [`HomeSession`].

pub mod backend;
pub mod cancel;
pub mod conversation;
pub mod error;
pub mod intent;
pub mod orchestrator;
pub mod parser;
pub mod places;
pub mod response;
pub mod timers;

pub use backend::{ChatBackend, PassengerSearch};
pub use cancel::RequestHandle;
pub use conversation::{ConversationState, Screen, ScreenEvent, Ticket};
pub use error::{CancelReason, ChatError};
pub use intent::{Intent, IntentRouter};
pub use orchestrator::{EventOutcome, HomeSession, SessionSettings};
pub use parser::{extract_filters, FilterExtractor};
pub use timers::TimerRegistry;
