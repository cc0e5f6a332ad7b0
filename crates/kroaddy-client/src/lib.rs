//! HTTP clients for the Kroaddy backends.
//!
//! [`TitanicClient`] and [`ChatbotClient`] implement the backend traits of
//! `kroaddy-chat`; [`GatewayClient`] covers the login gateway.

pub mod chatbot;
pub mod error;
pub mod gateway;
mod http;
pub mod titanic;

pub use chatbot::{extract_reply, ChatbotClient};
pub use error::ClientError;
pub use gateway::{GatewayClient, LoginOutcome, SocialProvider};
pub use titanic::TitanicClient;
