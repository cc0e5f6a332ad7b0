//! Backend seams used by the session.
//!
//! The session never talks HTTP itself; it holds trait objects that the
//! client crate implements and tests replace with fakes.

use async_trait::async_trait;

use kroaddy_core::types::{ChatbotRequest, PassengerSearchResponse, SearchFilter};

use crate::error::ChatError;

/// Titanic passenger search.
#[async_trait]
pub trait PassengerSearch: Send + Sync {
    async fn search(&self, filter: &SearchFilter) -> Result<PassengerSearchResponse, ChatError>;
}

/// Freeform chatbot.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Send one turn and return the reply text.
    ///
    /// `Ok(None)` means the backend answered but the body carried no reply.
    async fn chat(&self, request: &ChatbotRequest) -> Result<Option<String>, ChatError>;
}
