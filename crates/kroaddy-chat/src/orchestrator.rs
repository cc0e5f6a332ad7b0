//! Home-screen session: routes utterances, owns conversation state, and
//! applies the results of timers and backend requests.
//!
//! Timers and requests run as tokio tasks that never touch the state. They
//! post completion events back over a channel and the owner applies them via
//! [`HomeSession::next_event`] or [`HomeSession::run_until_idle`].

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use kroaddy_core::config::KroaddyConfig;
use kroaddy_core::i18n::Phrase;
use kroaddy_core::types::{
    ChatbotRequest, ContextInfo, GeoPoint, Language, Location, Message, PassengerSearchResponse,
    Weather,
};

use crate::backend::{ChatBackend, PassengerSearch};
use crate::cancel::RequestHandle;
use crate::conversation::{ConversationState, ScreenEvent, Ticket};
use crate::error::{CancelReason, ChatError};
use crate::intent::{slash_keyword, Intent, IntentRouter};
use crate::parser::FilterExtractor;
use crate::places;
use crate::response;
use crate::timers::TimerRegistry;

/// Timing and validation knobs for a session.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub canned_reply_delay: Duration,
    pub slash_ack_delay: Duration,
    pub request_timeout: Duration,
    pub max_message_length: usize,
    pub language: Language,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self::from_config(&KroaddyConfig::default())
    }
}

impl SessionSettings {
    pub fn from_config(config: &KroaddyConfig) -> Self {
        Self {
            canned_reply_delay: Duration::from_millis(config.chat.canned_reply_delay_ms),
            slash_ack_delay: Duration::from_millis(config.chat.slash_ack_delay_ms),
            request_timeout: Duration::from_secs(config.chat.request_timeout_secs),
            max_message_length: config.chat.max_message_length,
            language: config.general.language,
        }
    }
}

/// Completion posted back to the session by a timer or request task.
#[derive(Debug)]
enum SessionEvent {
    TimerFired(Ticket),
    TitanicSettled {
        ticket: Ticket,
        result: Result<PassengerSearchResponse, ChatError>,
    },
    ChatSettled {
        ticket: Ticket,
        result: Result<Option<String>, ChatError>,
    },
}

/// What applying one event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    Applied(Ticket),
    /// Stale or duplicate event; state untouched.
    Ignored(Ticket),
}

/// Reply a timer delivers when it fires.
#[derive(Debug, Clone)]
enum DelayedReply {
    Canned { intent: Intent, language: Language },
    SlashAck { keyword: String, language: Language },
}

struct LiveRequest {
    ticket: Ticket,
    handle: RequestHandle,
    task: JoinHandle<()>,
}

/// Owner of one home-screen conversation.
pub struct HomeSession {
    state: ConversationState,
    router: IntentRouter,
    extractor: FilterExtractor,
    settings: SessionSettings,
    language: Language,
    context: ContextInfo,
    user_profile: Option<serde_json::Value>,
    titanic: Arc<dyn PassengerSearch>,
    chatbot: Arc<dyn ChatBackend>,
    timers: TimerRegistry,
    delayed: HashMap<Ticket, DelayedReply>,
    live: Option<LiveRequest>,
    next_ticket: Ticket,
    events_tx: mpsc::UnboundedSender<SessionEvent>,
    events_rx: mpsc::UnboundedReceiver<SessionEvent>,
}

impl HomeSession {
    pub fn new(
        settings: SessionSettings,
        titanic: Arc<dyn PassengerSearch>,
        chatbot: Arc<dyn ChatBackend>,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            state: ConversationState::new(),
            router: IntentRouter::new(),
            extractor: FilterExtractor::new(),
            language: settings.language,
            settings,
            context: ContextInfo::default(),
            user_profile: None,
            titanic,
            chatbot,
            timers: TimerRegistry::new(),
            delayed: HashMap::new(),
            live: None,
            next_ticket: 0,
            events_tx,
            events_rx,
        }
    }

    // -----------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------

    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn context_info(&self) -> &ContextInfo {
        &self.context
    }

    pub fn user_profile(&self) -> Option<&serde_json::Value> {
        self.user_profile.as_ref()
    }

    /// True when no timer is pending and no request is live.
    pub fn is_idle(&self) -> bool {
        self.timers.is_empty() && self.live.is_none()
    }

    // -----------------------------------------------------------------
    // Session context
    // -----------------------------------------------------------------

    pub fn set_language(&mut self, language: Language) {
        tracing::debug!(%language, "Reply language changed");
        self.language = language;
    }

    pub fn update_location(&mut self, lat: f64, lng: f64) {
        self.context.location = Some(GeoPoint { lat, lng });
    }

    pub fn update_weather(
        &mut self,
        temp: f64,
        description: impl Into<String>,
        city: impl Into<String>,
    ) {
        self.context.weather = Some(Weather {
            temp,
            description: description.into(),
            city: city.into(),
        });
    }

    pub fn set_user_profile(&mut self, profile: serde_json::Value) {
        self.user_profile = Some(profile);
    }

    pub fn select_place(&mut self, place: Location) {
        tracing::debug!(place_id = %place.id, "Place selected");
        self.state.select_place(place);
    }

    pub fn close_place(&mut self) {
        self.state.close_place();
    }

    /// Drop all conversation state, cancelling the live request and every
    /// pending timer.
    pub fn reset(&mut self) {
        if let Some(live) = self.live.take() {
            live.handle.cancel(CancelReason::Reset);
            live.task.abort();
        }
        self.timers.abort_all();
        self.delayed.clear();
        self.state.reset();
        tracing::info!("Conversation reset");
    }

    // -----------------------------------------------------------------
    // Routing
    // -----------------------------------------------------------------

    /// Handle one user utterance and return the intent it was routed to.
    ///
    /// Outstanding work is settled first: a live request is cancelled and
    /// its placeholder gets the timeout text, pending timers deliver their
    /// replies immediately.
    pub fn route(&mut self, utterance: &str) -> Result<Intent, ChatError> {
        if utterance.trim().is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        if utterance.chars().count() > self.settings.max_message_length {
            return Err(ChatError::MessageTooLong(self.settings.max_message_length));
        }

        self.settle_outstanding(CancelReason::Superseded);

        let history = self.state.messages().to_vec();
        self.state.push_user(utterance);

        let intent = self.router.classify(utterance);
        tracing::info!(%intent, "Routing utterance");
        if tracing::enabled!(tracing::Level::DEBUG) {
            let candidates = self.router.candidates(utterance);
            if candidates.len() > 1 {
                tracing::debug!(?candidates, "Earlier route shadowed later matches");
            }
        }

        match intent {
            Intent::Titanic => self.start_titanic(utterance),
            Intent::Nearby
            | Intent::Museum
            | Intent::FoodRecommendation
            | Intent::Affirmation
            | Intent::HistoricSites => self.start_canned(intent),
            Intent::SlashSearch => self.start_slash_search(utterance),
            Intent::Chat => self.start_chat(utterance, history),
        }

        Ok(intent)
    }

    fn allocate_ticket(&mut self) -> Ticket {
        self.next_ticket += 1;
        self.next_ticket
    }

    fn begin_reply(&mut self) -> Ticket {
        let ticket = self.allocate_ticket();
        let placed = self
            .state
            .begin_placeholder(ticket, Phrase::Typing.text(self.language));
        debug_assert!(placed, "placeholder still pending when ticket {ticket} began");
        self.state.transition(ScreenEvent::Respond);
        ticket
    }

    fn settle_outstanding(&mut self, reason: CancelReason) {
        if let Some(live) = self.live.take() {
            if live.handle.cancel(reason) {
                tracing::info!(ticket = live.ticket, %reason, "Cancelled in-flight request");
            }
            self.state
                .resolve_placeholder(live.ticket, Phrase::RequestTimeout.text(self.language));
        }

        if !self.timers.is_empty() {
            tracing::debug!(pending = self.timers.len(), "Flushing pending timers");
        }
        for ticket in self.timers.drain() {
            if let Some(reply) = self.delayed.remove(&ticket) {
                tracing::debug!(ticket, "Flushing pending reply");
                self.deliver(ticket, reply);
            }
        }
    }

    fn start_canned(&mut self, intent: Intent) {
        let ticket = self.begin_reply();
        self.delayed.insert(
            ticket,
            DelayedReply::Canned {
                intent,
                language: self.language,
            },
        );
        self.timers.schedule(
            ticket,
            self.settings.canned_reply_delay,
            self.events_tx.clone(),
            SessionEvent::TimerFired(ticket),
        );
    }

    fn start_slash_search(&mut self, utterance: &str) {
        let Some(keyword) = slash_keyword(utterance) else {
            return;
        };
        let ticket = self.allocate_ticket();
        self.state.set_search_keyword(keyword);
        self.state.transition(ScreenEvent::Respond);
        self.delayed.insert(
            ticket,
            DelayedReply::SlashAck {
                keyword: keyword.to_string(),
                language: self.language,
            },
        );
        self.timers.schedule(
            ticket,
            self.settings.slash_ack_delay,
            self.events_tx.clone(),
            SessionEvent::TimerFired(ticket),
        );
    }

    fn start_titanic(&mut self, utterance: &str) {
        let ticket = self.begin_reply();
        let filter = self.extractor.extract(utterance);
        tracing::debug!(ticket, ?filter, "Titanic search");

        let backend = Arc::clone(&self.titanic);
        let handle = RequestHandle::new();
        let task_handle = handle.clone();
        let timeout = self.settings.request_timeout;
        let tx = self.events_tx.clone();
        let task = tokio::spawn(async move {
            let result = guarded(&task_handle, timeout, backend.search(&filter)).await;
            let _ = tx.send(SessionEvent::TitanicSettled { ticket, result });
        });
        self.live = Some(LiveRequest {
            ticket,
            handle,
            task,
        });
    }

    fn start_chat(&mut self, utterance: &str, history: Vec<Message>) {
        let ticket = self.begin_reply();
        let request = ChatbotRequest {
            message: utterance.to_string(),
            conversation_history: history,
            user_profile: self.user_profile.clone(),
            context_info: (!self.context.is_empty()).then(|| self.context.clone()),
        };
        tracing::debug!(
            ticket,
            history_len = request.conversation_history.len(),
            "Chat request"
        );

        let backend = Arc::clone(&self.chatbot);
        let handle = RequestHandle::new();
        let task_handle = handle.clone();
        let timeout = self.settings.request_timeout;
        let tx = self.events_tx.clone();
        let task = tokio::spawn(async move {
            let result = guarded(&task_handle, timeout, backend.chat(&request)).await;
            let _ = tx.send(SessionEvent::ChatSettled { ticket, result });
        });
        self.live = Some(LiveRequest {
            ticket,
            handle,
            task,
        });
    }

    // -----------------------------------------------------------------
    // Event application
    // -----------------------------------------------------------------

    /// Wait for the next timer or request completion and apply it.
    ///
    /// Returns `None` once the session is idle and nothing is queued.
    pub async fn next_event(&mut self) -> Option<EventOutcome> {
        let event = match self.events_rx.try_recv() {
            Ok(event) => event,
            Err(_) if self.is_idle() => return None,
            Err(_) => self.events_rx.recv().await?,
        };
        Some(self.apply_event(event))
    }

    /// Apply events until no timer or request is outstanding.
    pub async fn run_until_idle(&mut self) {
        while self.next_event().await.is_some() {}
    }

    fn apply_event(&mut self, event: SessionEvent) -> EventOutcome {
        match event {
            SessionEvent::TimerFired(ticket) => {
                if !self.timers.complete(ticket) {
                    return EventOutcome::Ignored(ticket);
                }
                match self.delayed.remove(&ticket) {
                    Some(reply) => {
                        self.deliver(ticket, reply);
                        EventOutcome::Applied(ticket)
                    }
                    None => EventOutcome::Ignored(ticket),
                }
            }
            SessionEvent::TitanicSettled { ticket, result } => {
                if !self.take_live(ticket) {
                    return EventOutcome::Ignored(ticket);
                }
                let content = match result {
                    Ok(found) => {
                        tracing::info!(ticket, total = found.total_results, "Titanic search settled");
                        response::render_titanic(&found, self.language)
                    }
                    Err(e) => {
                        tracing::warn!(ticket, error = %e, "Titanic search failed");
                        response::titanic_error_text(&e, self.language)
                    }
                };
                self.state.resolve_placeholder(ticket, content);
                self.state.transition(ScreenEvent::Respond);
                EventOutcome::Applied(ticket)
            }
            SessionEvent::ChatSettled { ticket, result } => {
                if !self.take_live(ticket) {
                    return EventOutcome::Ignored(ticket);
                }
                let content = match result {
                    Ok(Some(reply)) => reply,
                    Ok(None) => {
                        tracing::warn!(ticket, "Chat response carried no reply text");
                        Phrase::NoReply.text(self.language).to_string()
                    }
                    Err(e) => {
                        tracing::warn!(ticket, error = %e, "Chat request failed");
                        response::failure_text(&e, self.language).to_string()
                    }
                };
                self.state.resolve_placeholder(ticket, content);
                self.state.transition(ScreenEvent::Respond);
                EventOutcome::Applied(ticket)
            }
        }
    }

    /// Clear the live request if it belongs to `ticket`.
    fn take_live(&mut self, ticket: Ticket) -> bool {
        match &self.live {
            Some(live) if live.ticket == ticket => {
                self.live = None;
                true
            }
            _ => {
                tracing::debug!(ticket, "Ignoring stale request result");
                false
            }
        }
    }

    fn deliver(&mut self, ticket: Ticket, reply: DelayedReply) {
        match reply {
            DelayedReply::Canned { intent, language } => {
                if let Some(content) = response::canned_reply(intent, language) {
                    self.state.resolve_placeholder(ticket, content);
                }
                self.apply_route_effect(intent);
                self.state.transition(ScreenEvent::Respond);
            }
            DelayedReply::SlashAck { keyword, language } => {
                self.state
                    .push_assistant(response::searching_text(&keyword, language));
            }
        }
    }

    fn apply_route_effect(&mut self, intent: Intent) {
        match intent {
            Intent::Nearby => self.state.set_route(places::nearby_route()),
            Intent::Museum => self.state.set_route(places::museum_route()),
            Intent::FoodRecommendation => self.state.set_route(places::food_route()),
            Intent::HistoricSites => self.state.set_route(places::historic_route()),
            Intent::Affirmation => {
                if self.state.request_route_draw() {
                    tracing::debug!(
                        generation = self.state.route_draw_generation(),
                        "Route draw requested"
                    );
                }
            }
            Intent::Titanic | Intent::SlashSearch | Intent::Chat => {}
        }
    }
}

impl Drop for HomeSession {
    fn drop(&mut self) {
        if let Some(live) = self.live.take() {
            live.handle.cancel(CancelReason::Teardown);
            live.task.abort();
        }
    }
}

/// Run `fut` until it completes, the handle is cancelled, or `timeout`
/// elapses. A timeout cancels the handle with [`CancelReason::Timeout`].
async fn guarded<T, F>(handle: &RequestHandle, timeout: Duration, fut: F) -> Result<T, ChatError>
where
    F: Future<Output = Result<T, ChatError>>,
{
    tokio::select! {
        biased;
        reason = handle.cancelled() => Err(ChatError::Cancelled(reason)),
        outcome = tokio::time::timeout(timeout, fut) => match outcome {
            Ok(result) => result,
            Err(_) => {
                handle.cancel(CancelReason::Timeout);
                Err(ChatError::Cancelled(CancelReason::Timeout))
            }
        },
    }
}

// =============================================================================
// Tests
// =============================================================================
