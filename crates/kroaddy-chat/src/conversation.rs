//! Conversation state owned by the home-screen session.
//!
//! Holds the message log, the route shown on the map, the selected place and
//! the active screen. The log only grows, except for the in-place
//! replacement of the typing placeholder and an explicit reset.

use kroaddy_core::types::{Location, Message, Role};

/// Identifies the placeholder, timer or request a settling event belongs to.
pub type Ticket = u64;

/// Screen currently presented by the home view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Screen {
    #[default]
    Initial,
    ChatResponse,
    PlaceDetail,
}

/// Inputs to the screen state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScreenEvent {
    /// A handler produced (or started producing) a reply.
    Respond,
    SelectPlace,
    ClosePlace,
    Reset,
}

impl Screen {
    /// Next screen after `event`.
    ///
    /// - Respond: always ChatResponse
    /// - SelectPlace: Initial -> PlaceDetail, otherwise unchanged
    /// - ClosePlace: PlaceDetail -> ChatResponse, otherwise unchanged
    /// - Reset: always Initial
    pub fn apply(self, event: ScreenEvent) -> Screen {
        match (self, event) {
            (_, ScreenEvent::Respond) => Screen::ChatResponse,
            (Screen::Initial, ScreenEvent::SelectPlace) => Screen::PlaceDetail,
            (Screen::PlaceDetail, ScreenEvent::ClosePlace) => Screen::ChatResponse,
            (_, ScreenEvent::Reset) => Screen::Initial,
            (current, _) => current,
        }
    }
}

/// Messages plus the auxiliary view state the handlers mutate.
#[derive(Debug, Clone, Default)]
pub struct ConversationState {
    messages: Vec<Message>,
    placeholder: Option<Ticket>,
    route: Vec<Location>,
    selected_place: Option<Location>,
    search_keyword: String,
    route_draw_generation: u64,
    screen: Screen,
}

impl ConversationState {
    pub fn new() -> Self {
        Self::default()
    }

    // -----------------------------------------------------------------
    // Read access
    // -----------------------------------------------------------------

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Ticket of the outstanding typing placeholder, if any.
    pub fn placeholder(&self) -> Option<Ticket> {
        self.placeholder
    }

    pub fn route(&self) -> &[Location] {
        &self.route
    }

    pub fn selected_place(&self) -> Option<&Location> {
        self.selected_place.as_ref()
    }

    pub fn search_keyword(&self) -> &str {
        &self.search_keyword
    }

    /// Bumped each time the view is asked to draw the current route.
    pub fn route_draw_generation(&self) -> u64 {
        self.route_draw_generation
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    // -----------------------------------------------------------------
    // Messages
    // -----------------------------------------------------------------

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(Message::user(content));
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.messages.push(Message::assistant(content));
    }

    /// Append a typing placeholder owned by `ticket`.
    ///
    /// Returns `false` (and appends nothing) while another placeholder is
    /// still outstanding.
    pub fn begin_placeholder(&mut self, ticket: Ticket, typing_text: &str) -> bool {
        if self.placeholder.is_some() {
            tracing::warn!(ticket, outstanding = ?self.placeholder, "Placeholder already outstanding");
            return false;
        }
        self.messages.push(Message::assistant(typing_text));
        self.placeholder = Some(ticket);
        true
    }

    /// Replace the placeholder owned by `ticket` with its final content.
    ///
    /// Returns `false` without touching the log if `ticket` does not own the
    /// outstanding placeholder, which makes repeated resolution a no-op.
    pub fn resolve_placeholder(&mut self, ticket: Ticket, content: impl Into<String>) -> bool {
        if self.placeholder != Some(ticket) {
            return false;
        }
        self.placeholder = None;
        match self.messages.last_mut() {
            Some(last) if last.role == Role::Assistant => {
                last.content = content.into();
            }
            _ => {
                // The placeholder always sits at the tail; recover by appending.
                tracing::warn!(ticket, "Placeholder missing from tail; appending reply");
                self.messages.push(Message::assistant(content));
            }
        }
        true
    }

    // -----------------------------------------------------------------
    // View state
    // -----------------------------------------------------------------

    /// Replace the route wholesale and clear any pending map keyword search.
    pub fn set_route(&mut self, route: Vec<Location>) {
        self.route = route;
        self.search_keyword.clear();
    }

    pub fn set_search_keyword(&mut self, keyword: impl Into<String>) {
        self.search_keyword = keyword.into();
    }

    /// Ask the view to draw the route. Does nothing when there is no route.
    pub fn request_route_draw(&mut self) -> bool {
        if self.route.is_empty() {
            return false;
        }
        self.route_draw_generation += 1;
        true
    }

    pub fn transition(&mut self, event: ScreenEvent) {
        self.screen = self.screen.apply(event);
    }

    pub fn select_place(&mut self, place: Location) {
        self.selected_place = Some(place);
        self.transition(ScreenEvent::SelectPlace);
    }

    pub fn close_place(&mut self) {
        self.selected_place = None;
        self.transition(ScreenEvent::ClosePlace);
    }

    /// Clear everything and return to the initial screen.
    pub fn reset(&mut self) {
        self.messages.clear();
        self.placeholder = None;
        self.route.clear();
        self.selected_place = None;
        self.search_keyword.clear();
        self.route_draw_generation = 0;
        self.transition(ScreenEvent::Reset);
    }
}

// =============================================================================
// Tests
// =============================================================================
