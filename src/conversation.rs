// src/conversation.rs

use crate::api::ApiClient;
use crate::constants::{DEFAULT_SESSION_TITLE, FALLBACK_ERROR_REPLY};
use crate::errors::AgriChatError;
use crate::models::ChatMessage;
use crate::session_store::SessionStore;
use log::{debug, error};
use std::sync::Arc;

/// Where the conversation currently stands. The awaiting flag and the active
/// session id always move together, so they live in one tagged state instead
/// of two independent fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConversationPhase {
    Idle { session_id: Option<String> },
    AwaitingResponse { session_id: Option<String> },
}

impl ConversationPhase {
    pub fn session_id(&self) -> Option<&str> {
        match self {
            ConversationPhase::Idle { session_id }
            | ConversationPhase::AwaitingResponse { session_id } => session_id.as_deref(),
        }
    }

    pub fn is_awaiting(&self) -> bool {
        matches!(self, ConversationPhase::AwaitingResponse { .. })
    }
}

/// Owns the ordered message log of the active session and drives the
/// send/receive protocol against the backend. The rendering layer reads this
/// state and forwards user intents; it never mutates anything here.
pub struct ConversationController {
    api: ApiClient,
    store: Arc<SessionStore>,
    messages: Vec<ChatMessage>,
    phase: ConversationPhase,
}

impl ConversationController {
    pub fn new(api: ApiClient, store: Arc<SessionStore>) -> Self {
        Self {
            api,
            store,
            messages: Vec::new(),
            phase: ConversationPhase::Idle { session_id: None },
        }
    }

    /// The display log, in insertion order.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_awaiting_response(&self) -> bool {
        self.phase.is_awaiting()
    }

    pub fn active_session_id(&self) -> Option<&str> {
        self.phase.session_id()
    }

    /// Sends one user turn to the backend.
    ///
    /// Blank input, or a send issued while a response is still pending, is a
    /// no-op (the UI disables submission; this guard is the backstop). The
    /// user's message is appended before the network call starts, and the
    /// assistant reply, or a synthesized diagnostic bubble on failure, is
    /// appended after it resolves. Failures never escape this method and the
    /// conversation stays usable afterward.
    pub async fn send_message(&mut self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            debug!("ignoring blank input");
            return;
        }
        if self.phase.is_awaiting() {
            debug!("ignoring send while a response is pending");
            return;
        }

        // The first message of a fresh chat arrives before any session
        // exists; mint one so the backend has somewhere to persist it.
        let session_id = match self.phase.session_id() {
            Some(id) => id.to_string(),
            None => match self.store.create_session(DEFAULT_SESSION_TITLE).await {
                Ok(session) => {
                    debug!("created session {}", session.id);
                    session.id
                }
                Err(err) => {
                    error!("session creation failed: {}", err);
                    self.messages.push(ChatMessage::user(text));
                    self.messages.push(ChatMessage::assistant(diagnostic(&err)));
                    return;
                }
            },
        };

        self.messages.push(ChatMessage::user(text));
        self.phase = ConversationPhase::AwaitingResponse {
            session_id: Some(session_id.clone()),
        };

        match self.api.predict(text, &session_id).await {
            Ok(reply) => {
                self.messages.push(ChatMessage::assistant(reply));
                // The backend may have renamed the session from its
                // placeholder title after this turn.
                self.store.refresh_in_background();
            }
            Err(err) => {
                error!("predict failed: {}", err);
                self.messages.push(ChatMessage::assistant(diagnostic(&err)));
            }
        }

        self.phase = ConversationPhase::Idle {
            session_id: Some(session_id),
        };
    }

    /// Switches to session `id` and replaces the log wholesale with its
    /// persisted history, translated into display shape in order. If the
    /// fetch fails the previous log stays on screen; no partial replacement.
    pub async fn load_session(&mut self, id: &str) {
        self.phase = ConversationPhase::AwaitingResponse {
            session_id: Some(id.to_string()),
        };

        match self.api.fetch_messages(id).await {
            Ok(stored) => {
                self.messages = stored.into_iter().map(ChatMessage::from).collect();
            }
            Err(err) => {
                error!("loading session {} failed: {}", id, err);
            }
        }

        self.phase = ConversationPhase::Idle {
            session_id: Some(id.to_string()),
        };
    }

    /// Begins a fresh conversation backed by a newly minted session. If
    /// creation fails nothing changes: an id the backend never confirmed is
    /// never adopted.
    pub async fn start_new_session(&mut self) {
        match self.store.create_session(DEFAULT_SESSION_TITLE).await {
            Ok(session) => {
                self.messages.clear();
                self.phase = ConversationPhase::Idle {
                    session_id: Some(session.id),
                };
            }
            Err(err) => {
                error!("could not start a new session: {}", err);
            }
        }
    }

    /// Abandons the in-progress conversation without contacting the backend.
    pub fn clear_conversation(&mut self) {
        self.messages.clear();
        self.phase = ConversationPhase::Idle { session_id: None };
    }

    /// Reaction to a store-side deletion: clears the view only when the
    /// deleted session is the one on screen.
    pub fn handle_session_deleted(&mut self, id: &str) {
        if self.phase.session_id() == Some(id) {
            self.messages.clear();
            self.phase = ConversationPhase::Idle { session_id: None };
        }
    }
}

// User-facing text for a failed turn. Errors always carry a message here,
// but a blank one still gets the fixed apology rather than an empty bubble.
fn diagnostic(err: &AgriChatError) -> String {
    let text = err.to_string();
    if text.trim().is_empty() {
        FALLBACK_ERROR_REPLY.to_string()
    } else {
        text
    }
}
