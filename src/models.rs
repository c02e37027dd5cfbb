// src/models.rs

use serde::{Deserialize, Serialize};

/// A conversation thread as the backend reports it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub title: String,
    /// Backend timestamp, passed through verbatim. The server writes plain
    /// SQLite datetime strings, not RFC 3339, and the field is informational
    /// only, so it is never parsed client-side.
    pub created_at: String,
}

/// A message in the backend's persisted shape.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StoredMessage {
    pub role: String, // "user" or "assistant"
    pub content: String,
}

/// Who produced a displayed message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Author {
    User,
    Assistant,
}

/// A message in display shape: what the rendering layer shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatMessage {
    pub text: String,
    pub author: Author,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            author: Author::User,
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            author: Author::Assistant,
        }
    }
}

/// Translation from persisted shape to display shape. Total: any role the
/// client does not recognize is rendered as the assistant.
impl From<StoredMessage> for ChatMessage {
    fn from(stored: StoredMessage) -> Self {
        let author = if stored.role == "user" {
            Author::User
        } else {
            Author::Assistant
        };
        Self {
            text: stored.content,
            author,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_roles_translate_to_authors() {
        let user: ChatMessage = StoredMessage {
            role: "user".to_string(),
            content: "A".to_string(),
        }
        .into();
        assert_eq!(user, ChatMessage::user("A"));

        let assistant: ChatMessage = StoredMessage {
            role: "assistant".to_string(),
            content: "B".to_string(),
        }
        .into();
        assert_eq!(assistant, ChatMessage::assistant("B"));
    }

    #[test]
    fn unknown_role_falls_back_to_assistant() {
        let msg: ChatMessage = StoredMessage {
            role: "system".to_string(),
            content: "C".to_string(),
        }
        .into();
        assert_eq!(msg.author, Author::Assistant);
    }
}
