// src/errors.rs

use thiserror::Error;

/// Errors surfaced by the client.
#[derive(Debug, Error)]
pub enum AgriChatError {
    /// Network failure, timeout, or a non-success HTTP status.
    #[error("transport error: {0}")]
    Transport(String),

    /// Input rejected locally; never reaches the network.
    #[error("invalid input: {0}")]
    Validation(String),

    /// Missing or unusable deployment configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

pub type AgriChatResult<T> = Result<T, AgriChatError>;

impl AgriChatError {
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
