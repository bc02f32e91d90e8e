//! Error types for the chat engine.

use chatterbox_core::error::ChatterboxError;

/// Errors from the chat engine and its HTTP adapters.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("question cannot be empty")]
    EmptyQuestion,
    #[error("http client error: {0}")]
    Client(String),
}

impl From<reqwest::Error> for ChatError {
    fn from(err: reqwest::Error) -> Self {
        ChatError::Client(err.to_string())
    }
}

impl From<ChatError> for ChatterboxError {
    fn from(err: ChatError) -> Self {
        match err {
            ChatError::Client(msg) => ChatterboxError::Config(msg),
            other => ChatterboxError::Api(other.to_string()),
        }
    }
}
