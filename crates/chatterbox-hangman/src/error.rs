//! Error types for the Hangman engine.

use chatterbox_core::error::ChatterboxError;

use crate::game::GameStatus;

/// Errors from the Hangman engine.
#[derive(Debug, thiserror::Error)]
pub enum HangmanError {
    #[error("guess must be a single letter, got {0:?}")]
    InvalidLetter(String),
    #[error("game {id} is already over ({status})")]
    GameOver { id: i64, status: GameStatus },
    #[error("word list is empty")]
    EmptyVocabulary,
    #[error("storage error: {0}")]
    Storage(String),
}

impl From<ChatterboxError> for HangmanError {
    fn from(err: ChatterboxError) -> Self {
        match err {
            ChatterboxError::Storage(msg) => HangmanError::Storage(msg),
            other => HangmanError::Storage(other.to_string()),
        }
    }
}
