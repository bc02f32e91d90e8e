//! Record types shared between storage, the chat engine and the game engine.

use serde::{Deserialize, Serialize};

/// A taught question/answer record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaPair {
    pub id: i64,
    pub question: String,
    pub answer: String,
}

/// A persisted Hangman game with its guess history.
///
/// `guessed_letters` keeps each letter once, in the order it was guessed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HangmanGame {
    pub id: i64,
    pub word: String,
    pub guessed_letters: String,
    pub wrong_guesses: u32,
}

impl HangmanGame {
    /// Whether `letter` has already been guessed in this game.
    pub fn has_guessed(&self, letter: char) -> bool {
        self.guessed_letters.contains(letter)
    }
}
