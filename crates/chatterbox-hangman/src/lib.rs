//! Hangman game engine.
//!
//! Owns the word-guessing lifecycle: game creation, per-letter guess
//! application, win/loss detection and ASCII-art progress frames.

pub mod art;
pub mod engine;
pub mod error;
pub mod game;

pub use art::{frame, MAX_WRONG_GUESSES, STAGES};
pub use engine::{HangmanEngine, VOCABULARY};
pub use error::HangmanError;
pub use game::{apply_guess, display_word, status, GameState, GameStatus, GuessOutcome};
