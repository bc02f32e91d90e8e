//! Pure game rules: display masking, status derivation and guess application.

use serde::{Deserialize, Serialize};

use chatterbox_core::types::HangmanGame;

use crate::art::MAX_WRONG_GUESSES;

/// Placeholder shown for letters not yet guessed.
pub const PLACEHOLDER: char = '_';

/// Lifecycle state of a game, derived from its record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            GameStatus::InProgress => "in_progress",
            GameStatus::Won => "won",
            GameStatus::Lost => "lost",
        };
        f.write_str(s)
    }
}

/// What a single guess did to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    /// The letter was already guessed; nothing changed.
    Repeated,
    /// The letter occurs in the word.
    Hit,
    /// The letter does not occur in the word.
    Miss,
}

/// Full game record plus the derived fields clients render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub id: i64,
    pub word: String,
    pub display_word: String,
    pub guessed_letters: String,
    pub wrong_guesses: u32,
    pub status: GameStatus,
}

impl From<&HangmanGame> for GameState {
    fn from(game: &HangmanGame) -> Self {
        Self {
            id: game.id,
            word: game.word.clone(),
            display_word: display_word(&game.word, &game.guessed_letters),
            guessed_letters: game.guessed_letters.clone(),
            wrong_guesses: game.wrong_guesses,
            status: status(game),
        }
    }
}

/// Mask every letter of `word` that is not in `guessed`.
pub fn display_word(word: &str, guessed: &str) -> String {
    word.chars()
        .map(|c| if guessed.contains(c) { c } else { PLACEHOLDER })
        .collect()
}

/// Derive the lifecycle state. A fully revealed word wins even on the guess
/// that would otherwise have been the last allowed miss.
pub fn status(game: &HangmanGame) -> GameStatus {
    if !display_word(&game.word, &game.guessed_letters).contains(PLACEHOLDER) {
        GameStatus::Won
    } else if game.wrong_guesses >= MAX_WRONG_GUESSES {
        GameStatus::Lost
    } else {
        GameStatus::InProgress
    }
}

/// Record `letter` against `game`.
///
/// Does not check whether the game is already over; the engine does that.
pub fn apply_guess(game: &mut HangmanGame, letter: char) -> GuessOutcome {
    if game.has_guessed(letter) {
        return GuessOutcome::Repeated;
    }
    game.guessed_letters.push(letter);
    if game.word.contains(letter) {
        GuessOutcome::Hit
    } else {
        game.wrong_guesses += 1;
        GuessOutcome::Miss
    }
}
