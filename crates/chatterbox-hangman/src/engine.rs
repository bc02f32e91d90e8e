//! Game lifecycle over the persisted Hangman records.

use rand::seq::SliceRandom;
use tracing::{debug, info};

use chatterbox_storage::HangmanRepository;

use crate::error::HangmanError;
use crate::game::{self, GameState, GuessOutcome};

/// Words a new game may pick from.
pub const VOCABULARY: [&str; 5] = ["python", "flask", "hangman", "chatbot", "database"];

/// Starts games and applies guesses, persisting every change.
#[derive(Debug, Clone)]
pub struct HangmanEngine {
    repo: HangmanRepository,
    vocabulary: Vec<String>,
}

impl HangmanEngine {
    /// Engine over the standard vocabulary.
    pub fn new(repo: HangmanRepository) -> Self {
        Self::with_vocabulary(repo, VOCABULARY.iter().map(|w| w.to_string()).collect())
    }

    /// Engine with a custom word list. Words are lowercased.
    pub fn with_vocabulary(repo: HangmanRepository, vocabulary: Vec<String>) -> Self {
        let vocabulary = vocabulary.into_iter().map(|w| w.to_lowercase()).collect();
        Self { repo, vocabulary }
    }

    /// Create a game with a word chosen uniformly at random; returns its id.
    pub fn start_game(&self) -> Result<i64, HangmanError> {
        let word = self
            .vocabulary
            .choose(&mut rand::thread_rng())
            .ok_or(HangmanError::EmptyVocabulary)?;
        let id = self.repo.create(word)?;
        info!(game_id = id, "Hangman game started");
        Ok(id)
    }

    /// Current state of a game, or `None` for an unknown id.
    pub fn get_state(&self, id: i64) -> Result<Option<GameState>, HangmanError> {
        Ok(self.repo.find_by_id(id)?.as_ref().map(GameState::from))
    }

    /// Apply one letter guess to a game.
    ///
    /// Returns `None` for an unknown id. A repeated letter leaves the game
    /// untouched and returns its current state. Guesses on a finished game
    /// are rejected with [`HangmanError::GameOver`].
    pub fn apply_guess(&self, id: i64, letter: &str) -> Result<Option<GameState>, HangmanError> {
        let letter = normalize_letter(letter)?;

        let Some(mut record) = self.repo.find_by_id(id)? else {
            return Ok(None);
        };

        let status = game::status(&record);
        if status.is_terminal() {
            return Err(HangmanError::GameOver { id, status });
        }

        let outcome = game::apply_guess(&mut record, letter);
        debug!(game_id = id, %letter, ?outcome, "Hangman guess applied");
        if outcome == GuessOutcome::Repeated {
            return Ok(Some(GameState::from(&record)));
        }

        if !self.repo.update_guesses(&record)? {
            return Ok(None);
        }
        self.get_state(id)
    }
}

/// Accept exactly one alphabetic character, lowercased.
fn normalize_letter(raw: &str) -> Result<char, HangmanError> {
    let mut chars = raw.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_alphabetic() => {
            let mut lower = c.to_lowercase();
            match (lower.next(), lower.next()) {
                (Some(l), None) => Ok(l),
                _ => Err(HangmanError::InvalidLetter(raw.to_string())),
            }
        }
        _ => Err(HangmanError::InvalidLetter(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chatterbox_storage::Database;

    use super::*;
    use crate::art::MAX_WRONG_GUESSES;
    use crate::game::GameStatus;

    fn engine_with(word: &str) -> HangmanEngine {
        let repo = HangmanRepository::new(Arc::new(Database::in_memory().unwrap()));
        HangmanEngine::with_vocabulary(repo, vec![word.to_string()])
    }

    #[test]
    fn test_start_game_picks_from_vocabulary() {
        let repo = HangmanRepository::new(Arc::new(Database::in_memory().unwrap()));
        let engine = HangmanEngine::new(repo);
        for _ in 0..20 {
            let id = engine.start_game().unwrap();
            let state = engine.get_state(id).unwrap().unwrap();
            assert!(VOCABULARY.contains(&state.word.as_str()));
            assert_eq!(state.guessed_letters, "");
            assert_eq!(state.wrong_guesses, 0);
            assert_eq!(state.status, GameStatus::InProgress);
        }
    }

    #[test]
    fn test_empty_vocabulary() {
        let repo = HangmanRepository::new(Arc::new(Database::in_memory().unwrap()));
        let engine = HangmanEngine::with_vocabulary(repo, vec![]);
        assert!(matches!(
            engine.start_game(),
            Err(HangmanError::EmptyVocabulary)
        ));
    }

    #[test]
    fn test_unknown_game() {
        let engine = engine_with("flask");
        assert!(engine.get_state(404).unwrap().is_none());
        assert!(engine.apply_guess(404, "a").unwrap().is_none());
    }

    #[test]
    fn test_every_word_can_be_won_without_mistakes() {
        for word in VOCABULARY {
            let engine = engine_with(word);
            let id = engine.start_game().unwrap();
            let mut state = engine.get_state(id).unwrap().unwrap();
            for c in word.chars() {
                state = engine.apply_guess(id, &c.to_string()).unwrap().unwrap();
            }
            assert_eq!(state.status, GameStatus::Won, "word {word}");
            assert_eq!(state.wrong_guesses, 0);
            assert_eq!(state.display_word, word);
        }
    }

    #[test]
    fn test_repeated_wrong_letter_counts_once() {
        let engine = engine_with("flask");
        let id = engine.start_game().unwrap();
        let first = engine.apply_guess(id, "z").unwrap().unwrap();
        let second = engine.apply_guess(id, "z").unwrap().unwrap();
        assert_eq!(first.wrong_guesses, 1);
        assert_eq!(second, first);
    }

    #[test]
    fn test_uppercase_letter_is_lowercased() {
        let engine = engine_with("flask");
        let id = engine.start_game().unwrap();
        let state = engine.apply_guess(id, " F ").unwrap().unwrap();
        assert_eq!(state.guessed_letters, "f");
        assert_eq!(state.display_word, "f____");
    }

    #[test]
    fn test_invalid_letters_rejected() {
        let engine = engine_with("flask");
        let id = engine.start_game().unwrap();
        for bad in ["", "ab", "1", "?", "  "] {
            assert!(
                matches!(
                    engine.apply_guess(id, bad),
                    Err(HangmanError::InvalidLetter(_))
                ),
                "input {bad:?}"
            );
        }
        let state = engine.get_state(id).unwrap().unwrap();
        assert_eq!(state.guessed_letters, "");
    }

    #[test]
    fn test_ten_misses_lose_and_lock_game() {
        let engine = engine_with("python");
        let id = engine.start_game().unwrap();
        let mut state = engine.get_state(id).unwrap().unwrap();
        for (k, c) in "abcdefgijk".chars().enumerate() {
            state = engine.apply_guess(id, &c.to_string()).unwrap().unwrap();
            assert_eq!(state.wrong_guesses, k as u32 + 1);
        }
        assert_eq!(state.wrong_guesses, MAX_WRONG_GUESSES);
        assert_eq!(state.status, GameStatus::Lost);

        let err = engine.apply_guess(id, "p").unwrap_err();
        assert!(matches!(
            err,
            HangmanError::GameOver {
                status: GameStatus::Lost,
                ..
            }
        ));
        assert_eq!(engine.get_state(id).unwrap().unwrap(), state);
    }

    #[test]
    fn test_won_game_rejects_further_guesses() {
        let engine = engine_with("flask");
        let id = engine.start_game().unwrap();
        for c in ["f", "l", "a", "s", "k"] {
            engine.apply_guess(id, c).unwrap();
        }
        assert!(matches!(
            engine.apply_guess(id, "z"),
            Err(HangmanError::GameOver {
                status: GameStatus::Won,
                ..
            })
        ));
    }

    #[test]
    fn test_get_state_is_idempotent() {
        let engine = engine_with("chatbot");
        let id = engine.start_game().unwrap();
        engine.apply_guess(id, "t").unwrap();
        let a = engine.get_state(id).unwrap().unwrap();
        let b = engine.get_state(id).unwrap().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.display_word, "___t__t");
    }
}
