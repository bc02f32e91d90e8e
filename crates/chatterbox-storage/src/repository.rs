//! Repository implementations for SQLite-backed persistence.
//!
//! Provides QaRepository and HangmanRepository that operate on the Database
//! struct using raw SQL. Each method is a single statement; nothing spans
//! more than one record.

use std::sync::Arc;

use rusqlite::OptionalExtension;

use chatterbox_core::error::ChatterboxError;
use chatterbox_core::types::{HangmanGame, QaPair};

use crate::db::Database;

/// Repository for taught question/answer pairs.
#[derive(Debug, Clone)]
pub struct QaRepository {
    db: Arc<Database>,
}

impl QaRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Store a new pair and return its assigned id.
    pub fn insert(&self, question: &str, answer: &str) -> Result<i64, ChatterboxError> {
        self.db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO questions (question, answer) VALUES (?1, ?2)",
                rusqlite::params![question, answer],
            )
            .map_err(|e| ChatterboxError::Storage(format!("Failed to save question: {}", e)))?;
            Ok(conn.last_insert_rowid())
        })
    }

    /// All stored question texts, in insertion order.
    pub fn all_questions(&self) -> Result<Vec<String>, ChatterboxError> {
        self.db.with_conn(|conn| {
            let mut stmt = conn
                .prepare("SELECT question FROM questions ORDER BY id ASC")
                .map_err(|e| ChatterboxError::Storage(e.to_string()))?;

            let rows = stmt
                .query_map([], |row| row.get::<_, String>(0))
                .map_err(|e| ChatterboxError::Storage(e.to_string()))?;

            rows.collect::<Result<Vec<_>, _>>()
                .map_err(|e| ChatterboxError::Storage(e.to_string()))
        })
    }

    /// Answer stored for the exact question text.
    ///
    /// With duplicate questions the earliest inserted pair wins.
    pub fn answer_for(&self, question: &str) -> Result<Option<String>, ChatterboxError> {
        self.db.with_conn(|conn| {
            conn.query_row(
                "SELECT answer FROM questions WHERE question = ?1 ORDER BY id ASC LIMIT 1",
                rusqlite::params![question],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| ChatterboxError::Storage(e.to_string()))
        })
    }

    /// All stored pairs, in insertion order.
    pub fn all(&self) -> Result<Vec<QaPair>, ChatterboxError> {
        self.db.with_conn(|conn| {
            let mut stmt = conn
                .prepare("SELECT id, question, answer FROM questions ORDER BY id ASC")
                .map_err(|e| ChatterboxError::Storage(e.to_string()))?;

            let rows = stmt
                .query_map([], |row| {
                    Ok(QaPair {
                        id: row.get(0)?,
                        question: row.get(1)?,
                        answer: row.get(2)?,
                    })
                })
                .map_err(|e| ChatterboxError::Storage(e.to_string()))?;

            rows.collect::<Result<Vec<_>, _>>()
                .map_err(|e| ChatterboxError::Storage(e.to_string()))
        })
    }

    /// Delete every stored pair. Returns the number of rows removed.
    pub fn clear(&self) -> Result<usize, ChatterboxError> {
        self.db.with_conn(|conn| {
            conn.execute("DELETE FROM questions", [])
                .map_err(|e| ChatterboxError::Storage(format!("Failed to reset memory: {}", e)))
        })
    }

    pub fn count(&self) -> Result<u64, ChatterboxError> {
        self.db.with_conn(|conn| {
            let count: i64 = conn
                .query_row("SELECT COUNT(*) FROM questions", [], |row| row.get(0))
                .map_err(|e| ChatterboxError::Storage(e.to_string()))?;
            Ok(count as u64)
        })
    }
}

/// Repository for Hangman games.
#[derive(Debug, Clone)]
pub struct HangmanRepository {
    db: Arc<Database>,
}

impl HangmanRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Create a fresh game for `word` and return its assigned id.
    pub fn create(&self, word: &str) -> Result<i64, ChatterboxError> {
        self.db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO hangman (word, guessed_letters, wrong_guesses) VALUES (?1, '', 0)",
                rusqlite::params![word],
            )
            .map_err(|e| ChatterboxError::Storage(format!("Failed to create game: {}", e)))?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn find_by_id(&self, id: i64) -> Result<Option<HangmanGame>, ChatterboxError> {
        self.db.with_conn(|conn| {
            conn.query_row(
                "SELECT id, word, guessed_letters, wrong_guesses FROM hangman WHERE id = ?1",
                rusqlite::params![id],
                |row| {
                    Ok(HangmanGame {
                        id: row.get(0)?,
                        word: row.get(1)?,
                        guessed_letters: row.get(2)?,
                        wrong_guesses: row.get(3)?,
                    })
                },
            )
            .optional()
            .map_err(|e| ChatterboxError::Storage(e.to_string()))
        })
    }

    /// Persist the guess history of an existing game.
    ///
    /// Returns `false` when no game with that id exists.
    pub fn update_guesses(&self, game: &HangmanGame) -> Result<bool, ChatterboxError> {
        self.db.with_conn(|conn| {
            let changed = conn
                .execute(
                    "UPDATE hangman SET guessed_letters = ?1, wrong_guesses = ?2 WHERE id = ?3",
                    rusqlite::params![game.guessed_letters, game.wrong_guesses, game.id],
                )
                .map_err(|e| ChatterboxError::Storage(format!("Failed to update game: {}", e)))?;
            Ok(changed > 0)
        })
    }

    pub fn count(&self) -> Result<u64, ChatterboxError> {
        self.db.with_conn(|conn| {
            let count: i64 = conn
                .query_row("SELECT COUNT(*) FROM hangman", [], |row| row.get(0))
                .map_err(|e| ChatterboxError::Storage(e.to_string()))?;
            Ok(count as u64)
        })
    }
}
