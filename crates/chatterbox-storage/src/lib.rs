//! Chatterbox Storage crate - SQLite persistence for taught answers and games.
//!
//! Provides a WAL-mode SQLite database with migrations and repository
//! implementations for question/answer pairs and Hangman games.

pub mod db;
pub mod migrations;
pub mod repository;

pub use db::Database;
pub use repository::{HangmanRepository, QaRepository};
