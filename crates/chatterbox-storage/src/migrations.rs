//! Database schema migrations.
//!
//! Applies the initial schema: the questions, hangman and schema_migrations
//! tables.

use rusqlite::Connection;
use tracing::info;

use chatterbox_core::error::ChatterboxError;

/// Run all pending database migrations.
pub fn run_migrations(conn: &Connection) -> Result<(), ChatterboxError> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version     INTEGER PRIMARY KEY NOT NULL,
            name        TEXT NOT NULL,
            applied_at  INTEGER NOT NULL DEFAULT (strftime('%s', 'now'))
        );",
    )
    .map_err(|e| ChatterboxError::Storage(format!("Failed to create migrations table: {}", e)))?;

    let current_version: i64 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
            [],
            |row| row.get(0),
        )
        .map_err(|e| {
            ChatterboxError::Storage(format!("Failed to query migration version: {}", e))
        })?;

    if current_version < 1 {
        apply_v1(conn)?;
        info!("Applied migration v1: initial_schema");
    }

    Ok(())
}

/// Version 1: Initial schema.
fn apply_v1(conn: &Connection) -> Result<(), ChatterboxError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS questions (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            question    TEXT NOT NULL,
            answer      TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_questions_question
            ON questions (question);

        CREATE TABLE IF NOT EXISTS hangman (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            word            TEXT NOT NULL,
            guessed_letters TEXT NOT NULL DEFAULT '',
            wrong_guesses   INTEGER NOT NULL DEFAULT 0
                            CHECK (wrong_guesses >= 0)
        );

        INSERT INTO schema_migrations (version, name) VALUES (1, 'initial_schema');
        ",
    )
    .map_err(|e| ChatterboxError::Storage(format!("Migration v1 failed: {}", e)))?;

    Ok(())
}
