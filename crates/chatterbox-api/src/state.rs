//! Application state shared across all route handlers.
//!
//! AppState holds the repositories, the responder and the game engine.
//! It is passed to handlers via axum's State extractor.

use std::sync::Arc;
use std::time::Instant;

use chatterbox_chat::{NewsApiClient, NewsLookup, OpenWeatherClient, Responder, WeatherLookup};
use chatterbox_core::config::ChatterboxConfig;
use chatterbox_core::error::ChatterboxError;
use chatterbox_hangman::HangmanEngine;
use chatterbox_storage::{Database, HangmanRepository, QaRepository};

/// Shared application state.
///
/// All fields are cheap to clone; the repositories share one database handle.
#[derive(Clone)]
pub struct AppState {
    /// Taught question/answer pairs.
    pub questions: QaRepository,
    /// Question router over stored answers and the external adapters.
    pub responder: Arc<Responder>,
    /// Persisted Hangman games.
    pub games: HangmanRepository,
    /// Hangman game engine.
    pub hangman: HangmanEngine,
    /// Server start time for uptime calculation.
    pub start_time: Instant,
}

impl AppState {
    /// Create a new AppState with explicit weather and news adapters.
    pub fn new(
        config: &ChatterboxConfig,
        database: Arc<Database>,
        weather: Arc<dyn WeatherLookup>,
        news: Arc<dyn NewsLookup>,
    ) -> Self {
        let questions = QaRepository::new(Arc::clone(&database));
        let responder = Responder::new(questions.clone(), weather, news)
            .with_cutoff(config.matcher.cutoff);
        let games = HangmanRepository::new(database);
        let hangman = HangmanEngine::new(games.clone());

        Self {
            questions,
            responder: Arc::new(responder),
            games,
            hangman,
            start_time: Instant::now(),
        }
    }

    /// Create an AppState whose adapters call the configured providers.
    pub fn from_config(
        config: &ChatterboxConfig,
        database: Database,
    ) -> Result<Self, ChatterboxError> {
        let weather = OpenWeatherClient::from_config(&config.weather)?;
        let news = NewsApiClient::from_config(&config.news)?;
        Ok(Self::new(
            config,
            Arc::new(database),
            Arc::new(weather),
            Arc::new(news),
        ))
    }
}
