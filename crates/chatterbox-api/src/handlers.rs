//! Route handler functions for all API endpoints.
//!
//! Each handler extracts its JSON body or query parameters via axum
//! extractors, calls into AppState services, and returns JSON responses.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use chatterbox_hangman::{frame, GameState, GameStatus};

use crate::error::ApiError;
use crate::landing::LANDING_HTML;
use crate::state::AppState;

/// Answer sent when nothing matched the question.
pub const FALLBACK_ANSWER: &str = "I don't know the answer. Can you teach me?";

// =============================================================================
// Request types
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub question: String,
}

#[derive(Debug, Deserialize)]
pub struct TeachRequest {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Deserialize)]
pub struct GuessRequest {
    pub game_id: i64,
    pub letter: String,
}

/// Query parameters for GET /hangman/status. Parsed by hand so that a
/// missing or non-numeric id gets the API's own error body.
#[derive(Debug, Deserialize)]
pub struct StatusParams {
    pub game_id: Option<String>,
}

// =============================================================================
// Response types
// =============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
    pub questions: u64,
    pub games: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AskResponse {
    pub answer: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Stored pairs as `[question, answer]` arrays, or a message when empty.
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DisplayResponse {
    Pairs {
        questions_and_answers: Vec<(String, String)>,
    },
    Empty {
        message: String,
    },
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StartResponse {
    pub game_id: i64,
    pub game_state: GameState,
    pub hangman: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GameResponse {
    pub game_state: GameState,
    pub hangman: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl GameResponse {
    fn new(game_state: GameState) -> Self {
        let hangman = frame(game_state.wrong_guesses).to_string();
        Self {
            game_state,
            hangman,
            message: None,
        }
    }

    /// Attach the end-of-game message when the guess finished the game.
    fn with_outcome_message(mut self) -> Self {
        self.message = match self.game_state.status {
            GameStatus::Won => Some("Congratulations! You won!".to_string()),
            GameStatus::Lost => Some(format!("Game over! The word was {}.", self.game_state.word)),
            GameStatus::InProgress => None,
        };
        self
    }
}

// =============================================================================
// Handler functions
// =============================================================================

/// GET / - serve the self-contained landing page.
pub async fn index() -> impl IntoResponse {
    Html(LANDING_HTML)
}

/// GET /health - liveness plus store counts.
pub async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    let uptime = state.start_time.elapsed().as_secs();
    let questions = state.questions.count().unwrap_or_else(|e| {
        error!(error = %e, "Failed to count stored questions");
        0
    });
    let games = state.games.count().unwrap_or_else(|e| {
        error!(error = %e, "Failed to count games");
        0
    });

    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: uptime,
        questions,
        games,
    }))
}

/// POST /ask - answer a free-text question.
pub async fn ask(
    State(state): State<AppState>,
    payload: Result<Json<AskRequest>, JsonRejection>,
) -> Result<Json<AskResponse>, ApiError> {
    let Json(req) = payload?;
    let answer = state
        .responder
        .answer(&req.question)
        .await?
        .unwrap_or_else(|| FALLBACK_ANSWER.to_string());
    Ok(Json(AskResponse { answer }))
}

/// POST /teach - store a new question/answer pair.
pub async fn teach(
    State(state): State<AppState>,
    payload: Result<Json<TeachRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(req) = payload?;
    let question = req.question.trim();
    let answer = req.answer.trim();
    if question.is_empty() || answer.is_empty() {
        return Err(ApiError::BadRequest(
            "Both 'question' and 'answer' must not be empty".to_string(),
        ));
    }

    let id = state.questions.insert(question, answer)?;
    info!(id, "Learned a new response");
    Ok(Json(MessageResponse {
        message: "Thank you! I learned a new response!".to_string(),
    }))
}

/// GET /display - list every stored pair in insertion order.
pub async fn display(State(state): State<AppState>) -> Result<Json<DisplayResponse>, ApiError> {
    let pairs = state.questions.all()?;
    if pairs.is_empty() {
        return Ok(Json(DisplayResponse::Empty {
            message: "There are no stored questions and responses.".to_string(),
        }));
    }

    Ok(Json(DisplayResponse::Pairs {
        questions_and_answers: pairs
            .into_iter()
            .map(|pair| (pair.question, pair.answer))
            .collect(),
    }))
}

/// POST /reset - forget every taught pair.
pub async fn reset(State(state): State<AppState>) -> Result<Json<MessageResponse>, ApiError> {
    let removed = state.questions.clear()?;
    info!(removed, "Memory reset");
    Ok(Json(MessageResponse {
        message: "Memory has been reset.".to_string(),
    }))
}

/// POST /hangman/start - create a new game.
pub async fn hangman_start(
    State(state): State<AppState>,
) -> Result<Json<StartResponse>, ApiError> {
    let game_id = state.hangman.start_game()?;
    let game_state = state
        .hangman
        .get_state(game_id)?
        .ok_or_else(|| ApiError::Internal(format!("Game {} vanished after creation", game_id)))?;
    let hangman = frame(game_state.wrong_guesses).to_string();

    Ok(Json(StartResponse {
        game_id,
        game_state,
        hangman,
    }))
}

/// POST /hangman/guess - apply one letter to a game.
pub async fn hangman_guess(
    State(state): State<AppState>,
    payload: Result<Json<GuessRequest>, JsonRejection>,
) -> Result<Json<GameResponse>, ApiError> {
    let Json(req) = payload?;
    debug!(game_id = req.game_id, letter = %req.letter, "Guess received");

    let game_state = state
        .hangman
        .apply_guess(req.game_id, &req.letter)?
        .ok_or_else(|| ApiError::NotFound("Invalid game ID or letter.".to_string()))?;

    Ok(Json(GameResponse::new(game_state).with_outcome_message()))
}

/// GET /hangman/status?game_id= - current state of a game.
pub async fn hangman_status(
    State(state): State<AppState>,
    Query(params): Query<StatusParams>,
) -> Result<Json<GameResponse>, ApiError> {
    let raw = params
        .game_id
        .ok_or_else(|| ApiError::BadRequest("Parameter 'game_id' is required".to_string()))?;
    let game_id: i64 = raw.trim().parse().map_err(|_| {
        ApiError::BadRequest(format!("Parameter 'game_id' must be an integer, got {:?}", raw))
    })?;

    let game_state = state
        .hangman
        .get_state(game_id)?
        .ok_or_else(|| ApiError::NotFound("Invalid game ID.".to_string()))?;

    Ok(Json(GameResponse::new(game_state)))
}
