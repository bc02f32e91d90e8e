//! Chatterbox API crate - axum HTTP server and route handlers.
//!
//! Exposes the chatbot (ask, teach, display, reset), the Hangman game
//! (start, guess, status), a health check and the landing page.

pub mod error;
pub mod handlers;
pub mod landing;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::{create_router, start_server};
pub use state::AppState;
