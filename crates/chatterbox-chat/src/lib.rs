//! Conversational core for Chatterbox.
//!
//! Provides fuzzy question matching, intent routing between stored answers
//! and the weather/news adapters, and the adapters themselves.

pub mod entity;
pub mod error;
pub mod matcher;
pub mod news;
pub mod responder;
pub mod weather;

pub use entity::{Entity, EntityKind, EntityRecognizer, HeuristicRecognizer};
pub use error::ChatError;
pub use matcher::{find_best_match, find_best_match_with_cutoff, similarity, DEFAULT_CUTOFF};
pub use news::{describe_news, NewsApiClient, NewsLookup, NewsQuery};
pub use responder::{classify, clean_question, Intent, Responder};
pub use weather::{describe_weather, OpenWeatherClient, WeatherLookup};
