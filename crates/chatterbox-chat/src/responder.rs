//! Question routing: weather, news, or taught answers.

use std::sync::Arc;

use regex::Regex;
use tracing::{debug, error};

use chatterbox_storage::QaRepository;

use crate::entity::{EntityKind, EntityRecognizer, HeuristicRecognizer};
use crate::error::ChatError;
use crate::matcher::{find_best_match_with_cutoff, DEFAULT_CUTOFF};
use crate::news::NewsLookup;
use crate::weather::WeatherLookup;

/// Returned when a weather question names no city.
pub const NO_CITY_MESSAGE: &str = "Error: Could not identify the city for weather information.";
/// Returned when a news question is left with no topic.
pub const NO_TOPIC_MESSAGE: &str = "Error: Could not identify the topic for news updates.";

/// Which source answers a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Weather,
    News,
    Stored,
}

/// Drop trailing question marks and surrounding whitespace.
pub fn clean_question(question: &str) -> &str {
    question.trim().trim_end_matches('?').trim()
}

/// Classify a cleaned question. Weather wins over news.
pub fn classify(cleaned: &str) -> Intent {
    let lower = cleaned.to_lowercase();
    if lower.contains("weather") {
        Intent::Weather
    } else if lower.contains("news") || lower.contains("headlines") {
        Intent::News
    } else {
        Intent::Stored
    }
}

/// Answers free-text questions from the adapters or the taught pairs.
pub struct Responder {
    questions: QaRepository,
    weather: Arc<dyn WeatherLookup>,
    news: Arc<dyn NewsLookup>,
    recognizer: Box<dyn EntityRecognizer>,
    cutoff: f64,
    city_regex: Regex,
}

impl Responder {
    pub fn new(
        questions: QaRepository,
        weather: Arc<dyn WeatherLookup>,
        news: Arc<dyn NewsLookup>,
    ) -> Self {
        Self {
            questions,
            weather,
            news,
            recognizer: Box::new(HeuristicRecognizer::new()),
            cutoff: DEFAULT_CUTOFF,
            city_regex: Regex::new(r"(?i)weather in ([a-z\s]+)").expect("city regex is valid"),
        }
    }

    /// Override the minimum similarity for stored questions.
    pub fn with_cutoff(mut self, cutoff: f64) -> Self {
        self.cutoff = cutoff;
        self
    }

    pub fn with_recognizer(mut self, recognizer: Box<dyn EntityRecognizer>) -> Self {
        self.recognizer = recognizer;
        self
    }

    /// Answer a question.
    ///
    /// `Ok(None)` means nothing matched and the caller should ask to be
    /// taught. Adapter failures come back as `Ok(Some(text))`.
    pub async fn answer(&self, question: &str) -> Result<Option<String>, ChatError> {
        let cleaned = clean_question(question);
        if cleaned.is_empty() {
            return Err(ChatError::EmptyQuestion);
        }

        let intent = classify(cleaned);
        debug!(?intent, "Question classified");

        let reply = match intent {
            Intent::Weather => match self.city_for(cleaned) {
                Some(city) => Some(self.weather.get_weather(&city).await),
                None => Some(NO_CITY_MESSAGE.to_string()),
            },
            Intent::News => match self.topic_for(cleaned) {
                Some(topic) => Some(self.news.get_news(&topic).await),
                None => Some(NO_TOPIC_MESSAGE.to_string()),
            },
            Intent::Stored => self.stored_answer(cleaned),
        };
        Ok(reply)
    }

    fn city_for(&self, cleaned: &str) -> Option<String> {
        self.recognizer
            .first(cleaned, EntityKind::Place)
            .or_else(|| {
                self.city_regex
                    .captures(cleaned)
                    .and_then(|caps| caps.get(1))
                    .map(|m| m.as_str().trim().to_string())
            })
            .filter(|city| !city.is_empty())
    }

    fn topic_for(&self, cleaned: &str) -> Option<String> {
        self.recognizer
            .first(cleaned, EntityKind::Topic)
            .or_else(|| {
                Some(
                    cleaned
                        .replace("news", "")
                        .replace("headlines", "")
                        .trim()
                        .to_string(),
                )
            })
            .filter(|topic| !topic.is_empty())
    }

    /// Store failures are logged and read as "no match".
    fn stored_answer(&self, cleaned: &str) -> Option<String> {
        let questions = match self.questions.all_questions() {
            Ok(questions) => questions,
            Err(e) => {
                error!(error = %e, "Failed to load stored questions");
                return None;
            }
        };

        let best = find_best_match_with_cutoff(cleaned, &questions, self.cutoff)?;
        debug!(matched = best, "Stored question matched");
        match self.questions.answer_for(best) {
            Ok(answer) => answer,
            Err(e) => {
                error!(error = %e, "Failed to load stored answer");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use chatterbox_storage::Database;

    use super::*;
    use crate::entity::Entity;

    struct EchoWeather;

    #[async_trait]
    impl WeatherLookup for EchoWeather {
        async fn get_weather(&self, city: &str) -> String {
            format!("weather:{}", city)
        }
    }

    struct EchoNews;

    #[async_trait]
    impl NewsLookup for EchoNews {
        async fn get_news(&self, topic: &str) -> String {
            format!("news:{}", topic)
        }
    }

    fn responder() -> (Responder, QaRepository) {
        let repo = QaRepository::new(Arc::new(Database::in_memory().unwrap()));
        let responder = Responder::new(repo.clone(), Arc::new(EchoWeather), Arc::new(EchoNews));
        (responder, repo)
    }

    #[test]
    fn test_clean_question() {
        assert_eq!(clean_question("  how old are you?  "), "how old are you");
        assert_eq!(clean_question("really???"), "really");
        assert_eq!(clean_question("?"), "");
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify("What is the WEATHER like"), Intent::Weather);
        assert_eq!(classify("latest news on rust"), Intent::News);
        assert_eq!(classify("top Headlines today"), Intent::News);
        assert_eq!(classify("weather news"), Intent::Weather);
        assert_eq!(classify("how old are you"), Intent::Stored);
    }

    #[tokio::test]
    async fn test_weather_uses_recognized_place() {
        let (r, _) = responder();
        assert_eq!(
            r.answer("What's the weather in San Francisco?").await.unwrap(),
            Some("weather:San Francisco".to_string())
        );
    }

    #[tokio::test]
    async fn test_weather_falls_back_to_pattern() {
        let (r, _) = responder();
        assert_eq!(
            r.answer("weather in new york").await.unwrap(),
            Some("weather:new york".to_string())
        );
    }

    #[tokio::test]
    async fn test_weather_without_city() {
        let (r, _) = responder();
        assert_eq!(
            r.answer("how is the weather").await.unwrap(),
            Some(NO_CITY_MESSAGE.to_string())
        );
    }

    #[tokio::test]
    async fn test_news_topic_from_quotes() {
        let (r, _) = responder();
        assert_eq!(
            r.answer(r#"news about "electric cars""#).await.unwrap(),
            Some("news:electric cars".to_string())
        );
    }

    #[tokio::test]
    async fn test_news_topic_fallback_strips_keywords() {
        let (r, _) = responder();
        assert_eq!(
            r.answer("bitcoin news").await.unwrap(),
            Some("news:bitcoin".to_string())
        );
        assert_eq!(
            r.answer("headlines football").await.unwrap(),
            Some("news:football".to_string())
        );
    }

    #[tokio::test]
    async fn test_news_without_topic() {
        let (r, _) = responder();
        assert_eq!(
            r.answer("news?").await.unwrap(),
            Some(NO_TOPIC_MESSAGE.to_string())
        );
        assert_eq!(
            r.answer("headlines news").await.unwrap(),
            Some(NO_TOPIC_MESSAGE.to_string())
        );
    }

    #[tokio::test]
    async fn test_taught_answer_for_rephrased_question() {
        let (r, repo) = responder();
        repo.insert("capital of france", "paris").unwrap();
        assert_eq!(
            r.answer("whats the capital of france?").await.unwrap(),
            Some("paris".to_string())
        );
    }

    #[tokio::test]
    async fn test_unknown_question_returns_none() {
        let (r, repo) = responder();
        repo.insert("what is your name", "Chatterbox").unwrap();
        assert_eq!(r.answer("completely unrelated text").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_answer_does_not_modify_store() {
        let (r, repo) = responder();
        repo.insert("what is your name", "Chatterbox").unwrap();
        r.answer("wat is your name").await.unwrap();
        r.answer("weather in Paris").await.unwrap();
        assert_eq!(repo.count().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_empty_question_rejected() {
        let (r, _) = responder();
        assert!(matches!(
            r.answer("  ?? ").await,
            Err(ChatError::EmptyQuestion)
        ));
    }

    #[tokio::test]
    async fn test_stricter_cutoff() {
        let (r, repo) = responder();
        repo.insert("capital of france", "paris").unwrap();
        let r = r.with_cutoff(0.9);
        assert_eq!(r.answer("whats the capital of france").await.unwrap(), None);
    }

    struct FixedRecognizer;

    impl EntityRecognizer for FixedRecognizer {
        fn recognize(&self, _text: &str) -> Vec<Entity> {
            vec![Entity {
                kind: EntityKind::Place,
                text: "Lisbon".to_string(),
            }]
        }
    }

    #[tokio::test]
    async fn test_custom_recognizer() {
        let (r, _) = responder();
        let r = r.with_recognizer(Box::new(FixedRecognizer));
        assert_eq!(
            r.answer("weather please").await.unwrap(),
            Some("weather:Lisbon".to_string())
        );
    }
}
