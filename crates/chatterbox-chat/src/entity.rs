//! Named-entity recognition seam.
//!
//! The responder only needs places (for weather) and topics (for news).
//! [`HeuristicRecognizer`] covers the common phrasings with regexes; a real
//! NER model can be plugged in through [`EntityRecognizer`].

use regex::Regex;

/// Kinds of entity the responder consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Place,
    Topic,
}

/// A recognized span of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub kind: EntityKind,
    pub text: String,
}

/// Extracts entities from free text.
pub trait EntityRecognizer: Send + Sync {
    fn recognize(&self, text: &str) -> Vec<Entity>;

    /// First entity of `kind`, if any.
    fn first(&self, text: &str, kind: EntityKind) -> Option<String> {
        self.recognize(text)
            .into_iter()
            .find(|e| e.kind == kind)
            .map(|e| e.text)
    }
}

/// Regex-based recognizer.
///
/// Places are capitalized word runs after `in`, `at`, `for` or `near`;
/// topics are double-quoted phrases.
pub struct HeuristicRecognizer {
    place_regex: Regex,
    topic_regex: Regex,
}

impl HeuristicRecognizer {
    pub fn new() -> Self {
        Self {
            place_regex: Regex::new(
                r"\b(?:in|at|for|near)\s+([A-Z][\w'-]*(?:\s+[A-Z][\w'-]*)*)",
            )
            .expect("place regex is valid"),
            topic_regex: Regex::new(r#""([^"]+)""#).expect("topic regex is valid"),
        }
    }
}

impl Default for HeuristicRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityRecognizer for HeuristicRecognizer {
    fn recognize(&self, text: &str) -> Vec<Entity> {
        let places = self
            .place_regex
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| Entity {
                kind: EntityKind::Place,
                text: m.as_str().to_string(),
            });

        let topics = self
            .topic_regex
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().trim())
            .filter(|t| !t.is_empty())
            .map(|t| Entity {
                kind: EntityKind::Topic,
                text: t.to_string(),
            });

        places.chain(topics).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_after_preposition() {
        let r = HeuristicRecognizer::new();
        assert_eq!(
            r.first("What is the weather in Paris", EntityKind::Place),
            Some("Paris".to_string())
        );
        assert_eq!(
            r.first("weather for New York today", EntityKind::Place),
            Some("New York".to_string())
        );
    }

    #[test]
    fn test_lowercase_city_not_recognized() {
        let r = HeuristicRecognizer::new();
        assert_eq!(r.first("weather in london", EntityKind::Place), None);
    }

    #[test]
    fn test_quoted_topic() {
        let r = HeuristicRecognizer::new();
        assert_eq!(
            r.first(r#"latest news about "rust language""#, EntityKind::Topic),
            Some("rust language".to_string())
        );
        assert_eq!(r.first(r#"news about "  ""#, EntityKind::Topic), None);
    }

    #[test]
    fn test_recognize_returns_all_kinds() {
        let r = HeuristicRecognizer::new();
        let entities = r.recognize(r#"headlines in Berlin on "energy""#);
        assert_eq!(
            entities,
            vec![
                Entity {
                    kind: EntityKind::Place,
                    text: "Berlin".to_string()
                },
                Entity {
                    kind: EntityKind::Topic,
                    text: "energy".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_no_entities() {
        let r = HeuristicRecognizer::new();
        assert!(r.recognize("how old are you").is_empty());
    }
}
