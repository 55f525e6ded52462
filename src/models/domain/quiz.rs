use async_graphql::SimpleObject;
use serde::{Deserialize, Serialize};

use crate::models::domain::{article::ArticleContent, quiz_question::QuizQuestion};

/// Storage keys for quiz records share this prefix.
pub const QUIZ_KEY_PREFIX: &str = "quiz:";

const SUMMARY_FALLBACK_CHARS: usize = 200;

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct KeyEntities {
    #[serde(default)]
    pub people: Vec<String>,
    #[serde(default)]
    pub organizations: Vec<String>,
    #[serde(default)]
    pub locations: Vec<String>,
}

/// Model output after repair and validation, before defaults are applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizDraft {
    pub title: String,
    pub summary: Option<String>,
    pub key_entities: Option<KeyEntities>,
    pub sections: Option<Vec<String>>,
    pub quiz: Vec<QuizQuestion>,
    pub related_topics: Option<Vec<String>>,
}

/// A generated quiz as it is persisted and listed in history.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct QuizRecord {
    pub id: i64,
    #[serde(default)]
    pub url: String,
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub key_entities: KeyEntities,
    #[serde(default)]
    pub sections: Vec<String>,
    pub quiz: Vec<QuizQuestion>,
    #[serde(default)]
    pub related_topics: Vec<String>,
    #[serde(default)]
    pub timestamp: String,
}

impl QuizRecord {
    pub fn storage_key(&self) -> String {
        storage_key(self.id)
    }

    pub fn question_count(&self) -> usize {
        self.quiz.len()
    }
}

pub fn storage_key(id: i64) -> String {
    format!("{}{}", QUIZ_KEY_PREFIX, id)
}

/// Summary used when the model did not provide one.
pub fn fallback_summary(article: &ArticleContent) -> String {
    format!("{}...", article.extract_prefix(SUMMARY_FALLBACK_CHARS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::quiz_question::Difficulty;

    #[test]
    fn storage_key_uses_prefix() {
        assert_eq!(storage_key(1712345678901), "quiz:1712345678901");
    }

    #[test]
    fn fallback_summary_truncates_to_two_hundred_chars() {
        let article = ArticleContent::new("Long", &"a".repeat(500), "");
        let summary = fallback_summary(&article);
        assert_eq!(summary.chars().count(), 203);
        assert!(summary.ends_with("..."));
    }

    #[test]
    fn older_records_missing_optional_fields_still_load() {
        let json = r#"{
            "id": 1,
            "title": "Legacy",
            "quiz": [{"question":"Q","options":["A","B"],"answer":"B","difficulty":"hard","explanation":""}]
        }"#;
        let record: QuizRecord = serde_json::from_str(json).expect("legacy record should parse");

        assert_eq!(record.key_entities, KeyEntities::default());
        assert!(record.sections.is_empty());
        assert!(record.related_topics.is_empty());
        assert_eq!(record.quiz[0].difficulty, Difficulty::Hard);
        assert_eq!(record.storage_key(), "quiz:1");
    }

    #[test]
    fn partial_key_entities_fill_missing_lists() {
        let entities: KeyEntities =
            serde_json::from_str(r#"{"people":["Alan Turing"]}"#).expect("should parse");
        assert_eq!(entities.people, vec!["Alan Turing".to_string()]);
        assert!(entities.organizations.is_empty());
        assert!(entities.locations.is_empty());
    }
}
