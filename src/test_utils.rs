use crate::models::domain::{ArticleContent, Difficulty, KeyEntities, QuizQuestion, QuizRecord};

#[cfg(test)]
pub mod fixtures {
    use super::*;

    pub const TURING_URL: &str = "https://en.wikipedia.org/wiki/Alan_Turing";

    /// Article long enough to pass the extract length check.
    pub fn sample_article() -> ArticleContent {
        ArticleContent::new(
            "Alan Turing",
            "Alan Mathison Turing was an English mathematician, computer scientist, logician, \
             cryptanalyst, philosopher and theoretical biologist. He was highly influential in \
             the development of theoretical computer science.",
            "English computer scientist (1912-1954)",
        )
    }

    pub fn sample_question() -> QuizQuestion {
        QuizQuestion {
            question: "What nationality was Alan Turing?".to_string(),
            options: vec![
                "English".to_string(),
                "German".to_string(),
                "French".to_string(),
                "American".to_string(),
            ],
            answer: "English".to_string(),
            difficulty: Difficulty::Easy,
            explanation: "The article opens by calling him English.".to_string(),
        }
    }

    pub fn sample_record(id: i64) -> QuizRecord {
        QuizRecord {
            id,
            url: TURING_URL.to_string(),
            title: "Alan Turing".to_string(),
            summary: "An English mathematician and computer scientist.".to_string(),
            key_entities: KeyEntities {
                people: vec!["Alan Turing".to_string()],
                organizations: vec![],
                locations: vec!["England".to_string()],
            },
            sections: vec!["Early life".to_string()],
            quiz: vec![sample_question()],
            related_topics: vec!["Enigma machine".to_string()],
            timestamp: "2026-10-18T12:00:00.000Z".to_string(),
        }
    }

    /// A well-behaved model reply wrapped in a fenced code block.
    pub fn fenced_completion() -> String {
        "```json\n{\"title\":\"T\",\"quiz\":[{\"question\":\"Q\",\"options\":[\"A\",\"B\"],\"answer\":\"A\",\"difficulty\":\"easy\",\"explanation\":\"E\"}]}\n```".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_fixtures_sample_article_is_substantial() {
        assert!(sample_article().ensure_substantial().is_ok());
    }

    #[test]
    fn test_fixtures_sample_record() {
        let record = sample_record(9);
        assert_eq!(record.id, 9);
        assert_eq!(record.quiz.len(), 1);
        assert_eq!(record.quiz[0].answer_index(), Some(0));
    }
}
