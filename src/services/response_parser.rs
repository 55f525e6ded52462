//! Recovers a quiz from free-form model output.
//!
//! Parsing runs in separable stages: [`strip_code_fences`] and
//! [`extract_json_object`] repair the text, [`parse_quiz_draft`] is the strict
//! parse and validation over whatever the repair produced.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

use crate::{
    errors::{AppError, AppResult},
    models::domain::{KeyEntities, QuizDraft, QuizQuestion},
};

static JSON_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"```json\s*").expect("JSON_FENCE is a valid regex pattern"));
static BARE_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"```\s*").expect("BARE_FENCE is a valid regex pattern"));

/// Removes fenced code-block markers and surrounding whitespace.
pub fn strip_code_fences(raw: &str) -> String {
    let text = JSON_FENCE.replace_all(raw, "");
    let text = BARE_FENCE.replace_all(&text, "");
    text.trim().to_string()
}

/// Slice from the first `{` to the last `}`, if both exist in that order.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Repair then parse a raw completion into a validated draft.
pub fn parse_quiz_response(raw: &str) -> AppResult<QuizDraft> {
    let cleaned = strip_code_fences(raw);
    let json = extract_json_object(&cleaned).ok_or_else(|| {
        log::error!("No JSON object found in completion: {}", cleaned);
        AppError::MalformedResponse("no JSON object in completion".to_string())
    })?;
    parse_quiz_draft(json)
}

/// Strict parse of a JSON object into a draft.
pub fn parse_quiz_draft(json: &str) -> AppResult<QuizDraft> {
    let value: Value = serde_json::from_str(json).map_err(|e| {
        log::error!("Parse error: {} in content: {}", e, json);
        AppError::MalformedResponse(e.to_string())
    })?;

    let Value::Object(mut object) = value else {
        return Err(AppError::InvalidSchema("top-level value is not an object".to_string()));
    };

    let title = match object.remove("title") {
        Some(Value::String(title)) if !title.trim().is_empty() => title,
        _ => return Err(AppError::InvalidSchema("missing 'title'".to_string())),
    };

    let raw_questions = match object.remove("quiz") {
        Some(Value::Array(items)) => items,
        _ => return Err(AppError::InvalidSchema("missing 'quiz' array".to_string())),
    };
    let generated = raw_questions.len();
    let quiz = validate_questions(raw_questions);
    if generated > 0 && quiz.is_empty() {
        return Err(AppError::InvalidSchema(
            "no generated question had an answer matching its options".to_string(),
        ));
    }

    Ok(QuizDraft {
        title,
        summary: non_empty_string(object.remove("summary")),
        key_entities: key_entities(object.remove("key_entities")),
        sections: string_list(object.remove("sections")),
        quiz,
        related_topics: string_list(object.remove("related_topics")),
    })
}

/// Keeps questions whose answer names one of at least two options.
fn validate_questions(items: Vec<Value>) -> Vec<QuizQuestion> {
    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| {
            let mut question: QuizQuestion = match serde_json::from_value(item) {
                Ok(q) => q,
                Err(e) => {
                    log::warn!("Dropping question {}: {}", index, e);
                    return None;
                }
            };

            if question.options.len() < 2 {
                log::warn!("Dropping question {}: fewer than two options", index);
                return None;
            }

            if question.answer_index().is_none() {
                match question.loosely_matching_option().map(str::to_string) {
                    Some(option) => question.answer = option,
                    None => {
                        log::warn!(
                            "Dropping question {}: answer '{}' is not one of its options",
                            index,
                            question.answer
                        );
                        return None;
                    }
                }
            }

            Some(question)
        })
        .collect()
}

fn non_empty_string(value: Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s),
        _ => None,
    }
}

fn string_list(value: Option<Value>) -> Option<Vec<String>> {
    match value {
        Some(Value::Array(items)) => Some(
            items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
        ),
        _ => None,
    }
}

fn key_entities(value: Option<Value>) -> Option<KeyEntities> {
    match value {
        Some(Value::Object(mut map)) => Some(KeyEntities {
            people: list_field(&mut map, "people"),
            organizations: list_field(&mut map, "organizations"),
            locations: list_field(&mut map, "locations"),
        }),
        _ => None,
    }
}

fn list_field(map: &mut Map<String, Value>, field: &str) -> Vec<String> {
    string_list(map.remove(field)).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{models::domain::Difficulty, test_utils::fixtures::fenced_completion};

    const PLAIN: &str = r#"{"title":"T","quiz":[{"question":"Q","options":["A","B"],"answer":"A","difficulty":"easy","explanation":"E"}]}"#;

    #[test]
    fn fenced_reply_parses_like_plain_json() {
        let fenced = parse_quiz_response(&fenced_completion()).unwrap();
        let plain = parse_quiz_response(PLAIN).unwrap();

        assert_eq!(fenced, plain);
        assert_eq!(fenced.title, "T");
        assert_eq!(fenced.quiz.len(), 1);
        assert_eq!(fenced.quiz[0].difficulty, Difficulty::Easy);
        assert_eq!(fenced.summary, None);
    }

    #[test]
    fn surrounding_prose_is_cut_away() {
        let raw = format!("Sure! Here is your quiz:\n```json\n{}\n```\nEnjoy {{ the quiz", PLAIN);
        // A stray `{` after the object does not move the last `}`.
        assert_eq!(parse_quiz_response(&raw).unwrap().title, "T");

        let raw = format!("Here you go: {} Hope that helps!", PLAIN);
        assert_eq!(parse_quiz_response(&raw).unwrap().title, "T");
    }

    #[test]
    fn strip_code_fences_removes_markers() {
        assert_eq!(strip_code_fences("```json\n{}\n```"), "{}");
        assert_eq!(strip_code_fences("  ```\n{\"a\":1}```  "), "{\"a\":1}");
    }

    #[test]
    fn extract_json_object_needs_ordered_braces() {
        assert_eq!(extract_json_object("x {\"a\":1} y"), Some("{\"a\":1}"));
        assert_eq!(extract_json_object("no braces"), None);
        assert_eq!(extract_json_object("} backwards {"), None);
    }

    #[test]
    fn missing_braces_is_malformed() {
        let err = parse_quiz_response("I cannot help with that.").unwrap_err();
        assert!(matches!(err, AppError::MalformedResponse(_)));
    }

    #[test]
    fn syntax_error_is_malformed() {
        let err = parse_quiz_response(r#"{"title": "T", "quiz": [}"#).unwrap_err();
        assert!(matches!(err, AppError::MalformedResponse(_)));
    }

    #[test]
    fn missing_required_fields_is_invalid_schema() {
        for raw in [
            r#"{"quiz": []}"#,
            r#"{"title": "", "quiz": []}"#,
            r#"{"title": "T"}"#,
            r#"{"title": "T", "quiz": "none"}"#,
        ] {
            let err = parse_quiz_response(raw).unwrap_err();
            assert!(matches!(err, AppError::InvalidSchema(_)), "{}", raw);
        }
    }

    #[test]
    fn empty_quiz_array_is_accepted() {
        let draft = parse_quiz_response(r#"{"title": "T", "quiz": []}"#).unwrap();
        assert!(draft.quiz.is_empty());
    }

    #[test]
    fn optional_fields_are_read_leniently() {
        let draft = parse_quiz_response(
            r#"{
                "title": "T",
                "summary": "  ",
                "key_entities": {"people": ["Ada", 3], "locations": "London"},
                "sections": ["Intro", null, "Legacy"],
                "related_topics": "none",
                "quiz": []
            }"#,
        )
        .unwrap();

        assert_eq!(draft.summary, None);
        let entities = draft.key_entities.unwrap();
        assert_eq!(entities.people, vec!["Ada".to_string()]);
        assert!(entities.organizations.is_empty());
        assert!(entities.locations.is_empty());
        assert_eq!(draft.sections, Some(vec!["Intro".to_string(), "Legacy".to_string()]));
        assert_eq!(draft.related_topics, None);
    }

    #[test]
    fn answers_are_checked_against_options() {
        let draft = parse_quiz_response(
            r#"{"title": "T", "quiz": [
                {"question": "kept", "options": ["Paris", "Rome"], "answer": "Paris"},
                {"question": "normalised", "options": ["Paris", "Rome"], "answer": " rome"},
                {"question": "dropped", "options": ["Paris", "Rome"], "answer": "Madrid"},
                {"question": "too few", "options": ["Paris"], "answer": "Paris"},
                {"question": "broken", "options": "Paris"}
            ]}"#,
        )
        .unwrap();

        let questions: Vec<&str> = draft.quiz.iter().map(|q| q.question.as_str()).collect();
        assert_eq!(questions, vec!["kept", "normalised"]);
        assert_eq!(draft.quiz[1].answer, "Rome");
    }

    #[test]
    fn all_questions_invalid_is_invalid_schema() {
        let err = parse_quiz_response(
            r#"{"title": "T", "quiz": [{"question": "Q", "options": ["A", "B"], "answer": "C"}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, AppError::InvalidSchema(_)));
    }
}
