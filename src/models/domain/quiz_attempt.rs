use async_graphql::SimpleObject;
use serde::{Deserialize, Serialize};

/// Outcome of answering a quiz. Not persisted.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct QuizScore {
    pub quiz_id: i64,
    pub correct: usize,
    pub total: usize,
    pub percentage: u32,
    pub results: Vec<QuestionResult>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct QuestionResult {
    pub question_index: usize,
    pub selected: Option<String>,
    pub correct_answer: String,
    pub is_correct: bool,
    pub explanation: String,
}
