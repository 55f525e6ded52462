use serde::Serialize;

use crate::models::domain::QuizRecord;

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub count: usize,
    pub quizzes: Vec<QuizRecord>,
}

impl From<Vec<QuizRecord>> for HistoryResponse {
    fn from(quizzes: Vec<QuizRecord>) -> Self {
        HistoryResponse {
            count: quizzes.len(),
            quizzes,
        }
    }
}
