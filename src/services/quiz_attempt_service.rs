use std::collections::HashMap;

use crate::models::domain::{QuestionResult, QuizRecord, QuizScore};

pub struct QuizAttemptService;

impl QuizAttemptService {
    /// Score selected options (keyed by question index) against a quiz.
    /// Unanswered questions count as wrong.
    pub fn score(record: &QuizRecord, answers: &HashMap<usize, String>) -> QuizScore {
        let results: Vec<QuestionResult> = record
            .quiz
            .iter()
            .enumerate()
            .map(|(index, question)| {
                let selected = answers.get(&index).cloned();
                let is_correct = selected
                    .as_deref()
                    .is_some_and(|answer| question.is_correct(answer));

                QuestionResult {
                    question_index: index,
                    selected,
                    correct_answer: question.answer.clone(),
                    is_correct,
                    explanation: question.explanation.clone(),
                }
            })
            .collect();

        let correct = results.iter().filter(|r| r.is_correct).count();
        let total = results.len();

        QuizScore {
            quiz_id: record.id,
            correct,
            total,
            percentage: percentage(correct, total),
            results,
        }
    }
}

fn percentage(correct: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((correct as f64 / total as f64) * 100.0).round() as u32
}
