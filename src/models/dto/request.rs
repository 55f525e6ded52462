use std::collections::HashMap;

use async_graphql::InputObject;
use serde::Deserialize;
use validator::Validate;

/// An empty URL passes here and is rejected by the generation pre-checks.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GenerateQuizRequest {
    #[validate(length(max = 2048, message = "Wikipedia URL must be at most 2048 characters"))]
    pub url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmitAnswersRequest {
    /// Selected option text keyed by question index.
    #[serde(default)]
    pub answers: HashMap<usize, String>,
}

#[derive(Debug, Clone, Deserialize, InputObject)]
pub struct AnswerInput {
    pub question_index: usize,
    pub answer: String,
}

impl SubmitAnswersRequest {
    pub fn from_inputs(inputs: Vec<AnswerInput>) -> Self {
        Self {
            answers: inputs
                .into_iter()
                .map(|input| (input.question_index, input.answer))
                .collect(),
        }
    }
}
