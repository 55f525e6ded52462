use async_graphql::{Context, ErrorExtensions, Object};

use crate::{
    app_state::AppState,
    errors::AppResult,
    models::{
        domain::{QuizRecord, QuizScore},
        dto::request::{AnswerInput, SubmitAnswersRequest},
    },
};

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn generate_quiz(&self, ctx: &Context<'_>, url: String) -> async_graphql::Result<QuizRecord> {
        let state = ctx.data::<AppState>()?;
        state
            .quiz_service
            .generate_quiz(&url)
            .await
            .map_err(|failure| failure.extend())
    }

    async fn score_quiz(
        &self,
        ctx: &Context<'_>,
        id: i64,
        answers: Vec<AnswerInput>,
    ) -> AppResult<QuizScore> {
        let state = ctx.data::<AppState>()?;
        let request = SubmitAnswersRequest::from_inputs(answers);
        state.quiz_service.score_quiz(id, &request.answers).await
    }
}
