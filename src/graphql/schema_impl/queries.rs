use async_graphql::{Context, Object};

use crate::{app_state::AppState, errors::AppResult, models::domain::QuizRecord};

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Persisted quizzes, newest first.
    async fn quiz_history(&self, ctx: &Context<'_>) -> AppResult<Vec<QuizRecord>> {
        let state = ctx.data::<AppState>()?;
        state.quiz_service.load_history().await
    }

    async fn quiz(&self, ctx: &Context<'_>, id: i64) -> AppResult<QuizRecord> {
        let state = ctx.data::<AppState>()?;
        state.quiz_service.get_quiz(id).await
    }
}
