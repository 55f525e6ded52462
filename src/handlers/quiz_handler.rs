use actix_web::{get, post, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::{
        request::{GenerateQuizRequest, SubmitAnswersRequest},
        response::HistoryResponse,
    },
};

#[post("/api/quizzes")]
async fn generate_quiz(
    state: web::Data<AppState>,
    request: web::Json<GenerateQuizRequest>,
) -> Result<HttpResponse, actix_web::Error> {
    let request = request.into_inner();
    request.validate().map_err(|e| {
        log::warn!("Rejected quiz request: {}", e);
        AppError::from(e)
    })?;

    let record = state.quiz_service.generate_quiz(&request.url).await?;
    Ok(HttpResponse::Created().json(record))
}

#[get("/api/quizzes")]
async fn list_quizzes(state: web::Data<AppState>) -> Result<HttpResponse, actix_web::Error> {
    let history = state.quiz_service.load_history().await?;
    Ok(HttpResponse::Ok().json(HistoryResponse::from(history)))
}

#[get("/api/quizzes/{id}")]
async fn get_quiz(
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> Result<HttpResponse, actix_web::Error> {
    let quiz = state.quiz_service.get_quiz(id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(quiz))
}

#[post("/api/quizzes/{id}/score")]
async fn score_quiz(
    state: web::Data<AppState>,
    id: web::Path<i64>,
    request: web::Json<SubmitAnswersRequest>,
) -> Result<HttpResponse, actix_web::Error> {
    let score = state
        .quiz_service
        .score_quiz(id.into_inner(), &request.answers)
        .await?;
    Ok(HttpResponse::Ok().json(score))
}
