pub mod health_handler;
pub mod quiz_handler;

use actix_web::web;

pub use health_handler::{health_check, health_check_live, health_check_ready};
pub use quiz_handler::{generate_quiz, get_quiz, list_quizzes, score_quiz};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check)
        .service(health_check_live)
        .service(health_check_ready)
        .service(generate_quiz)
        .service(list_quizzes)
        .service(get_quiz)
        .service(score_quiz);
}
