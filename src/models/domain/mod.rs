pub mod article;
pub mod quiz;
pub mod quiz_attempt;
pub mod quiz_question;
pub use article::ArticleContent;
pub use quiz::{KeyEntities, QuizDraft, QuizRecord};
pub use quiz_attempt::{QuestionResult, QuizScore};
pub use quiz_question::{Difficulty, QuizQuestion};
