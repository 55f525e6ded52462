use crate::{
    constants::quiz_prompt::{
        MAX_QUESTIONS, MIN_QUESTIONS, QUIZ_OUTPUT_SCHEMA, QUIZ_PROMPT_INTRO, QUIZ_PROMPT_RULES,
    },
    models::domain::ArticleContent,
};

/// Longest slice of the extract embedded in a prompt.
pub const MAX_PROMPT_EXTRACT_CHARS: usize = 3000;

/// Builds the quiz generation prompt for an article. Deterministic for equal input.
pub fn build_quiz_prompt(article: &ArticleContent) -> String {
    let schema = QUIZ_OUTPUT_SCHEMA.replace("__TITLE__", &escape_json_text(&article.title));

    format!(
        "{intro}\n\n\
         Article Title: {title}\n\
         Description: {description}\n\
         Content: {content}\n\n\
         Create {min}-{max} multiple choice questions based on this content. \
         Return ONLY a JSON object (no markdown, no explanation) with this structure:\n\n\
         {schema}\n\n\
         {rules}",
        intro = QUIZ_PROMPT_INTRO,
        title = article.title,
        description = article.description,
        content = article.extract_prefix(MAX_PROMPT_EXTRACT_CHARS),
        min = MIN_QUESTIONS,
        max = MAX_QUESTIONS,
        schema = schema,
        rules = QUIZ_PROMPT_RULES,
    )
}

/// Escapes text for embedding inside a JSON string literal in the schema example.
fn escape_json_text(text: &str) -> String {
    let quoted = serde_json::Value::String(text.to_string()).to_string();
    quoted[1..quoted.len() - 1].to_string()
}
