use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};

/// Extracts shorter than this are not worth building a quiz from.
pub const MIN_EXTRACT_CHARS: usize = 50;

/// Placeholder used when the content service returns a page without an extract.
pub const MISSING_EXTRACT: &str = "No content available.";

/// Introductory text of an encyclopedia article.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ArticleContent {
    pub title: String,
    pub extract: String,
    pub description: String,
}

impl ArticleContent {
    pub fn new(title: &str, extract: &str, description: &str) -> Self {
        ArticleContent {
            title: title.to_string(),
            extract: extract.to_string(),
            description: description.to_string(),
        }
    }

    pub fn extract_len(&self) -> usize {
        self.extract.chars().count()
    }

    pub fn ensure_substantial(&self) -> AppResult<()> {
        let length = self.extract.trim().chars().count();
        if length < MIN_EXTRACT_CHARS {
            return Err(AppError::ContentTooShort(length));
        }
        Ok(())
    }

    /// First `max_chars` characters of the extract.
    pub fn extract_prefix(&self, max_chars: usize) -> &str {
        match self.extract.char_indices().nth(max_chars) {
            Some((byte_idx, _)) => &self.extract[..byte_idx],
            None => &self.extract,
        }
    }
}
