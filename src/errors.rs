use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use async_graphql::ErrorExtensions;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Article not found: {0}")]
    ArticleNotFound(String),

    #[error("Article content is too short ({0} characters)")]
    ContentTooShort(usize),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Timed out: {0}")]
    Timeout(String),

    #[error("Provider error: {0}")]
    ProviderError(String),

    #[error("Empty response: {0}")]
    EmptyResponse(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    #[error("Persist error: {0}")]
    PersistError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidUrl(_) => "INVALID_URL",
            AppError::ArticleNotFound(_) => "ARTICLE_NOT_FOUND",
            AppError::ContentTooShort(_) => "CONTENT_TOO_SHORT",
            AppError::NetworkError(_) => "NETWORK_ERROR",
            AppError::Timeout(_) => "TIMEOUT",
            AppError::ProviderError(_) => "PROVIDER_ERROR",
            AppError::EmptyResponse(_) => "EMPTY_RESPONSE",
            AppError::MalformedResponse(_) => "MALFORMED_RESPONSE",
            AppError::InvalidSchema(_) => "INVALID_SCHEMA",
            AppError::PersistError(_) => "PERSIST_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::DatabaseError(_) => "DATABASE_ERROR",
            AppError::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// True for failures raised while retrieving the article.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            AppError::ArticleNotFound(_) | AppError::NetworkError(_) | AppError::Timeout(_)
        )
    }

    /// Human-readable description of the failure.
    pub fn user_message(&self) -> String {
        match self {
            AppError::InvalidUrl(msg)
            | AppError::ArticleNotFound(msg)
            | AppError::NetworkError(msg)
            | AppError::Timeout(msg)
            | AppError::ProviderError(msg)
            | AppError::NotFound(msg)
            | AppError::ValidationError(msg) => msg.clone(),
            AppError::ContentTooShort(_) => {
                "Article content is too short or empty. Please try a different article.".to_string()
            }
            AppError::EmptyResponse(_) => "No content received from API".to_string(),
            AppError::MalformedResponse(_) => {
                "Failed to parse quiz data. Please try again.".to_string()
            }
            AppError::InvalidSchema(_) => "Invalid quiz format received".to_string(),
            AppError::PersistError(msg) => format!("Failed to save quiz: {}", msg),
            AppError::DatabaseError(_) | AppError::InternalError(_) => {
                "Something went wrong. Please try again.".to_string()
            }
        }
    }
}

/// A failed quiz generation: the underlying error plus the one message shown for it.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct GenerationFailure {
    pub error: AppError,
    pub message: String,
}

impl GenerationFailure {
    pub fn new(error: AppError, during_fetch: bool) -> Self {
        let message = if during_fetch && error.is_fetch_failure() {
            format!(
                "Wikipedia fetch failed: {}. Try using the mobile link or check your internet connection.",
                error.user_message()
            )
        } else {
            error.user_message()
        };
        Self { error, message }
    }
}

impl ResponseError for GenerationFailure {
    fn status_code(&self) -> StatusCode {
        self.error.status_code()
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.message.clone(),
            code: self.status_code().as_u16(),
            kind: self.error.error_code(),
        })
    }
}

impl ErrorExtensions for GenerationFailure {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.message.clone()).extend_with(|_err, e| {
            e.set("code", self.error.error_code());
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
    pub kind: &'static str,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidUrl(_) | AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::ArticleNotFound(_) | AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ContentTooShort(_) | AppError::InvalidSchema(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::NetworkError(_)
            | AppError::ProviderError(_)
            | AppError::EmptyResponse(_)
            | AppError::MalformedResponse(_) => StatusCode::BAD_GATEWAY,
            AppError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            AppError::PersistError(_)
            | AppError::DatabaseError(_)
            | AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.user_message(),
            code: self.status_code().as_u16(),
            kind: self.error_code(),
        })
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        AppError::DatabaseError(err.to_string())
    }
}
impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::MalformedResponse(err.to_string())
    }
}
impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::Timeout("Request timed out. Please try again.".to_string())
        } else {
            AppError::NetworkError(err.to_string())
        }
    }
}
impl From<async_graphql::Error> for AppError {
    fn from(err: async_graphql::Error) -> Self {
        AppError::InternalError(err.message)
    }
}
impl ErrorExtensions for AppError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.user_message()).extend_with(|_err, e| {
            e.set("code", self.error_code());
        })
    }
}

pub type AppResult<T> = Result<T, AppError>;
