use std::env;
use std::time::Duration;

use secrecy::SecretString;

use crate::services::orchestrator_steps::quiz_steps::{ARTICLE_FETCH_TIMEOUT, GENERATION_TIMEOUT};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    Mongo,
}

impl StorageBackend {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "mongo" | "mongodb" => StorageBackend::Mongo,
            _ => StorageBackend::Memory,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub web_server_host: String,
    pub web_server_port: u16,
    pub wiki_api_url: String,
    pub completion_api_url: String,
    pub completion_api_key: SecretString,
    pub completion_model: String,
    pub completion_max_tokens: u32,
    pub fetch_timeout_secs: u64,
    pub generation_timeout_secs: u64,
    pub storage_backend: StorageBackend,
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub kv_collection: String,
    pub allowed_origin: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            wiki_api_url: env::var("WIKI_API_URL")
                .unwrap_or_else(|_| "https://en.wikipedia.org/w/api.php".to_string()),
            completion_api_url: env::var("COMPLETION_API_URL")
                .unwrap_or_else(|_| "https://api.anthropic.com/v1/messages".to_string()),
            completion_api_key: SecretString::from(
                env::var("COMPLETION_API_KEY").unwrap_or_default(),
            ),
            completion_model: env::var("COMPLETION_MODEL")
                .unwrap_or_else(|_| "claude-sonnet-4-20250514".to_string()),
            completion_max_tokens: env::var("COMPLETION_MAX_TOKENS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(4000),
            fetch_timeout_secs: env::var("FETCH_TIMEOUT_SECS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(ARTICLE_FETCH_TIMEOUT),
            generation_timeout_secs: env::var("GENERATION_TIMEOUT_SECS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(GENERATION_TIMEOUT),
            storage_backend: StorageBackend::parse(
                &env::var("STORAGE_BACKEND").unwrap_or_else(|_| "memory".to_string()),
            ),
            mongo_conn_string: env::var("MONGO_CONN_STRING")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongo_db_name: env::var("MONGO_DB_NAME")
                .unwrap_or_else(|_| "wiki-quiz-local".to_string()),
            kv_collection: env::var("KV_COLLECTION").unwrap_or_else(|_| "kv_entries".to_string()),
            allowed_origin: env::var("ALLOWED_ORIGIN").ok().filter(|o| !o.is_empty()),
        }
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn generation_timeout(&self) -> Duration {
        Duration::from_secs(self.generation_timeout_secs)
    }

    /// Panics if the completion endpoint cannot be authenticated against.
    pub fn validate_for_production(&self) {
        use secrecy::ExposeSecret;

        if self.completion_api_key.expose_secret().trim().is_empty() {
            panic!(
                "FATAL: COMPLETION_API_KEY is not set! Set COMPLETION_API_KEY to a valid API key."
            );
        }

        if self.generation_timeout_secs < self.fetch_timeout_secs {
            panic!(
                "FATAL: GENERATION_TIMEOUT_SECS ({}) must not be shorter than FETCH_TIMEOUT_SECS ({}).",
                self.generation_timeout_secs, self.fetch_timeout_secs
            );
        }
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            wiki_api_url: "http://127.0.0.1:9/w/api.php".to_string(),
            completion_api_url: "http://127.0.0.1:9/v1/messages".to_string(),
            completion_api_key: SecretString::from("test_api_key".to_string()),
            completion_model: "test-model".to_string(),
            completion_max_tokens: 4000,
            fetch_timeout_secs: ARTICLE_FETCH_TIMEOUT,
            generation_timeout_secs: GENERATION_TIMEOUT,
            storage_backend: StorageBackend::Memory,
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "wiki-quiz-test".to_string(),
            kv_collection: "kv_entries".to_string(),
            allowed_origin: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env_with_defaults() {
        let config = Config::from_env();

        assert!(!config.wiki_api_url.is_empty());
        assert!(!config.completion_api_url.is_empty());
        assert!(config.completion_max_tokens > 0);
    }

    #[test]
    fn test_test_config() {
        let config = Config::test_config();

        assert_eq!(config.storage_backend, StorageBackend::Memory);
        assert_eq!(config.fetch_timeout(), Duration::from_secs(10));
        assert_eq!(config.generation_timeout(), Duration::from_secs(15));
        assert_eq!(config.completion_max_tokens, 4000);
    }

    #[test]
    fn test_storage_backend_parse() {
        assert_eq!(StorageBackend::parse("mongo"), StorageBackend::Mongo);
        assert_eq!(StorageBackend::parse(" MongoDB "), StorageBackend::Mongo);
        assert_eq!(StorageBackend::parse("memory"), StorageBackend::Memory);
        assert_eq!(StorageBackend::parse("anything"), StorageBackend::Memory);
    }

    #[test]
    #[should_panic(expected = "COMPLETION_API_KEY")]
    fn test_validate_for_production_rejects_missing_key() {
        let mut config = Config::test_config();
        config.completion_api_key = SecretString::from(String::new());
        config.validate_for_production();
    }
}
