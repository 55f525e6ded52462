use std::sync::Arc;

use crate::{
    config::{Config, StorageBackend},
    db::Database,
    errors::{AppError, AppResult},
    repositories::{InMemoryKeyValueStore, KeyValueStore, KvQuizRepository, MongoKeyValueStore},
    services::{
        article_fetcher::{ArticleFetcher, WikipediaArticleFetcher},
        completion_client::{CompletionClient, MessagesCompletionClient},
        quiz_service::QuizService,
    },
};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Clone)]
pub struct AppState {
    pub quiz_service: Arc<QuizService>,
    pub store: Arc<dyn KeyValueStore>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let store: Arc<dyn KeyValueStore> = match config.storage_backend {
            StorageBackend::Memory => {
                log::info!("Using in-memory quiz history");
                Arc::new(InMemoryKeyValueStore::new())
            }
            StorageBackend::Mongo => {
                let db = Database::connect(&config).await?;
                let store = MongoKeyValueStore::new(&db, &config.kv_collection);
                store.ensure_indexes().await?;
                Arc::new(store)
            }
        };

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| AppError::InternalError(format!("HTTP client: {}", e)))?;

        let fetcher = Arc::new(WikipediaArticleFetcher::new(
            http.clone(),
            config.wiki_api_url.clone(),
            config.fetch_timeout(),
        ));
        let completion = Arc::new(MessagesCompletionClient::from_config(http, &config));

        Ok(Self::from_parts(config, store, fetcher, completion))
    }

    pub fn from_parts(
        config: Config,
        store: Arc<dyn KeyValueStore>,
        fetcher: Arc<dyn ArticleFetcher>,
        completion: Arc<dyn CompletionClient>,
    ) -> Self {
        let repository = Arc::new(KvQuizRepository::new(store.clone()));
        let quiz_service = Arc::new(QuizService::new(
            fetcher,
            completion,
            repository,
            config.generation_timeout(),
        ));

        Self {
            quiz_service,
            store,
            config: Arc::new(config),
        }
    }
}
