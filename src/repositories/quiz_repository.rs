use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{
        quiz::{storage_key, QUIZ_KEY_PREFIX},
        QuizRecord,
    },
    repositories::kv_store::KeyValueStore,
};

#[async_trait]
pub trait QuizRepository: Send + Sync {
    async fn save(&self, record: &QuizRecord) -> AppResult<()>;
    async fn find_by_id(&self, id: i64) -> AppResult<Option<QuizRecord>>;
    /// Every readable record, newest first.
    async fn list_history(&self) -> AppResult<Vec<QuizRecord>>;
}

/// Quiz records stored as JSON strings under `quiz:<id>` keys.
pub struct KvQuizRepository {
    store: Arc<dyn KeyValueStore>,
}

impl KvQuizRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    async fn load_entry(&self, key: &str) -> AppResult<Option<QuizRecord>> {
        match self.store.get(key).await? {
            Some(value) => Ok(Some(serde_json::from_str(&value)?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl QuizRepository for KvQuizRepository {
    async fn save(&self, record: &QuizRecord) -> AppResult<()> {
        let value = serde_json::to_string(record)
            .map_err(|e| AppError::PersistError(format!("could not encode quiz: {}", e)))?;

        self.store
            .set(&record.storage_key(), value)
            .await
            .map_err(|e| match e {
                AppError::PersistError(_) => e,
                other => AppError::PersistError(other.to_string()),
            })
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<QuizRecord>> {
        self.load_entry(&storage_key(id)).await
    }

    async fn list_history(&self) -> AppResult<Vec<QuizRecord>> {
        let keys = self.store.list(QUIZ_KEY_PREFIX).await?;

        let mut history = Vec::with_capacity(keys.len());
        for key in keys {
            match self.load_entry(&key).await {
                Ok(Some(record)) => history.push(record),
                Ok(None) => {}
                Err(e) => log::warn!("Skipping unreadable history entry {}: {}", key, e),
            }
        }

        history.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(history)
    }
}
