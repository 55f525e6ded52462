use std::collections::BTreeMap;

use async_trait::async_trait;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::{
    db::Database,
    errors::{AppError, AppResult},
};

/// String key/value persistence used for quiz history.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> AppResult<Option<String>>;
    async fn set(&self, key: &str, value: String) -> AppResult<()>;
    async fn list(&self, prefix: &str) -> AppResult<Vec<String>>;

    async fn health_check(&self) -> AppResult<()> {
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryKeyValueStore {
    entries: RwLock<BTreeMap<String, String>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let entries = self.entries.read().await;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> AppResult<()> {
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), value);
        Ok(())
    }

    async fn list(&self, prefix: &str) -> AppResult<Vec<String>> {
        let entries = self.entries.read().await;
        Ok(entries
            .range(prefix.to_string()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(key, _)| key.clone())
            .collect())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct KvEntry {
    key: String,
    value: String,
}

pub struct MongoKeyValueStore {
    db: Database,
    collection: Collection<KvEntry>,
}

impl MongoKeyValueStore {
    pub fn new(db: &Database, collection_name: &str) -> Self {
        let collection = db.get_collection(collection_name);
        Self {
            db: db.clone(),
            collection,
        }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for key/value collection in {}", self.db.db_name());

        let key_index = IndexModel::builder()
            .keys(doc! { "key": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("key_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(key_index).await?;

        log::info!("Successfully created indexes for key/value collection");
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for MongoKeyValueStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let entry = self.collection.find_one(doc! { "key": key }).await?;
        Ok(entry.map(|e| e.value))
    }

    async fn set(&self, key: &str, value: String) -> AppResult<()> {
        let entry = KvEntry {
            key: key.to_string(),
            value,
        };
        self.collection
            .replace_one(doc! { "key": key }, &entry)
            .upsert(true)
            .await
            .map_err(|e| AppError::PersistError(e.to_string()))?;
        Ok(())
    }

    async fn list(&self, prefix: &str) -> AppResult<Vec<String>> {
        use futures::TryStreamExt;

        let pattern = format!("^{}", regex::escape(prefix));
        let cursor = self
            .collection
            .find(doc! { "key": { "$regex": pattern } })
            .await?;
        let entries: Vec<KvEntry> = cursor.try_collect().await?;

        Ok(entries.into_iter().map(|e| e.key).collect())
    }

    async fn health_check(&self) -> AppResult<()> {
        self.db.health_check().await
    }
}
