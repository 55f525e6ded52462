pub mod kv_store;
pub mod quiz_repository;

pub use kv_store::{InMemoryKeyValueStore, KeyValueStore, MongoKeyValueStore};
pub use quiz_repository::{KvQuizRepository, QuizRepository};
