use std::time::Duration;

use mongodb::{
    bson::doc,
    options::{ClientOptions, ServerApi, ServerApiVersion},
    Client, Collection,
};

use crate::{config::Config, errors::AppResult};

const POOL_SIZE: u32 = 4;
const MONGO_TIMEOUT: Duration = Duration::from_secs(5);

/// Handle to the database holding quiz history.
#[derive(Clone)]
pub struct Database {
    client: Client,
    db_name: String,
}

impl Database {
    pub async fn connect(config: &Config) -> AppResult<Self> {
        Self::connect_to(&config.mongo_conn_string, &config.mongo_db_name).await
    }

    pub async fn connect_to(conn_string: &str, db_name: &str) -> AppResult<Self> {
        let mut options = ClientOptions::parse(conn_string).await?;
        options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
        options.server_api = Some(ServerApi::builder().version(ServerApiVersion::V1).build());
        options.max_pool_size = Some(POOL_SIZE);
        options.connect_timeout = Some(MONGO_TIMEOUT);
        options.server_selection_timeout = Some(MONGO_TIMEOUT);

        let db = Self {
            client: Client::with_options(options)?,
            db_name: db_name.to_string(),
        };
        db.health_check().await?;

        log::info!("Connected to MongoDB database '{}'", db.db_name);
        Ok(db)
    }

    pub fn get_collection<T>(&self, collection_name: &str) -> Collection<T>
    where
        T: Send + Sync,
    {
        self.client.database(&self.db_name).collection(collection_name)
    }

    /// Round-trips a `ping` against the quiz database.
    pub async fn health_check(&self) -> AppResult<()> {
        self.client
            .database(&self.db_name)
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(())
    }

    pub fn db_name(&self) -> &str {
        &self.db_name
    }
}
