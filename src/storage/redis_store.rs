use async_trait::async_trait;
use redis::AsyncCommands;

use super::{SnapshotStore, StorageError};

pub struct RedisSnapshotStore {
    client: redis::Client,
    key_prefix: String,
}

impl RedisSnapshotStore {
    pub fn new(client: redis::Client, key_prefix: impl Into<String>) -> Self {
        Self {
            client,
            key_prefix: key_prefix.into(),
        }
    }

    async fn get_conn(&self) -> Result<redis::aio::Connection, StorageError> {
        self.client
            .get_async_connection()
            .await
            .map_err(StorageError::Connection)
    }

    fn full_key(&self, key: &str) -> String {
        if self.key_prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}:{}", self.key_prefix, key)
        }
    }
}

#[async_trait]
impl SnapshotStore for RedisSnapshotStore {
    async fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut conn = self.get_conn().await?;
        let value: Option<String> = conn.get(self.full_key(key)).await?;
        Ok(value)
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut conn = self.get_conn().await?;
        let _: () = conn.set(self.full_key(key), value).await?;
        Ok(())
    }
}
