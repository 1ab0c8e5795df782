use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;

use crate::error::{StoreError, StoreResult};
use crate::traits::KvStore;

/// Redis-backed key-value store.
///
/// Commands go through a [`ConnectionManager`], which multiplexes one
/// connection and reconnects on failure. Cloning the manager is cheap, so
/// every call works on its own handle and the store needs no locking.
#[derive(Clone)]
pub struct RedisKvStore {
    conn: ConnectionManager,
}

impl RedisKvStore {
    /// Connect to the server at `url` (e.g. `redis://redis:6379/`).
    pub async fn connect(url: &str) -> StoreResult<Self> {
        let client = redis::Client::open(url)?;
        let conn = ConnectionManager::new(client).await?;
        tracing::info!(url, "connected to redis");
        Ok(Self { conn })
    }

    fn conn(&self) -> ConnectionManager {
        self.conn.clone()
    }
}

#[async_trait]
impl KvStore for RedisKvStore {
    async fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        Ok(self.conn().get(key).await?)
    }

    async fn set(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        self.conn().set::<_, _, ()>(key, value).await?;
        Ok(())
    }

    async fn get_set(&self, key: &str, value: &[u8]) -> StoreResult<Option<Vec<u8>>> {
        Ok(self.conn().getset(key, value).await?)
    }

    async fn delete(&self, key: &str) -> StoreResult<bool> {
        let removed: i64 = self.conn().del(key).await?;
        Ok(removed == 1)
    }

    async fn exists(&self, key: &str) -> StoreResult<bool> {
        Ok(self.conn().exists(key).await?)
    }

    async fn hash_set(&self, key: &str, field: &str, value: &str) -> StoreResult<bool> {
        let added: i64 = self.conn().hset(key, field, value).await?;
        Ok(added == 1)
    }

    async fn hash_get(&self, key: &str, field: &str) -> StoreResult<Option<String>> {
        let raw: Option<Vec<u8>> = self.conn().hget(key, field).await?;
        raw.map(|bytes| utf8(key, field, bytes)).transpose()
    }

    async fn hash_delete(&self, key: &str, field: &str) -> StoreResult<bool> {
        let removed: i64 = self.conn().hdel(key, field).await?;
        Ok(removed == 1)
    }

    async fn hash_exists(&self, key: &str, field: &str) -> StoreResult<bool> {
        Ok(self.conn().hexists(key, field).await?)
    }

    async fn hash_get_all(&self, key: &str) -> StoreResult<Vec<(String, String)>> {
        // HGETALL replies with a flat field, value, field, value... array.
        let flat: Vec<Vec<u8>> = self.conn().hgetall(key).await?;
        let mut pairs = Vec::with_capacity(flat.len() / 2);
        let mut items = flat.into_iter();
        while let (Some(field), Some(value)) = (items.next(), items.next()) {
            let field = String::from_utf8(field).map_err(|_| StoreError::CorruptValue {
                key: key.to_string(),
                field: "<field name>".to_string(),
            })?;
            let value = utf8(key, &field, value)?;
            pairs.push((field, value));
        }
        Ok(pairs)
    }
}

fn utf8(key: &str, field: &str, bytes: Vec<u8>) -> StoreResult<String> {
    String::from_utf8(bytes).map_err(|_| StoreError::CorruptValue {
        key: key.to_string(),
        field: field.to_string(),
    })
}

impl std::fmt::Debug for RedisKvStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisKvStore").finish_non_exhaustive()
    }
}
