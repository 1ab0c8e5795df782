use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::error::{StoreError, StoreResult};
use crate::traits::KvStore;

/// In-memory key-value store.
///
/// Intended for tests and embedding. Flat keys live in a `HashMap`; each
/// hash is an ordered list of fields so enumeration follows insertion order
/// the way a small Redis hash does. Values are cloned on read/write.
pub struct InMemoryKvStore {
    flat: RwLock<HashMap<String, Vec<u8>>>,
    hashes: RwLock<HashMap<String, Vec<(String, String)>>>,
}

fn poisoned<T>(e: PoisonError<T>) -> StoreError {
    StoreError::LockPoisoned(e.to_string())
}

impl InMemoryKvStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            flat: RwLock::new(HashMap::new()),
            hashes: RwLock::new(HashMap::new()),
        }
    }

    /// Number of flat keys currently stored. Reads through a poisoned lock.
    pub fn key_count(&self) -> usize {
        self.flat.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Number of fields in the hash at `key`. Reads through a poisoned lock.
    pub fn field_count(&self, key: &str) -> usize {
        self.hashes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .map_or(0, Vec::len)
    }
}

impl Default for InMemoryKvStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KvStore for InMemoryKvStore {
    async fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        let map = self.flat.read().map_err(poisoned)?;
        Ok(map.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        let mut map = self.flat.write().map_err(poisoned)?;
        map.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    async fn get_set(&self, key: &str, value: &[u8]) -> StoreResult<Option<Vec<u8>>> {
        let mut map = self.flat.write().map_err(poisoned)?;
        Ok(map.insert(key.to_string(), value.to_vec()))
    }

    async fn delete(&self, key: &str) -> StoreResult<bool> {
        let mut map = self.flat.write().map_err(poisoned)?;
        Ok(map.remove(key).is_some())
    }

    async fn exists(&self, key: &str) -> StoreResult<bool> {
        let map = self.flat.read().map_err(poisoned)?;
        Ok(map.contains_key(key))
    }

    async fn hash_set(&self, key: &str, field: &str, value: &str) -> StoreResult<bool> {
        let mut hashes = self.hashes.write().map_err(poisoned)?;
        let fields = hashes.entry(key.to_string()).or_default();
        match fields.iter_mut().find(|(f, _)| f == field) {
            Some((_, existing)) => {
                *existing = value.to_string();
                Ok(false)
            }
            None => {
                fields.push((field.to_string(), value.to_string()));
                Ok(true)
            }
        }
    }

    async fn hash_get(&self, key: &str, field: &str) -> StoreResult<Option<String>> {
        let hashes = self.hashes.read().map_err(poisoned)?;
        Ok(hashes
            .get(key)
            .and_then(|fields| fields.iter().find(|(f, _)| f == field))
            .map(|(_, v)| v.clone()))
    }

    async fn hash_delete(&self, key: &str, field: &str) -> StoreResult<bool> {
        let mut hashes = self.hashes.write().map_err(poisoned)?;
        let Some(fields) = hashes.get_mut(key) else {
            return Ok(false);
        };
        let Some(pos) = fields.iter().position(|(f, _)| f == field) else {
            return Ok(false);
        };
        fields.remove(pos);
        // Redis drops a hash once its last field is gone.
        if fields.is_empty() {
            hashes.remove(key);
        }
        Ok(true)
    }

    async fn hash_exists(&self, key: &str, field: &str) -> StoreResult<bool> {
        let hashes = self.hashes.read().map_err(poisoned)?;
        Ok(hashes
            .get(key)
            .is_some_and(|fields| fields.iter().any(|(f, _)| f == field)))
    }

    async fn hash_get_all(&self, key: &str) -> StoreResult<Vec<(String, String)>> {
        let hashes = self.hashes.read().map_err(poisoned)?;
        Ok(hashes.get(key).cloned().unwrap_or_default())
    }
}

impl std::fmt::Debug for InMemoryKvStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryKvStore")
            .field("key_count", &self.key_count())
            .finish()
    }
}
