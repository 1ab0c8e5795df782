use async_trait::async_trait;

use crate::error::StoreResult;

/// Remote key-value store with a flat key space and hash maps.
///
/// All implementations must satisfy these invariants:
/// - Each call is individually atomic. No call sequence is.
/// - Hash enumeration order is stable between calls that do not modify the
///   hash, and an overwritten field keeps its position.
/// - The store never interprets values.
/// - All backend errors are propagated, never silently ignored.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Read a flat key. Returns `Ok(None)` if it does not exist.
    async fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;

    /// Write a flat key, replacing any previous value.
    async fn set(&self, key: &str, value: &[u8]) -> StoreResult<()>;

    /// Write a flat key and return the value it replaced.
    async fn get_set(&self, key: &str, value: &[u8]) -> StoreResult<Option<Vec<u8>>>;

    /// Delete a flat key. Returns `true` if the key existed.
    async fn delete(&self, key: &str) -> StoreResult<bool>;

    /// Check whether a flat key exists.
    async fn exists(&self, key: &str) -> StoreResult<bool>;

    /// Set a field of the hash at `key`.
    ///
    /// Returns `true` if the field was created, `false` if an existing
    /// value was overwritten.
    async fn hash_set(&self, key: &str, field: &str, value: &str) -> StoreResult<bool>;

    /// Read one field of the hash at `key`.
    async fn hash_get(&self, key: &str, field: &str) -> StoreResult<Option<String>>;

    /// Delete one field. Returns `true` if the field existed.
    async fn hash_delete(&self, key: &str, field: &str) -> StoreResult<bool>;

    /// Check whether a field exists in the hash at `key`.
    async fn hash_exists(&self, key: &str, field: &str) -> StoreResult<bool>;

    /// Enumerate every `(field, value)` pair of the hash at `key`.
    ///
    /// A missing hash enumerates as empty.
    async fn hash_get_all(&self, key: &str) -> StoreResult<Vec<(String, String)>>;
}
