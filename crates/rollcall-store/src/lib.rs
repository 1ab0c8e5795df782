//! Key-value storage for rollcall.
//!
//! The service never talks to a database directly; it goes through the
//! narrow [`KvStore`] contract, which mirrors the two Redis key families
//! the service uses:
//!
//! - a flat string-keyed space (`get`/`set`/`get_set`/`delete`/`exists`)
//!   holding image blobs
//! - hash maps under an outer key (`hash_*`) holding contributor records
//!
//! Every call is atomic on its own. Sequences of calls are not; callers that
//! read then write must serialize themselves.
//!
//! # Storage Backends
//!
//! - [`InMemoryKvStore`] -- `HashMap`-based store for tests and embedding
//! - [`RedisKvStore`] -- a Redis server reached through a tokio connection manager

pub mod error;
pub mod memory;
pub mod remote;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::InMemoryKvStore;
pub use remote::RedisKvStore;
pub use traits::KvStore;
