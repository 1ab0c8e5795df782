use std::sync::Arc;

use rollcall_gate::ResourceGate;
use rollcall_store::KvStore;
use rollcall_types::{
    Contributor, ContributorRecord, DisplayName, ListQuery, SortBy, Username,
};

use crate::detach::run_to_completion;
use crate::error::{ServiceError, ServiceResult};
use crate::keys::CONTRIBUTORS_KEY;

/// Result of an upsert.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UpsertOutcome {
    /// `true` if the username did not exist before.
    pub created: bool,
}

/// CRUD façade over the contributor hash.
///
/// Every read-then-write sequence runs under the contributor gate. Plain
/// reads (`get`, `list`, `exists`) are single store calls and skip the gate,
/// so they may observe a write that is concurrently in flight.
#[derive(Clone)]
pub struct ContributorDirectory {
    store: Arc<dyn KvStore>,
    gate: Arc<ResourceGate>,
}

impl ContributorDirectory {
    pub fn new(store: Arc<dyn KvStore>, gate: Arc<ResourceGate>) -> Self {
        Self { store, gate }
    }

    /// Create or overwrite a contributor.
    pub async fn upsert(
        &self,
        username: &Username,
        name: DisplayName,
        bio: impl Into<String>,
    ) -> ServiceResult<UpsertOutcome> {
        let record = ContributorRecord::new(name, bio);
        let created = {
            let _held = self.gate.enter().await;
            self.store
                .hash_set(CONTRIBUTORS_KEY, username.as_str(), &record.encode())
                .await?
        };
        tracing::debug!(%username, created, "contributor upserted");
        Ok(UpsertOutcome { created })
    }

    /// Read one contributor.
    pub async fn get(&self, username: &str) -> ServiceResult<ContributorRecord> {
        self.store
            .hash_get(CONTRIBUTORS_KEY, username)
            .await?
            .map(|raw| ContributorRecord::decode(&raw))
            .ok_or_else(|| ServiceError::ContributorNotFound(username.to_string()))
    }

    /// Replace name and bio of an existing contributor. Never creates one.
    pub async fn update(
        &self,
        username: &str,
        name: DisplayName,
        bio: impl Into<String>,
    ) -> ServiceResult<()> {
        let record = ContributorRecord::new(name, bio);
        let directory = self.clone();
        let username = username.to_string();
        run_to_completion(async move { directory.replace_existing(&username, &record).await })
            .await
    }

    async fn replace_existing(&self, username: &str, record: &ContributorRecord) -> ServiceResult<()> {
        let _held = self.gate.enter().await;
        if !self.store.hash_exists(CONTRIBUTORS_KEY, username).await? {
            return Err(ServiceError::ContributorNotFound(username.to_string()));
        }
        self.store
            .hash_set(CONTRIBUTORS_KEY, username, &record.encode())
            .await?;
        tracing::debug!(username, "contributor updated");
        Ok(())
    }

    /// Remove a contributor.
    pub async fn delete(&self, username: &str) -> ServiceResult<()> {
        let removed = {
            let _held = self.gate.enter().await;
            self.store.hash_delete(CONTRIBUTORS_KEY, username).await?
        };
        if !removed {
            return Err(ServiceError::ContributorNotFound(username.to_string()));
        }
        tracing::debug!(username, "contributor deleted");
        Ok(())
    }

    /// Whether `username` is a registered contributor.
    pub async fn exists(&self, username: &str) -> ServiceResult<bool> {
        Ok(self.store.hash_exists(CONTRIBUTORS_KEY, username).await?)
    }

    /// Enumerate contributors, optionally sorted, then windowed.
    ///
    /// Sorting is stable, so ties keep the store's enumeration order.
    pub async fn list(&self, query: &ListQuery) -> ServiceResult<Vec<Contributor>> {
        let mut entries: Vec<Contributor> = self
            .store
            .hash_get_all(CONTRIBUTORS_KEY)
            .await?
            .into_iter()
            .map(|(username, raw)| {
                Contributor::from_record(username, ContributorRecord::decode(&raw))
            })
            .collect();

        match query.sort_by {
            Some(SortBy::Username) => entries.sort_by(|a, b| a.username.cmp(&b.username)),
            Some(SortBy::Name) => entries.sort_by(|a, b| a.name.cmp(&b.name)),
            None => {}
        }
        Ok(query.window(entries))
    }
}

impl std::fmt::Debug for ContributorDirectory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContributorDirectory")
            .field("gate", &self.gate)
            .finish_non_exhaustive()
    }
}
