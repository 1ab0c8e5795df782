//! Contributor directory and image façades for rollcall.
//!
//! Both façades sit on one [`KvStore`] and share one pair of
//! [`Gates`](rollcall_gate::Gates): the contributor gate serializes record
//! writes, the image gate serializes blob writes and the
//! read-blend-write cycle of retrieval. No operation ever holds both.
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use rollcall_blend::Blender;
//! use rollcall_service::Services;
//! use rollcall_store::InMemoryKvStore;
//! use rollcall_types::{DisplayName, Username};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let services = Services::new(Arc::new(InMemoryKvStore::new()), Blender::builtin());
//! let user = Username::parse("ada_l").unwrap();
//! let outcome = services
//!     .contributors
//!     .upsert(&user, DisplayName::parse("Ada").unwrap(), "first;programmer")
//!     .await
//!     .unwrap();
//! assert!(outcome.created);
//! assert_eq!(services.contributors.get("ada_l").await.unwrap().bio, "first;programmer");
//! # });
//! ```

use std::sync::Arc;

use rollcall_blend::Blender;
use rollcall_gate::Gates;
use rollcall_store::KvStore;

pub mod contributors;
mod detach;
pub mod error;
pub mod images;
pub mod keys;

pub use contributors::{ContributorDirectory, UpsertOutcome};
pub use error::{ServiceError, ServiceResult};
pub use images::{ImageGallery, ImageUpdate};

/// Both façades wired to one store and one set of gates.
#[derive(Clone, Debug)]
pub struct Services {
    pub contributors: ContributorDirectory,
    pub images: ImageGallery,
    gates: Gates,
}

impl Services {
    /// Build the façades over `store` with a fresh pair of gates.
    pub fn new(store: Arc<dyn KvStore>, blender: Blender) -> Self {
        Self::with_gates(store, blender, Gates::new())
    }

    /// Build the façades over `store` using the given gates.
    pub fn with_gates(store: Arc<dyn KvStore>, blender: Blender, gates: Gates) -> Self {
        let contributors =
            ContributorDirectory::new(Arc::clone(&store), Arc::clone(&gates.contributors));
        let images = ImageGallery::new(
            store,
            Arc::clone(&gates.images),
            Arc::new(blender),
            contributors.clone(),
        );
        Self {
            contributors,
            images,
            gates,
        }
    }

    pub fn gates(&self) -> &Gates {
        &self.gates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rollcall_store::InMemoryKvStore;
    use rollcall_types::{DisplayName, Username};
    use std::time::Duration;

    #[tokio::test]
    async fn image_writes_do_not_wait_on_contributor_gate() {
        let services = Services::new(Arc::new(InMemoryKvStore::new()), Blender::builtin());
        let _held = services.gates().contributors.enter().await;
        let result = tokio::time::timeout(
            Duration::from_secs(1),
            services.images.delete(&"0".repeat(64)),
        )
        .await
        .expect("image delete must not block on the contributor gate");
        assert!(matches!(result, Err(ServiceError::ImageNotFound(_))));
    }

    #[tokio::test]
    async fn contributor_writes_wait_for_their_gate() {
        let services = Services::new(Arc::new(InMemoryKvStore::new()), Blender::builtin());
        let username = Username::parse("waiter").unwrap();
        let held = services.gates().contributors.enter().await;
        let upsert = services.contributors.upsert(
            &username,
            DisplayName::parse("Wai Ter").unwrap(),
            "",
        );
        tokio::pin!(upsert);
        assert!(
            tokio::time::timeout(Duration::from_millis(50), &mut upsert)
                .await
                .is_err(),
            "upsert should block while the gate is held"
        );
        drop(held);
        assert!(upsert.await.unwrap().created);
    }

    #[tokio::test]
    async fn instances_are_isolated() {
        let a = Services::new(Arc::new(InMemoryKvStore::new()), Blender::builtin());
        let b = Services::new(Arc::new(InMemoryKvStore::new()), Blender::builtin());
        let _held = a.gates().contributors.enter().await;
        assert!(b.gates().contributors.try_enter().is_some());
    }
}
