use std::sync::Arc;

use rollcall_blend::{check_png, Blender};
use rollcall_crypto::mint_image_id;
use rollcall_gate::ResourceGate;
use rollcall_store::KvStore;
use rollcall_types::ImageId;

use crate::contributors::ContributorDirectory;
use crate::detach::run_to_completion;
use crate::error::{ServiceError, ServiceResult};
use crate::keys::image_key;

/// Result of replacing an image's content.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageUpdate {
    /// `false` when the new bytes equal the stored ones.
    pub changed: bool,
}

/// CRUD façade over image blobs.
///
/// Writes require the acting username to be a registered contributor at the
/// time of the write; nothing ties an image to its uploader afterwards.
/// Retrieval is itself a write: the blended result replaces the stored blob.
#[derive(Clone)]
pub struct ImageGallery {
    store: Arc<dyn KvStore>,
    gate: Arc<ResourceGate>,
    blender: Arc<Blender>,
    contributors: ContributorDirectory,
}

impl ImageGallery {
    pub fn new(
        store: Arc<dyn KvStore>,
        gate: Arc<ResourceGate>,
        blender: Arc<Blender>,
        contributors: ContributorDirectory,
    ) -> Self {
        Self {
            store,
            gate,
            blender,
            contributors,
        }
    }

    /// Store a new upload under a freshly minted identifier.
    pub async fn create(&self, username: &str, file: &[u8]) -> ServiceResult<ImageId> {
        self.authorize(username).await?;
        check_png(file).map_err(ServiceError::BadImage)?;

        let id = mint_image_id(file);
        {
            let _held = self.gate.enter().await;
            self.store.set(&image_key(&id), file).await?;
        }
        tracing::debug!(%id, username, bytes = file.len(), "image created");
        Ok(id)
    }

    /// Replace the content of an existing image, keeping its identifier.
    pub async fn update(
        &self,
        identifier: &str,
        username: &str,
        file: &[u8],
    ) -> ServiceResult<ImageUpdate> {
        self.authorize(username).await?;
        check_png(file).map_err(ServiceError::BadImage)?;

        let key = image_key(&parse_id(identifier)?);
        let gallery = self.clone();
        let identifier = identifier.to_string();
        let file = file.to_vec();
        run_to_completion(async move { gallery.replace_existing(&key, &identifier, &file).await })
            .await
    }

    async fn replace_existing(
        &self,
        key: &str,
        identifier: &str,
        file: &[u8],
    ) -> ServiceResult<ImageUpdate> {
        let _held = self.gate.enter().await;
        if !self.store.exists(key).await? {
            return Err(ServiceError::ImageNotFound(identifier.to_string()));
        }
        let previous = self.store.get_set(key, file).await?;
        let changed = previous.as_deref() != Some(file);
        tracing::debug!(identifier, changed, "image updated");
        Ok(ImageUpdate { changed })
    }

    /// Remove an image.
    pub async fn delete(&self, identifier: &str) -> ServiceResult<()> {
        let key = image_key(&parse_id(identifier)?);
        let removed = {
            let _held = self.gate.enter().await;
            self.store.delete(&key).await?
        };
        if !removed {
            return Err(ServiceError::ImageNotFound(identifier.to_string()));
        }
        tracing::debug!(identifier, "image deleted");
        Ok(())
    }

    /// Blend the stored image, store the blend in its place and return it.
    ///
    /// Each call blends again on top of the previous result, so repeated
    /// retrievals drift further towards the overlay.
    pub async fn retrieve(&self, identifier: &str) -> ServiceResult<Vec<u8>> {
        let key = image_key(&parse_id(identifier)?);
        let gallery = self.clone();
        let identifier = identifier.to_string();
        run_to_completion(async move { gallery.blend_in_place(&key, &identifier).await }).await
    }

    async fn blend_in_place(&self, key: &str, identifier: &str) -> ServiceResult<Vec<u8>> {
        let _held = self.gate.enter().await;
        let Some(current) = self.store.get(key).await? else {
            return Err(ServiceError::ImageNotFound(identifier.to_string()));
        };

        let blender = Arc::clone(&self.blender);
        let blended = tokio::task::spawn_blocking(move || blender.blend(&current))
            .await
            .map_err(|e| ServiceError::Internal(format!("blend task failed: {e}")))?
            .map_err(|e| {
                tracing::warn!(identifier, error = %e, "stored image could not be blended");
                ServiceError::Blend(e)
            })?;

        self.store.set(key, &blended).await?;
        tracing::debug!(identifier, bytes = blended.len(), "image retrieved and blended");
        Ok(blended)
    }

    async fn authorize(&self, username: &str) -> ServiceResult<()> {
        if self.contributors.exists(username).await? {
            Ok(())
        } else {
            Err(ServiceError::Unauthorized {
                username: username.to_string(),
            })
        }
    }
}

/// Identifiers that are not well-formed can never have been minted.
fn parse_id(identifier: &str) -> ServiceResult<ImageId> {
    ImageId::from_hex(identifier).map_err(|_| ServiceError::ImageNotFound(identifier.to_string()))
}

impl std::fmt::Debug for ImageGallery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageGallery")
            .field("gate", &self.gate)
            .field("blender", &self.blender)
            .finish_non_exhaustive()
    }
}
