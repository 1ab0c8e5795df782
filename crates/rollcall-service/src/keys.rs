//! Layout of the store's key space.

use rollcall_types::ImageId;

/// Outer key of the hash holding every contributor record.
pub const CONTRIBUTORS_KEY: &str = "contributors";

/// Prefix separating image blobs from other flat keys.
pub const IMAGE_KEY_PREFIX: &str = "img_";

/// Flat key of an image blob.
pub fn image_key(id: &ImageId) -> String {
    format!("{IMAGE_KEY_PREFIX}{id}")
}
