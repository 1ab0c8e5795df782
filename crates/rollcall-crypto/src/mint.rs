use std::time::{SystemTime, UNIX_EPOCH};

use rollcall_types::ImageId;

use crate::hasher::ContentHasher;

/// Mint a fresh identifier for an upload.
///
/// The content digest is combined with the wall-clock time and a random
/// salt and then rehashed, so repeated uploads of identical bytes still get
/// distinct identifiers.
pub fn mint_image_id(content: &[u8]) -> ImageId {
    let digest = ContentHasher::IMAGE_CONTENT.hash(content);
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    let salt: u64 = rand::random();
    ImageId::from_hash(ContentHasher::IMAGE_ID.hash_parts(&[
        &digest,
        &nanos.to_le_bytes(),
        &salt.to_le_bytes(),
    ]))
}
