/// Domain-separated BLAKE3 hasher.
///
/// Each hasher carries a domain tag that is prepended to every hash
/// computation, so a content digest can never be confused with an
/// identifier computed from the same bytes.
pub struct ContentHasher {
    domain: &'static str,
}

impl ContentHasher {
    /// Hasher for uploaded image content.
    pub const IMAGE_CONTENT: Self = Self {
        domain: "rollcall-image-content-v1",
    };
    /// Hasher for image identifiers.
    pub const IMAGE_ID: Self = Self {
        domain: "rollcall-image-id-v1",
    };

    /// Hash raw bytes with domain separation.
    pub fn hash(&self, data: &[u8]) -> [u8; 32] {
        self.hash_parts(&[data])
    }

    /// Hash several byte slices as one message with domain separation.
    pub fn hash_parts(&self, parts: &[&[u8]]) -> [u8; 32] {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.domain.as_bytes());
        hasher.update(b":");
        for part in parts {
            hasher.update(part);
        }
        *hasher.finalize().as_bytes()
    }
}
