use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Opaque identifier of an uploaded image.
///
/// Identifiers are minted once per upload and never derived from content
/// alone, so two uploads of the same bytes get different ids. On the wire
/// and in store keys they are 64 lowercase hex characters.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ImageId([u8; 32]);

impl ImageId {
    /// Wrap a pre-computed hash.
    pub fn from_hash(hash: [u8; 32]) -> Self {
        Self(hash)
    }

    /// The raw 32 bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Hex-encoded string representation.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Short hex representation (first 8 characters).
    pub fn short_hex(&self) -> String {
        hex::encode(&self.0[..4])
    }

    /// Parse from a hex string.
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        let bytes = hex::decode(s).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
        if bytes.len() != 32 {
            return Err(TypeError::InvalidLength {
                expected: 32,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl FromStr for ImageId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Debug for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ImageId({})", self.short_hex())
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_roundtrip() {
        let id = ImageId::from_hash([0xab; 32]);
        let parsed: ImageId = id.to_hex().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn display_is_full_lowercase_hex() {
        let id = ImageId::from_hash([0xcd; 32]);
        let display = format!("{id}");
        assert_eq!(display.len(), 64);
        assert_eq!(display, "cd".repeat(32));
    }

    #[test]
    fn debug_uses_short_hex() {
        let id = ImageId::from_hash([0x01; 32]);
        assert_eq!(format!("{id:?}"), "ImageId(01010101)");
    }

    #[test]
    fn rejects_non_hex() {
        assert!(matches!(
            ImageId::from_hex("not-an-id"),
            Err(TypeError::InvalidHex(_))
        ));
    }

    #[test]
    fn rejects_wrong_length() {
        assert_eq!(
            ImageId::from_hex("abcd"),
            Err(TypeError::InvalidLength {
                expected: 32,
                actual: 2
            })
        );
    }
}
