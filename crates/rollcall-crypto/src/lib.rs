//! Hashing primitives for rollcall.
//!
//! Provides domain-separated BLAKE3 hashing and the minting of image
//! identifiers. All hashing wraps `blake3`; nothing here is custom
//! cryptography.

pub mod hasher;
pub mod mint;

pub use hasher::ContentHasher;
pub use mint::mint_image_id;
