//! Image blending for rollcall.
//!
//! Uploads must be PNG. Every retrieval runs the stored image through
//! [`Blender::blend`], which mixes in a fixed overlay at [`BLEND_RATIO`] and
//! re-encodes the result as an uncompressed BMP. The BMP is what gets stored
//! back, so the blender also accepts its own output on the next pass.
//!
//! The transform is pure: the same base bytes and overlay always produce the
//! same output bytes.

pub mod blender;
pub mod error;
pub mod format;
pub mod overlay;
mod raster;

pub use blender::{Blender, BLEND_RATIO};
pub use error::{BlendError, BlendResult};
pub use format::{check_png, encode_png, PNG_SIGNATURE};
