//! The fixed overlay mixed into every retrieved image.

use std::path::Path;

use image::{DynamicImage, Rgb, RgbImage};

use crate::error::{BlendError, BlendResult};

const BUILTIN_SIZE: u32 = 256;
const STRIPE_WIDTH: u32 = 32;

/// The overlay bundled into the binary: diagonal red and white stripes.
///
/// Used when no overlay file is configured. It is RGB with no alpha
/// channel, so uploads with alpha get the overlay padded to opaque.
pub fn builtin() -> DynamicImage {
    let stripes = RgbImage::from_fn(BUILTIN_SIZE, BUILTIN_SIZE, |x, y| {
        if ((x + y) / STRIPE_WIDTH) % 2 == 0 {
            Rgb([200, 16, 46])
        } else {
            Rgb([250, 250, 250])
        }
    });
    DynamicImage::ImageRgb8(stripes)
}

/// Load an overlay from any format the `image` crate understands.
pub fn load(path: &Path) -> BlendResult<DynamicImage> {
    image::open(path).map_err(|e| BlendError::Overlay {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Decode an overlay from in-memory bytes.
pub fn decode(bytes: &[u8]) -> BlendResult<DynamicImage> {
    image::load_from_memory(bytes).map_err(|e| BlendError::Overlay {
        path: "<memory>".into(),
        reason: e.to_string(),
    })
}
