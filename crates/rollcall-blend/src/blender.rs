use std::path::Path;

use image::codecs::bmp::BmpEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};

use crate::error::{BlendError, BlendResult};
use crate::format::detect;
use crate::overlay;
use crate::raster::Raster;

/// Weight of the overlay in every blend.
pub const BLEND_RATIO: f64 = 0.1;

/// Mixes a fixed overlay into base images.
///
/// For a base `B` and the overlay `O` resized to `B`'s dimensions, every
/// sample becomes `(1 - r)·B + r·O`, truncated to `u8`. The output is an
/// uncompressed BMP with `B`'s channel layout.
#[derive(Clone)]
pub struct Blender {
    overlay: DynamicImage,
    ratio: f64,
}

impl Blender {
    /// A blender over the given overlay image.
    pub fn new(overlay: DynamicImage) -> Self {
        Self {
            overlay,
            ratio: BLEND_RATIO,
        }
    }

    /// A blender over the overlay bundled into the binary.
    pub fn builtin() -> Self {
        Self::new(overlay::builtin())
    }

    /// A blender over an overlay loaded from disk.
    pub fn from_overlay_path(path: &Path) -> BlendResult<Self> {
        overlay::load(path).map(Self::new)
    }

    /// A blender over an overlay decoded from memory.
    pub fn from_overlay_bytes(bytes: &[u8]) -> BlendResult<Self> {
        overlay::decode(bytes).map(Self::new)
    }

    pub fn overlay_dimensions(&self) -> (u32, u32) {
        self.overlay.dimensions()
    }

    /// Blend the overlay into `base` and return the BMP encoding.
    ///
    /// `base` must be PNG or BMP. The overlay may have fewer channels than
    /// the base (missing ones are filled with 255) but never more.
    pub fn blend(&self, base: &[u8]) -> BlendResult<Vec<u8>> {
        let format = detect(base)?;
        let base = image::load_from_memory_with_format(base, format)
            .map_err(|e| BlendError::Decode(e.to_string()))?;
        let base = Raster::from_image(&base);

        let resized = self
            .overlay
            .resize_exact(base.width, base.height, FilterType::Nearest);
        let overlay = Raster::from_image(&resized).pad_channels(base.channels);
        if overlay.channels != base.channels {
            return Err(BlendError::ChannelMismatch {
                base: base.channels,
                overlay: overlay.channels,
            });
        }

        let keep = 1.0 - self.ratio;
        let samples: Vec<u8> = base
            .samples
            .iter()
            .zip(&overlay.samples)
            .map(|(&b, &o)| (keep * f64::from(b) + self.ratio * f64::from(o)) as u8)
            .collect();
        let blended = Raster { samples, ..base };

        tracing::debug!(
            width = blended.width,
            height = blended.height,
            channels = blended.channels,
            "blended overlay into image"
        );
        encode_bmp(&blended)
    }
}

fn encode_bmp(raster: &Raster) -> BlendResult<Vec<u8>> {
    let mut out = Vec::new();
    BmpEncoder::new(&mut out)
        .encode(
            &raster.samples,
            raster.width,
            raster.height,
            raster.color_type(),
        )
        .map_err(|e| BlendError::Encode(e.to_string()))?;
    Ok(out)
}

impl std::fmt::Debug for Blender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Blender")
            .field("overlay", &self.overlay_dimensions())
            .field("ratio", &self.ratio)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::encode_png;
    use image::{GrayImage, Luma, Rgb, RgbImage, Rgba, RgbaImage};

    fn solid_overlay(value: u8) -> Blender {
        Blender::new(DynamicImage::ImageRgb8(RgbImage::from_pixel(
            8,
            8,
            Rgb([value; 3]),
        )))
    }

    fn rgb_png(width: u32, height: u32, value: u8) -> Vec<u8> {
        encode_png(&DynamicImage::ImageRgb8(RgbImage::from_pixel(
            width,
            height,
            Rgb([value; 3]),
        )))
        .unwrap()
    }

    fn decode(bytes: &[u8]) -> DynamicImage {
        image::load_from_memory_with_format(bytes, image::ImageFormat::Bmp).unwrap()
    }

    #[test]
    fn output_is_bmp_with_base_dimensions() {
        let out = solid_overlay(0).blend(&rgb_png(5, 3, 100)).unwrap();
        assert!(out.starts_with(b"BM"));
        assert_eq!(decode(&out).dimensions(), (5, 3));
    }

    #[test]
    fn applies_ratio_per_sample() {
        let out = solid_overlay(200).blend(&rgb_png(2, 2, 100)).unwrap();
        let img = decode(&out).to_rgb8();
        for pixel in img.pixels() {
            for &sample in &pixel.0 {
                // 0.9 * 100 + 0.1 * 200 = 110, truncated.
                assert!((109..=110).contains(&sample), "sample was {sample}");
            }
        }
    }

    #[test]
    fn blend_is_deterministic() {
        let blender = Blender::builtin();
        let base = rgb_png(17, 9, 40);
        assert_eq!(blender.blend(&base).unwrap(), blender.blend(&base).unwrap());
    }

    #[test]
    fn repeated_blending_keeps_moving() {
        let blender = solid_overlay(0);
        let first = blender.blend(&rgb_png(4, 4, 250)).unwrap();
        let second = blender.blend(&first).unwrap();
        assert_ne!(first, second);
        let a = decode(&first).to_rgb8().get_pixel(0, 0).0[0];
        let b = decode(&second).to_rgb8().get_pixel(0, 0).0[0];
        assert!(b < a, "expected {b} < {a}");
    }

    #[test]
    fn overlay_is_padded_with_opaque_alpha() {
        let base = encode_png(&DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            3,
            3,
            Rgba([10, 10, 10, 100]),
        )))
        .unwrap();
        let out = solid_overlay(10).blend(&base).unwrap();
        let img = decode(&out);
        assert_eq!(img.color().channel_count(), 4);
        let alpha = img.to_rgba8().get_pixel(1, 1).0[3];
        // 0.9 * 100 + 0.1 * 255 = 115.5
        assert!((114..=115).contains(&alpha), "alpha was {alpha}");
    }

    #[test]
    fn overlay_wider_than_base_is_rejected() {
        let gray = encode_png(&DynamicImage::ImageLuma8(GrayImage::from_pixel(
            2,
            2,
            Luma([50]),
        )))
        .unwrap();
        let err = solid_overlay(0).blend(&gray).unwrap_err();
        assert!(matches!(
            err,
            BlendError::ChannelMismatch {
                base: 1,
                overlay: 3
            }
        ));
    }

    #[test]
    fn rejects_unsupported_bytes() {
        let err = Blender::builtin().blend(b"plain text").unwrap_err();
        assert!(matches!(err, BlendError::UnsupportedFormat));
    }

    #[test]
    fn rejects_corrupt_png() {
        let png = rgb_png(4, 4, 0);
        let err = Blender::builtin().blend(&png[..20]).unwrap_err();
        assert!(matches!(err, BlendError::Decode(_)));
    }

    #[test]
    fn overlay_from_bytes() {
        let blender = Blender::from_overlay_bytes(&rgb_png(6, 2, 9)).unwrap();
        assert_eq!(blender.overlay_dimensions(), (6, 2));
    }
}
