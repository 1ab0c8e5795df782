//! Signature checks and encoders for the accepted bitmap family.

use image::codecs::png::PngEncoder;
use image::{DynamicImage, ImageEncoder, ImageFormat};

use crate::error::{BlendError, BlendResult};
use crate::raster::Raster;

/// The eight-byte PNG file signature.
pub const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

const BMP_SIGNATURE: [u8; 2] = *b"BM";

/// Check that an upload is a decodable PNG.
pub fn check_png(bytes: &[u8]) -> BlendResult<()> {
    if !bytes.starts_with(&PNG_SIGNATURE) {
        return Err(BlendError::NotPng);
    }
    image::load_from_memory_with_format(bytes, ImageFormat::Png)
        .map(|_| ())
        .map_err(|e| BlendError::BadPng(e.to_string()))
}

/// Format of bytes the blender may be handed: a PNG upload or its own BMP
/// output from an earlier retrieval.
pub(crate) fn detect(bytes: &[u8]) -> BlendResult<ImageFormat> {
    if bytes.starts_with(&PNG_SIGNATURE) {
        Ok(ImageFormat::Png)
    } else if bytes.starts_with(&BMP_SIGNATURE) {
        Ok(ImageFormat::Bmp)
    } else {
        Err(BlendError::UnsupportedFormat)
    }
}

/// Encode an image as 8-bit PNG, keeping its channel layout.
pub fn encode_png(image: &DynamicImage) -> BlendResult<Vec<u8>> {
    let raster = Raster::from_image(image);
    let mut out = Vec::new();
    PngEncoder::new(&mut out)
        .write_image(
            &raster.samples,
            raster.width,
            raster.height,
            raster.color_type(),
        )
        .map_err(|e| BlendError::Encode(e.to_string()))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    fn tiny_png() -> Vec<u8> {
        encode_png(&DynamicImage::ImageRgb8(RgbImage::new(4, 3))).unwrap()
    }

    #[test]
    fn accepts_real_png() {
        check_png(&tiny_png()).unwrap();
    }

    #[test]
    fn rejects_missing_signature() {
        assert!(matches!(check_png(b"GIF89a...."), Err(BlendError::NotPng)));
        assert!(matches!(check_png(b""), Err(BlendError::NotPng)));
    }

    #[test]
    fn rejects_truncated_png() {
        let png = tiny_png();
        let err = check_png(&png[..12]).unwrap_err();
        assert!(matches!(err, BlendError::BadPng(_)));
        assert_eq!(err.code(), "BAD_PNG_FILE");
    }

    #[test]
    fn detect_recognizes_png_and_bmp() {
        assert_eq!(detect(&tiny_png()).unwrap(), ImageFormat::Png);
        assert_eq!(detect(b"BM\0\0").unwrap(), ImageFormat::Bmp);
        assert!(matches!(
            detect(b"\xff\xd8\xff"),
            Err(BlendError::UnsupportedFormat)
        ));
    }
}
