use image::{ColorType, DynamicImage, GenericImageView};

/// An 8-bit interleaved pixel grid: `height × width × channels`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Raster {
    pub width: u32,
    pub height: u32,
    pub channels: u8,
    pub samples: Vec<u8>,
}

impl Raster {
    /// Flatten an image to 8-bit samples, keeping its channel count.
    pub fn from_image(image: &DynamicImage) -> Self {
        let (width, height) = image.dimensions();
        let (channels, samples) = match image.color().channel_count() {
            1 => (1, image.to_luma8().into_raw()),
            2 => (2, image.to_luma_alpha8().into_raw()),
            3 => (3, image.to_rgb8().into_raw()),
            _ => (4, image.to_rgba8().into_raw()),
        };
        Self {
            width,
            height,
            channels,
            samples,
        }
    }

    pub fn color_type(&self) -> ColorType {
        match self.channels {
            1 => ColorType::L8,
            2 => ColorType::La8,
            3 => ColorType::Rgb8,
            _ => ColorType::Rgba8,
        }
    }

    /// Append fully opaque (255) channels to every pixel until each has
    /// `target` channels. A raster already that wide is returned as-is.
    pub fn pad_channels(self, target: u8) -> Self {
        if self.channels >= target {
            return self;
        }
        let from = usize::from(self.channels);
        let to = usize::from(target);
        let mut samples = Vec::with_capacity(self.samples.len() / from * to);
        for pixel in self.samples.chunks_exact(from) {
            samples.extend_from_slice(pixel);
            samples.resize(samples.len() + (to - from), u8::MAX);
        }
        Self {
            channels: target,
            samples,
            ..self
        }
    }
}
