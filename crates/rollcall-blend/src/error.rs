use std::path::PathBuf;

/// Errors from image checks and blending.
#[derive(Debug, thiserror::Error)]
pub enum BlendError {
    /// The upload does not start with the PNG signature.
    #[error("not a PNG file")]
    NotPng,

    /// The upload has the PNG signature but does not decode.
    #[error("bad PNG file: {0}")]
    BadPng(String),

    /// The bytes are neither PNG nor BMP.
    #[error("unsupported image format")]
    UnsupportedFormat,

    /// The bytes claim a supported format but do not decode.
    #[error("image decode failed: {0}")]
    Decode(String),

    /// The overlay has more channels than the base image.
    #[error("overlay has {overlay} channels but the base image only {base}")]
    ChannelMismatch { base: u8, overlay: u8 },

    /// The blended raster could not be encoded.
    #[error("image encode failed: {0}")]
    Encode(String),

    /// The overlay image could not be loaded.
    #[error("cannot load overlay {path}: {reason}")]
    Overlay { path: PathBuf, reason: String },
}

impl BlendError {
    /// Stable error code reported to HTTP clients.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotPng => "NOT_PNG_FILE",
            Self::BadPng(_) => "BAD_PNG_FILE",
            _ => "BAD_INPUT_FORMAT",
        }
    }
}

/// Result alias for blending operations.
pub type BlendResult<T> = Result<T, BlendError>;
