use thiserror::Error;

/// Errors that can occur while decoding, transforming or encoding an image.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ImagingError {
    /// Format name not in the allow-list, or a recognised source format this
    /// build cannot handle.
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// Bytes do not decode as an image.
    #[error("invalid image data: {0}")]
    InvalidImage(String),

    /// A resize target with a zero side.
    #[error("invalid target dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// Re-encoding the transformed image failed.
    #[error("failed to encode image as {format}: {reason}")]
    Encode { format: String, reason: String },
}
