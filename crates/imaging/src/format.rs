//! The image formats we read and write.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ImagingError;

const FORMAT_NAMES: &[&str] = &["PNG", "JPEG", "JPG", "GIF", "BMP", "WEBP"];

/// Supported image formats. `JPG` parses as [`ImageFormat::Jpeg`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Bmp,
    #[serde(rename = "WEBP")]
    WebP,
}

impl ImageFormat {
    pub const ALL: [ImageFormat; 5] = [
        ImageFormat::Png,
        ImageFormat::Jpeg,
        ImageFormat::Gif,
        ImageFormat::Bmp,
        ImageFormat::WebP,
    ];

    /// Uppercase name as reported in responses.
    pub fn name(&self) -> &'static str {
        match self {
            ImageFormat::Png => "PNG",
            ImageFormat::Jpeg => "JPEG",
            ImageFormat::Gif => "GIF",
            ImageFormat::Bmp => "BMP",
            ImageFormat::WebP => "WEBP",
        }
    }

    pub(crate) fn codec(self) -> image::ImageFormat {
        match self {
            ImageFormat::Png => image::ImageFormat::Png,
            ImageFormat::Jpeg => image::ImageFormat::Jpeg,
            ImageFormat::Gif => image::ImageFormat::Gif,
            ImageFormat::Bmp => image::ImageFormat::Bmp,
            ImageFormat::WebP => image::ImageFormat::WebP,
        }
    }

    /// Map a sniffed codec format back onto the supported set.
    pub(crate) fn from_codec(format: image::ImageFormat) -> Result<Self, ImagingError> {
        match format {
            image::ImageFormat::Png => Ok(ImageFormat::Png),
            image::ImageFormat::Jpeg => Ok(ImageFormat::Jpeg),
            image::ImageFormat::Gif => Ok(ImageFormat::Gif),
            image::ImageFormat::Bmp => Ok(ImageFormat::Bmp),
            image::ImageFormat::WebP => Ok(ImageFormat::WebP),
            other => Err(ImagingError::UnsupportedFormat(format!("{other:?}").to_uppercase())),
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ImageFormat {
    type Err = ImagingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PNG" => Ok(ImageFormat::Png),
            "JPEG" | "JPG" => Ok(ImageFormat::Jpeg),
            "GIF" => Ok(ImageFormat::Gif),
            "BMP" => Ok(ImageFormat::Bmp),
            "WEBP" => Ok(ImageFormat::WebP),
            _ => Err(ImagingError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Allow-list of format names, aliases included.
pub fn supported_formats() -> &'static [&'static str] {
    FORMAT_NAMES
}
