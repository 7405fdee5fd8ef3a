//! Resize, convert and inspect operations.

use std::borrow::Cow;
use std::io::Cursor;

use image::imageops::FilterType;
use image::{ColorType, DynamicImage, ImageDecoder, ImageReader};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::error::ImagingError;
use crate::format::ImageFormat;

/// Target geometry and output format for [`resize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeOptions {
    pub width: u32,
    pub height: u32,
    /// Fit inside `width` x `height` instead of stretching to it.
    pub maintain_aspect_ratio: bool,
    /// Output format; `None` keeps the source format.
    pub format: Option<ImageFormat>,
}

impl ResizeOptions {
    pub fn exact(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            maintain_aspect_ratio: false,
            format: None,
        }
    }

    pub fn fit(width: u32, height: u32) -> Self {
        Self {
            maintain_aspect_ratio: true,
            ..Self::exact(width, height)
        }
    }

    pub fn with_format(mut self, format: ImageFormat) -> Self {
        self.format = Some(format);
        self
    }
}

/// An encoded image plus the facts callers usually want about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub bytes: Vec<u8>,
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
}

/// Header-level description of an image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageInfo {
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
    /// Colour mode in the familiar short form (`RGB`, `RGBA`, `L`, ...).
    pub mode: String,
    pub bits_per_pixel: u16,
    /// Encoded size in bytes.
    pub size: usize,
}

impl ImageInfo {
    /// `"{width}x{height}"`.
    pub fn dimensions(&self) -> String {
        format!("{}x{}", self.width, self.height)
    }
}

/// Scale an encoded image and re-encode it.
#[instrument(skip(bytes), fields(bytes_len = bytes.len()))]
pub fn resize(bytes: &[u8], options: &ResizeOptions) -> Result<EncodedImage, ImagingError> {
    if options.width == 0 || options.height == 0 {
        return Err(ImagingError::InvalidDimensions {
            width: options.width,
            height: options.height,
        });
    }

    let (image, source_format) = decode(bytes)?;
    debug!(
        from_w = image.width(),
        from_h = image.height(),
        to_w = options.width,
        to_h = options.height,
        "Resizing image"
    );

    let resized = if options.maintain_aspect_ratio {
        image.resize(options.width, options.height, FilterType::Lanczos3)
    } else {
        image.resize_exact(options.width, options.height, FilterType::Lanczos3)
    };

    encode(&resized, options.format.unwrap_or(source_format))
}

/// Re-encode an image in `target` without changing its pixels' geometry.
#[instrument(skip(bytes), fields(bytes_len = bytes.len()))]
pub fn convert(bytes: &[u8], target: ImageFormat) -> Result<EncodedImage, ImagingError> {
    let (image, source_format) = decode(bytes)?;
    debug!(from = %source_format, to = %target, "Converting image");
    encode(&image, target)
}

/// Read format, dimensions and colour type without decoding pixel data.
#[instrument(skip_all, fields(bytes_len = bytes.len()))]
pub fn info(bytes: &[u8]) -> Result<ImageInfo, ImagingError> {
    let format = sniff(bytes)?;
    let decoder = ImageReader::with_format(Cursor::new(bytes), format.codec())
        .into_decoder()
        .map_err(|err| ImagingError::InvalidImage(err.to_string()))?;

    let (width, height) = decoder.dimensions();
    let color = decoder.color_type();

    Ok(ImageInfo {
        format,
        width,
        height,
        mode: color_mode(color).to_string(),
        bits_per_pixel: color.bits_per_pixel(),
        size: bytes.len(),
    })
}

fn sniff(bytes: &[u8]) -> Result<ImageFormat, ImagingError> {
    if bytes.is_empty() {
        return Err(ImagingError::InvalidImage("empty input".to_string()));
    }
    let codec =
        image::guess_format(bytes).map_err(|err| ImagingError::InvalidImage(err.to_string()))?;
    ImageFormat::from_codec(codec)
}

fn decode(bytes: &[u8]) -> Result<(DynamicImage, ImageFormat), ImagingError> {
    let format = sniff(bytes)?;
    let image = image::load_from_memory_with_format(bytes, format.codec())
        .map_err(|err| ImagingError::InvalidImage(err.to_string()))?;
    Ok((image, format))
}

fn encode(image: &DynamicImage, format: ImageFormat) -> Result<EncodedImage, ImagingError> {
    // JPEG has no alpha channel; the other lossless encoders only take 8-bit input.
    let prepared: Cow<'_, DynamicImage> = match format {
        ImageFormat::Png => Cow::Borrowed(image),
        ImageFormat::Jpeg => Cow::Owned(DynamicImage::ImageRgb8(image.to_rgb8())),
        ImageFormat::Gif | ImageFormat::Bmp | ImageFormat::WebP => {
            Cow::Owned(DynamicImage::ImageRgba8(image.to_rgba8()))
        }
    };

    let mut bytes = Vec::new();
    prepared
        .write_to(&mut Cursor::new(&mut bytes), format.codec())
        .map_err(|err| ImagingError::Encode {
            format: format.name().to_string(),
            reason: err.to_string(),
        })?;

    Ok(EncodedImage {
        bytes,
        format,
        width: prepared.width(),
        height: prepared.height(),
    })
}

fn color_mode(color: ColorType) -> &'static str {
    match color {
        ColorType::L8 => "L",
        ColorType::La8 => "LA",
        ColorType::Rgb8 => "RGB",
        ColorType::Rgba8 => "RGBA",
        ColorType::L16 => "I;16",
        ColorType::La16 => "LA;16",
        ColorType::Rgb16 => "RGB;16",
        ColorType::Rgba16 => "RGBA;16",
        ColorType::Rgb32F => "RGB;F",
        ColorType::Rgba32F => "RGBA;F",
        _ => "UNKNOWN",
    }
}
