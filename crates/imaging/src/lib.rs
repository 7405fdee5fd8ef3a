//! Toolbelt image utilities
//!
//! Decode, transform and re-encode images held in memory. This is the engine
//! behind the `/image` utility group:
//!
//! - [`resize`] - scale to a target box, optionally preserving aspect ratio
//! - [`convert`] - re-encode in another format
//! - [`info`] - read format, dimensions and colour mode from the header
//! - [`supported_formats`] - the format allow-list shared with validation
//!
//! Source formats are sniffed from the bytes; callers never declare them.
//! Decoding is delegated to the `image` crate.
//!
//! ```no_run
//! use imaging::{resize, ImageFormat, ResizeOptions};
//!
//! # fn demo(png: &[u8]) -> Result<(), imaging::ImagingError> {
//! let options = ResizeOptions::exact(100, 100).with_format(ImageFormat::Png);
//! let resized = resize(png, &options)?;
//! assert_eq!((resized.width, resized.height), (100, 100));
//! # Ok(())
//! # }
//! ```

mod error;
mod format;
mod ops;

pub use crate::error::ImagingError;
pub use crate::format::{supported_formats, ImageFormat};
pub use crate::ops::{convert, info, resize, EncodedImage, ImageInfo, ResizeOptions};
