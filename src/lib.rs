//! Workspace umbrella crate for Toolbelt.
//!
//! Re-exports the utility crates so library consumers can depend on a single
//! package:
//!
//! - [`text`] - hashing and base64/base32/base16 codecs
//! - [`imaging`] - image resize, conversion and inspection
//! - [`pdfkit`] - PDF password removal and inspection
//! - [`server`] - the HTTP API that exposes all of the above
//!
//! ```
//! use toolbelt::text::{hash_text, HashAlgorithm};
//!
//! assert_eq!(hash_text("abc", HashAlgorithm::Sha1), "a9993e364706816aba3e25717850c26c9cd0d89d");
//! ```

pub use imaging;
pub use pdfkit;
pub use server;
pub use text;
