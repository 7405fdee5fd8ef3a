//! Toolbelt text utilities
//!
//! Small, pure text transformations exposed by the `/text` utility group:
//!
//! - **Hashing** - hex digests with MD5, SHA-1 and the SHA-2 family
//! - **Encoding** - base64, base32 and base16 encode/decode of UTF-8 text
//!
//! Every operation is a plain function of its input. Nothing is cached and no
//! state is shared between calls, so callers are free to invoke them from any
//! thread.
//!
//! The allow-lists returned by [`supported_algorithms`] and
//! [`supported_encodings`] are the same ones the request validation uses, so
//! clients listing them always see what the server accepts.
//!
//! ## Example
//!
//! ```
//! use text::{decode, encode, hash_text, Encoding, HashAlgorithm};
//!
//! let digest = hash_text("hello", HashAlgorithm::Sha256);
//! assert_eq!(digest.len(), 64);
//!
//! let encoded = encode("Hello, World!", Encoding::Base64);
//! assert_eq!(encoded, "SGVsbG8sIFdvcmxkIQ==");
//! assert_eq!(decode(&encoded, Encoding::Base64).unwrap(), "Hello, World!");
//! ```

mod encoding;
mod error;
mod hash;

pub use crate::encoding::{decode, encode, supported_encodings, Encoding};
pub use crate::error::TextError;
pub use crate::hash::{hash_text, supported_algorithms, HashAlgorithm};
