//! Hex digests over UTF-8 text.
//!
//! ```rust
//! use text::{hash_text, HashAlgorithm};
//!
//! assert_eq!(
//!     hash_text("hello", HashAlgorithm::Md5),
//!     "5d41402abc4b2a76b9719d911017c592"
//! );
//! ```

use std::fmt;
use std::str::FromStr;

use md5::Md5;
use sha1::Sha1;
use sha2::{Digest, Sha224, Sha256, Sha384, Sha512};

use crate::error::TextError;

const ALGORITHM_NAMES: &[&str] = &["md5", "sha1", "sha224", "sha256", "sha384", "sha512"];

/// Supported digest algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    Md5,
    Sha1,
    Sha224,
    Sha256,
    Sha384,
    Sha512,
}

impl HashAlgorithm {
    pub const ALL: [HashAlgorithm; 6] = [
        HashAlgorithm::Md5,
        HashAlgorithm::Sha1,
        HashAlgorithm::Sha224,
        HashAlgorithm::Sha256,
        HashAlgorithm::Sha384,
        HashAlgorithm::Sha512,
    ];

    /// Lowercase name, as accepted in requests.
    pub fn name(&self) -> &'static str {
        match self {
            HashAlgorithm::Md5 => "md5",
            HashAlgorithm::Sha1 => "sha1",
            HashAlgorithm::Sha224 => "sha224",
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Sha384 => "sha384",
            HashAlgorithm::Sha512 => "sha512",
        }
    }

    /// Uppercase label used in responses (`"SHA256"`).
    pub fn label(&self) -> String {
        self.name().to_ascii_uppercase()
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashAlgorithm {
    type Err = TextError;

    /// Case-insensitive; the dashed spellings (`sha-256`) are accepted too.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "");
        HashAlgorithm::ALL
            .into_iter()
            .find(|algorithm| algorithm.name() == normalized)
            .ok_or_else(|| TextError::UnsupportedAlgorithm(s.to_string()))
    }
}

/// Allow-list of algorithm names.
pub fn supported_algorithms() -> &'static [&'static str] {
    ALGORITHM_NAMES
}

/// Lowercase hex digest of `text`'s UTF-8 bytes.
#[tracing::instrument(skip_all, fields(text_len = text.len(), alg = %algorithm))]
pub fn hash_text(text: &str, algorithm: HashAlgorithm) -> String {
    hash_bytes(text.as_bytes(), algorithm)
}

fn hash_bytes(data: &[u8], algorithm: HashAlgorithm) -> String {
    match algorithm {
        HashAlgorithm::Md5 => hex_digest::<Md5>(data),
        HashAlgorithm::Sha1 => hex_digest::<Sha1>(data),
        HashAlgorithm::Sha224 => hex_digest::<Sha224>(data),
        HashAlgorithm::Sha256 => hex_digest::<Sha256>(data),
        HashAlgorithm::Sha384 => hex_digest::<Sha384>(data),
        HashAlgorithm::Sha512 => hex_digest::<Sha512>(data),
    }
}

fn hex_digest<D: Digest>(data: &[u8]) -> String {
    hex::encode(D::digest(data))
}
