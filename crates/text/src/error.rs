//! Error types produced by the text crate.
//!
//! | Error | Category | Description |
//! |-------|----------|-------------|
//! | [`UnsupportedAlgorithm`](TextError::UnsupportedAlgorithm) | Client | Algorithm name not in the allow-list |
//! | [`UnsupportedEncoding`](TextError::UnsupportedEncoding) | Client | Encoding name not in the allow-list |
//! | [`Decode`](TextError::Decode) | Client | Input is not well formed for the encoding |
use thiserror::Error;

use crate::encoding::Encoding;

/// Errors that can occur while hashing, encoding or decoding text.
///
/// All variants describe bad client input; none of them indicate a fault in
/// the underlying primitives.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TextError {
    #[error("unsupported hash algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("unsupported encoding: {0}")]
    UnsupportedEncoding(String),

    /// The input could not be decoded, or the decoded bytes are not UTF-8.
    #[error("invalid {encoding} input: {reason}")]
    Decode { encoding: Encoding, reason: String },
}
