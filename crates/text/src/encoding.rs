//! Binary-to-text encodings of UTF-8 strings.
//!
//! All alphabets are RFC 4648 with padding. Base16 encodes uppercase and
//! decodes either case.

use std::fmt;
use std::str::FromStr;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::TextError;

const ENCODING_NAMES: &[&str] = &["base64", "base32", "base16"];

/// Supported encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    Base64,
    Base32,
    Base16,
}

impl Encoding {
    pub const ALL: [Encoding; 3] = [Encoding::Base64, Encoding::Base32, Encoding::Base16];

    pub fn name(&self) -> &'static str {
        match self {
            Encoding::Base64 => "base64",
            Encoding::Base32 => "base32",
            Encoding::Base16 => "base16",
        }
    }

    /// Uppercase label used in responses (`"BASE64"`).
    pub fn label(&self) -> String {
        self.name().to_ascii_uppercase()
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Encoding {
    type Err = TextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "base64" => Ok(Encoding::Base64),
            "base32" => Ok(Encoding::Base32),
            "base16" | "hex" => Ok(Encoding::Base16),
            _ => Err(TextError::UnsupportedEncoding(s.to_string())),
        }
    }
}

/// Allow-list of encoding names.
pub fn supported_encodings() -> &'static [&'static str] {
    ENCODING_NAMES
}

/// Encode the UTF-8 bytes of `text`. Total over all inputs.
#[tracing::instrument(skip_all, fields(text_len = text.len(), encoding = %encoding))]
pub fn encode(text: &str, encoding: Encoding) -> String {
    let bytes = text.as_bytes();
    match encoding {
        Encoding::Base64 => STANDARD.encode(bytes),
        Encoding::Base32 => data_encoding::BASE32.encode(bytes),
        Encoding::Base16 => hex::encode_upper(bytes),
    }
}

/// Decode `text` and interpret the result as UTF-8.
///
/// Leading and trailing whitespace is ignored; anything else outside the
/// alphabet, bad padding, or non-UTF-8 output is a [`TextError::Decode`].
#[tracing::instrument(skip_all, fields(text_len = text.len(), encoding = %encoding))]
pub fn decode(text: &str, encoding: Encoding) -> Result<String, TextError> {
    let input = text.trim();
    let decoded = match encoding {
        Encoding::Base64 => STANDARD.decode(input).map_err(|e| e.to_string()),
        Encoding::Base32 => data_encoding::BASE32
            .decode(input.as_bytes())
            .map_err(|e| e.to_string()),
        Encoding::Base16 => hex::decode(input).map_err(|e| e.to_string()),
    }
    .map_err(|reason| TextError::Decode { encoding, reason })?;

    String::from_utf8(decoded).map_err(|_| TextError::Decode {
        encoding,
        reason: "decoded bytes are not valid UTF-8".to_string(),
    })
}
