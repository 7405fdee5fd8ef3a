use std::collections::BTreeMap;

use lopdf::{Document, Object};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::error::PdfError;
use crate::unlock::{ensure_pdf_header, open_error};

/// Document-level facts reported by [`info`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PdfInfo {
    /// `None` when the document cannot be opened without a password.
    pub page_count: Option<usize>,
    pub is_encrypted: bool,
    pub file_size: usize,
    pub version: Option<String>,
    /// Entries of the trailer `Info` dictionary, keys in snake_case.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<BTreeMap<String, String>>,
}

/// Inspect a PDF without modifying it.
///
/// Documents that only open with a non-empty user password are reported as
/// encrypted with no page count.
#[instrument(skip(bytes), fields(bytes_len = bytes.len()))]
pub fn info(bytes: &[u8], include_metadata: bool) -> Result<PdfInfo, PdfError> {
    ensure_pdf_header(bytes)?;

    // Without a password lopdf still tries the empty one; a document it cannot
    // open keeps the Encrypt entry in its trailer.
    let document = Document::load_mem(bytes).map_err(open_error)?;
    let version = Some(document.version.clone());

    if document.is_encrypted() {
        debug!("Document is locked; reporting header facts only");
        return Ok(PdfInfo {
            page_count: None,
            is_encrypted: true,
            file_size: bytes.len(),
            version,
            metadata: None,
        });
    }

    Ok(PdfInfo {
        page_count: Some(document.get_pages().len()),
        is_encrypted: document.was_encrypted(),
        file_size: bytes.len(),
        version,
        metadata: include_metadata.then(|| document_metadata(&document)),
    })
}

fn document_metadata(document: &Document) -> BTreeMap<String, String> {
    let mut metadata = BTreeMap::new();

    let dict = match document.trailer.get(b"Info") {
        Ok(Object::Reference(id)) => document.get_dictionary(*id).ok(),
        Ok(Object::Dictionary(dict)) => Some(dict),
        _ => None,
    };
    let Some(dict) = dict else {
        return metadata;
    };

    for (key, value) in dict.iter() {
        if let Object::String(raw, _) = value {
            metadata.insert(snake_case(&String::from_utf8_lossy(key)), decode_text(raw));
        }
    }
    metadata
}

/// PDF text strings are either UTF-16BE with a BOM or PDFDocEncoding, which
/// agrees with Latin-1 over the printable range.
fn decode_text(raw: &[u8]) -> String {
    if let Some(utf16) = raw.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = utf16
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }
    raw.iter().map(|&b| b as char).collect()
}

fn snake_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for (i, ch) in key.chars().enumerate() {
        if ch.is_ascii_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}
