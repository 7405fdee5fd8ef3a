use std::fs;
use std::io::Write;

use lopdf::Document;
use tempfile::NamedTempFile;
use tracing::{debug, info, instrument};

use crate::error::PdfError;

const PDF_MAGIC: &[u8] = b"%PDF-";

/// Output of [`unlock`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnlockedPdf {
    /// The re-saved document, free of any encryption dictionary.
    pub bytes: Vec<u8>,
    pub page_count: usize,
    /// Whether the input's trailer referenced an encryption dictionary.
    pub was_encrypted: bool,
}

/// Remove password protection from a PDF.
///
/// The input is spooled to a temporary file, opened with `password`, stripped
/// of its encryption dictionary and saved to a second temporary file whose
/// contents are returned. Both files are removed when this function returns,
/// on success and on error alike.
///
/// Unencrypted input is re-saved unchanged in content; the password is then
/// irrelevant.
#[instrument(skip_all, fields(bytes_len = bytes.len()))]
pub fn unlock(bytes: &[u8], password: &str) -> Result<UnlockedPdf, PdfError> {
    ensure_pdf_header(bytes)?;

    let mut input = temp_pdf("")?;
    input.write_all(bytes)?;
    input.flush()?;

    // Decrypts every object and drops the trailer's Encrypt entry on success.
    let mut document =
        Document::load_with_password(input.path(), password).map_err(open_error)?;
    if document.is_encrypted() {
        return Err(PdfError::WrongPassword);
    }
    let was_encrypted = document.was_encrypted();

    let pruned = document.prune_objects();
    debug!(was_encrypted, pruned = pruned.len(), "Document opened");
    let page_count = document.get_pages().len();

    let output = temp_pdf("_unlocked")?;
    document
        .save(output.path())
        .map_err(|err| PdfError::Save(err.to_string()))?;
    let unlocked = fs::read(output.path())?;

    info!(
        was_encrypted,
        page_count,
        output_len = unlocked.len(),
        "PDF unlocked"
    );

    Ok(UnlockedPdf {
        bytes: unlocked,
        page_count,
        was_encrypted,
    })
}

fn temp_pdf(suffix: &str) -> Result<NamedTempFile, PdfError> {
    let file = tempfile::Builder::new()
        .prefix("toolbelt-")
        .suffix(&format!("{suffix}.pdf"))
        .tempfile()?;
    Ok(file)
}

pub(crate) fn ensure_pdf_header(bytes: &[u8]) -> Result<(), PdfError> {
    if bytes.starts_with(PDF_MAGIC) {
        Ok(())
    } else {
        Err(PdfError::InvalidDocument("missing %PDF- header".to_string()))
    }
}

/// Split lopdf's load failures into "bad password" and "bad document".
pub(crate) fn open_error(err: lopdf::Error) -> PdfError {
    match err {
        lopdf::Error::InvalidPassword | lopdf::Error::Decryption(_) => PdfError::WrongPassword,
        other => PdfError::InvalidDocument(other.to_string()),
    }
}
