//! Error types produced by the pdf crate.
//!
//! | Error | Category | HTTP |
//! |-------|----------|------|
//! | [`WrongPassword`](PdfError::WrongPassword) | Client | 403 |
//! | [`InvalidDocument`](PdfError::InvalidDocument) | Client | 422 |
//! | [`Save`](PdfError::Save) | Internal | 500 |
//! | [`Io`](PdfError::Io) | Internal | 500 |

use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PdfError {
    /// The document is encrypted and the supplied password does not open it.
    #[error("incorrect password for encrypted PDF")]
    WrongPassword,

    /// Input is not a PDF, or is too damaged to parse.
    #[error("invalid PDF document: {0}")]
    InvalidDocument(String),

    /// Writing the unlocked document failed.
    #[error("failed to save PDF: {0}")]
    Save(String),

    /// Temporary file handling failed.
    #[error("temporary file error: {0}")]
    Io(#[from] std::io::Error),
}
