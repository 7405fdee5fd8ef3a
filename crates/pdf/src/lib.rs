//! Toolbelt PDF utilities
//!
//! Password removal and inspection for PDF documents, backed by `lopdf`.
//!
//! - [`unlock`] opens an encrypted document with the user's password and
//!   writes it back out without its encryption dictionary.
//! - [`info`] reports page count, version, encryption state and, optionally,
//!   the document information dictionary.
//!
//! Unlocking works through uniquely named temporary files that are removed
//! when the call returns, whatever the outcome.
//!
//! ```no_run
//! # fn demo(upload: &[u8]) -> Result<(), pdfkit::PdfError> {
//! match pdfkit::unlock(upload, "secret") {
//!     Ok(unlocked) => println!("{} pages", unlocked.page_count),
//!     Err(pdfkit::PdfError::WrongPassword) => println!("try again"),
//!     Err(other) => return Err(other),
//! }
//! # Ok(())
//! # }
//! ```

mod error;
mod info;
mod unlock;

pub use crate::error::PdfError;
pub use crate::info::{info, PdfInfo};
pub use crate::unlock::{unlock, UnlockedPdf};
