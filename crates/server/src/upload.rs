//! Multipart form reading.

use std::collections::HashMap;

use axum::extract::Multipart;
use tracing::debug;

use crate::error::ServerResult;

const FILE_FIELD: &str = "file";

/// A file part of a multipart request, held in memory for one handler call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
    pub filename: Option<String>,
}

impl UploadedFile {
    /// Lowercased MIME type without parameters (`image/png; q=1` -> `image/png`).
    pub fn essence(&self) -> Option<String> {
        self.content_type
            .as_deref()
            .and_then(|ct| ct.split(';').next())
            .map(|ct| ct.trim().to_ascii_lowercase())
            .filter(|ct| !ct.is_empty())
    }

    /// Client-supplied file name stripped of any path components.
    pub fn display_name(&self, fallback: &str) -> String {
        self.filename
            .as_deref()
            .and_then(|name| name.rsplit(['/', '\\']).next())
            .map(|name| {
                name.chars()
                    .filter(|c| *c != '"' && !c.is_control())
                    .collect::<String>()
            })
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| fallback.to_string())
    }
}

/// Everything a multipart request carried: the `file` part plus text fields.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub file: Option<UploadedFile>,
    pub fields: HashMap<String, String>,
}

impl UploadForm {
    /// Drain a multipart stream. Parts without a name are skipped.
    pub async fn read(mut multipart: Multipart) -> ServerResult<Self> {
        let mut form = UploadForm::default();

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            if name == FILE_FIELD {
                let filename = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await?;
                debug!(
                    filename = filename.as_deref().unwrap_or("-"),
                    size = bytes.len(),
                    "Received upload"
                );
                form.file = Some(UploadedFile {
                    bytes: bytes.to_vec(),
                    content_type,
                    filename,
                });
            } else {
                let value = field.text().await?;
                form.fields.insert(name, value);
            }
        }

        Ok(form)
    }
}
