//! `/pdf`: password removal and document inspection.

use crate::error::ServerResult;
use crate::response::ApiResponse;
use crate::state::ServerState;
use crate::upload::UploadForm;
use crate::utility::{EndpointInfo, UtilityGroup, UtilityInfo};
use crate::validation::{pdf_info_command, unlock_command, PdfInfoCommand, UnlockCommand};
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Router;
use pdfkit::PdfInfo;
use std::sync::Arc;
use tokio::task::spawn_blocking;
use tracing::info;

pub fn group(base: &str) -> UtilityGroup {
    let info = UtilityInfo {
        name: "PDF Tools".to_string(),
        description: "Remove password protection from PDF files and inspect documents"
            .to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        base_path: base.to_string(),
        endpoints: vec![
            EndpointInfo::new(
                "POST",
                format!("{base}/unlock"),
                "Unlock a password-protected PDF (multipart: file, password)",
            ),
            EndpointInfo::new(
                "POST",
                format!("{base}/info"),
                "Page count, version and metadata of a PDF (multipart: file)",
            ),
        ],
    };

    let routes = Router::new()
        .route(base, super::info_route(&info))
        .route(&format!("{base}/unlock"), post(unlock))
        .route(&format!("{base}/info"), post(pdf_info));

    UtilityGroup { info, routes }
}

/// Unlock a password-protected PDF.
///
/// On success the body is the unlocked document itself, served as an
/// attachment named `unlocked_<original name>`. Failures use the JSON error
/// envelope: `wrong_password` (403) or `invalid_document` (422).
pub async fn unlock(
    State(state): State<Arc<ServerState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ServerResult<Response> {
    let form = UploadForm::read(multipart?).await?;
    let UnlockCommand { file, password } = unlock_command(form.file, &form.fields, &state.limits)?;

    let filename = format!("unlocked_{}", file.display_name("document.pdf"));
    let input_len = file.bytes.len();
    let unlocked = spawn_blocking(move || pdfkit::unlock(&file.bytes, &password)).await??;

    info!(
        input_len,
        output_len = unlocked.bytes.len(),
        pages = unlocked.page_count,
        was_encrypted = unlocked.was_encrypted,
        "PDF unlocked"
    );

    Ok((
        [
            (CONTENT_TYPE, "application/pdf".to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        unlocked.bytes,
    )
        .into_response())
}

pub async fn pdf_info(
    State(state): State<Arc<ServerState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ServerResult<ApiResponse<PdfInfo>> {
    let form = UploadForm::read(multipart?).await?;
    let PdfInfoCommand {
        file,
        include_metadata,
    } = pdf_info_command(form.file, &form.fields, &state.limits)?;

    let info = spawn_blocking(move || pdfkit::info(&file.bytes, include_metadata)).await??;
    Ok(ApiResponse::ok(info, "PDF information retrieved successfully"))
}
