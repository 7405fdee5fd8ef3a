//! `/image`: resize, convert and inspect images sent as base64 JSON or as
//! multipart uploads.

use crate::error::ServerResult;
use crate::response::{ApiJson, ApiResponse};
use crate::state::ServerState;
use crate::upload::UploadForm;
use crate::utility::{EndpointInfo, UtilityGroup, UtilityInfo};
use crate::validation::{
    ensure_image, require_file, ConvertCommand, ImageParams, ImageRequest, InfoCommand,
    ResizeCommand,
};
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::routing::{get, post};
use axum::Router;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use imaging::{EncodedImage, ImageFormat};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::task::spawn_blocking;
use tracing::info;

/// Transformed image, base64 encoded.
#[derive(Debug, Serialize, Deserialize)]
pub struct ImageResult {
    pub result: String,
    pub format: ImageFormat,
    /// Encoded size in bytes
    pub size: usize,
    pub width: u32,
    pub height: u32,
}

impl From<EncodedImage> for ImageResult {
    fn from(image: EncodedImage) -> Self {
        Self {
            size: image.bytes.len(),
            result: STANDARD.encode(&image.bytes),
            format: image.format,
            width: image.width,
            height: image.height,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ImageInfoResponse {
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
    /// `"{width}x{height}"`
    pub dimensions: String,
    pub mode: String,
    /// Bits per pixel across all channels
    pub bit_depth: u16,
    pub size: usize,
}

impl From<imaging::ImageInfo> for ImageInfoResponse {
    fn from(info: imaging::ImageInfo) -> Self {
        Self {
            dimensions: info.dimensions(),
            format: info.format,
            width: info.width,
            height: info.height,
            mode: info.mode,
            bit_depth: info.bits_per_pixel,
            size: info.size,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FormatList {
    pub formats: &'static [&'static str],
}

pub fn group(base: &str) -> UtilityGroup {
    let info = UtilityInfo {
        name: "Image Utilities".to_string(),
        description: "Resize images, convert between formats and read image headers"
            .to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        base_path: base.to_string(),
        endpoints: vec![
            EndpointInfo::new("POST", format!("{base}/resize"), "Resize a base64 image"),
            EndpointInfo::new("POST", format!("{base}/convert"), "Convert a base64 image"),
            EndpointInfo::new("POST", format!("{base}/info"), "Inspect a base64 image"),
            EndpointInfo::new("POST", format!("{base}/resize/file"), "Resize an uploaded image"),
            EndpointInfo::new("POST", format!("{base}/convert/file"), "Convert an uploaded image"),
            EndpointInfo::new("POST", format!("{base}/info/file"), "Inspect an uploaded image"),
            EndpointInfo::new("GET", format!("{base}/formats"), "Supported image formats"),
        ],
    };

    let routes = Router::new()
        .route(base, super::info_route(&info))
        .route(&format!("{base}/resize"), post(resize))
        .route(&format!("{base}/convert"), post(convert))
        .route(&format!("{base}/info"), post(image_info))
        .route(&format!("{base}/resize/file"), post(resize_file))
        .route(&format!("{base}/convert/file"), post(convert_file))
        .route(&format!("{base}/info/file"), post(image_info_file))
        .route(&format!("{base}/formats"), get(formats));

    UtilityGroup { info, routes }
}

/// Resize to `width` x `height`, fitting inside the box unless
/// `maintain_aspect_ratio` is false.
///
/// ```json
/// {
///   "image_data": "iVBORw0KGgo...",
///   "width": 100,
///   "height": 100,
///   "format": "JPEG"
/// }
/// ```
pub async fn resize(
    State(state): State<Arc<ServerState>>,
    ApiJson(request): ApiJson<ImageRequest>,
) -> ServerResult<ApiResponse<ImageResult>> {
    run_resize(request.into_resize(&state.limits)?).await
}

pub async fn convert(
    State(state): State<Arc<ServerState>>,
    ApiJson(request): ApiJson<ImageRequest>,
) -> ServerResult<ApiResponse<ImageResult>> {
    run_convert(request.into_convert(&state.limits)?).await
}

pub async fn image_info(
    State(state): State<Arc<ServerState>>,
    ApiJson(request): ApiJson<ImageRequest>,
) -> ServerResult<ApiResponse<ImageInfoResponse>> {
    run_info(request.into_info(&state.limits)?).await
}

pub async fn resize_file(
    State(state): State<Arc<ServerState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ServerResult<ApiResponse<ImageResult>> {
    let (image, params) = read_image_form(&state, multipart?).await?;
    run_resize(params.resize(image, &state.limits)?).await
}

pub async fn convert_file(
    State(state): State<Arc<ServerState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ServerResult<ApiResponse<ImageResult>> {
    let (image, params) = read_image_form(&state, multipart?).await?;
    run_convert(params.convert(image)?).await
}

pub async fn image_info_file(
    State(state): State<Arc<ServerState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ServerResult<ApiResponse<ImageInfoResponse>> {
    let (image, _) = read_image_form(&state, multipart?).await?;
    run_info(InfoCommand { image }).await
}

pub async fn formats() -> ApiResponse<FormatList> {
    ApiResponse::ok(
        FormatList {
            formats: imaging::supported_formats(),
        },
        "Supported image formats",
    )
}

async fn read_image_form(
    state: &ServerState,
    multipart: Multipart,
) -> ServerResult<(Vec<u8>, ImageParams)> {
    let form = UploadForm::read(multipart).await?;
    let file = require_file(form.file, &state.limits)?;
    ensure_image(&file)?;
    let params = ImageParams::from_fields(&form.fields)?;
    Ok((file.bytes, params))
}

async fn run_resize(command: ResizeCommand) -> ServerResult<ApiResponse<ImageResult>> {
    let ResizeCommand { image, options } = command;
    let resized = spawn_blocking(move || imaging::resize(&image, &options)).await??;
    info!(
        width = resized.width,
        height = resized.height,
        format = %resized.format,
        "Image resized"
    );
    Ok(ApiResponse::ok(
        ImageResult::from(resized),
        "Image resized successfully",
    ))
}

async fn run_convert(command: ConvertCommand) -> ServerResult<ApiResponse<ImageResult>> {
    let ConvertCommand { image, target } = command;
    let converted = spawn_blocking(move || imaging::convert(&image, target)).await??;
    info!(format = %converted.format, size = converted.bytes.len(), "Image converted");
    Ok(ApiResponse::ok(
        ImageResult::from(converted),
        format!("Image converted to {target} successfully"),
    ))
}

async fn run_info(command: InfoCommand) -> ServerResult<ApiResponse<ImageInfoResponse>> {
    let InfoCommand { image } = command;
    let info = spawn_blocking(move || imaging::info(&image)).await??;
    Ok(ApiResponse::ok(
        ImageInfoResponse::from(info),
        "Image information retrieved successfully",
    ))
}
