//! `/text`: hashing and binary-to-text encodings.

use crate::error::ServerResult;
use crate::response::{ApiJson, ApiResponse};
use crate::state::ServerState;
use crate::utility::{EndpointInfo, UtilityGroup, UtilityInfo};
use crate::validation::{EncodeRequest, HashRequest};
use axum::extract::State;
use axum::routing::{get, post};
use axum::Router;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Serialize, Deserialize)]
pub struct HashResponse {
    pub result: String,
    /// Uppercase algorithm label, e.g. `SHA256`
    pub algorithm: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CodecResponse {
    pub result: String,
    /// Uppercase encoding label, e.g. `BASE64`
    pub encoding: String,
}

#[derive(Debug, Serialize)]
pub struct AlgorithmList {
    pub algorithms: &'static [&'static str],
}

#[derive(Debug, Serialize)]
pub struct EncodingList {
    pub encodings: &'static [&'static str],
}

pub fn group(base: &str) -> UtilityGroup {
    let info = UtilityInfo {
        name: "Text Utilities".to_string(),
        description: "Hash text and convert it to and from base64, base32 and base16".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        base_path: base.to_string(),
        endpoints: vec![
            EndpointInfo::new("POST", format!("{base}/hash"), "Hex digest of text"),
            EndpointInfo::new("POST", format!("{base}/encode"), "Encode text"),
            EndpointInfo::new("POST", format!("{base}/decode"), "Decode text"),
            EndpointInfo::new("GET", format!("{base}/algorithms"), "Supported hash algorithms"),
            EndpointInfo::new("GET", format!("{base}/encodings"), "Supported encodings"),
        ],
    };

    let routes = Router::new()
        .route(base, super::info_route(&info))
        .route(&format!("{base}/hash"), post(hash))
        .route(&format!("{base}/encode"), post(encode))
        .route(&format!("{base}/decode"), post(decode))
        .route(&format!("{base}/algorithms"), get(algorithms))
        .route(&format!("{base}/encodings"), get(encodings));

    UtilityGroup { info, routes }
}

/// Hash text with the requested algorithm (default `md5`).
///
/// ```json
/// // Request
/// { "text": "hello", "algorithm": "sha256" }
///
/// // Response data
/// { "result": "2cf24dba...", "algorithm": "SHA256" }
/// ```
pub async fn hash(
    State(state): State<Arc<ServerState>>,
    ApiJson(request): ApiJson<HashRequest>,
) -> ServerResult<ApiResponse<HashResponse>> {
    let command = request.validate(&state.limits)?;
    let result = ::text::hash_text(&command.text, command.algorithm);

    Ok(ApiResponse::ok(
        HashResponse {
            result,
            algorithm: command.algorithm.label(),
        },
        "Text hashed successfully",
    ))
}

pub async fn encode(
    State(state): State<Arc<ServerState>>,
    ApiJson(request): ApiJson<EncodeRequest>,
) -> ServerResult<ApiResponse<CodecResponse>> {
    let command = request.validate(&state.limits)?;
    let result = ::text::encode(&command.text, command.encoding);

    Ok(ApiResponse::ok(
        CodecResponse {
            result,
            encoding: command.encoding.label(),
        },
        "Text encoded successfully",
    ))
}

/// Decode text; malformed input or non-UTF-8 output is a `decode_error`.
pub async fn decode(
    State(state): State<Arc<ServerState>>,
    ApiJson(request): ApiJson<EncodeRequest>,
) -> ServerResult<ApiResponse<CodecResponse>> {
    let command = request.validate(&state.limits)?;
    let result = ::text::decode(&command.text, command.encoding)?;

    Ok(ApiResponse::ok(
        CodecResponse {
            result,
            encoding: command.encoding.label(),
        },
        "Text decoded successfully",
    ))
}

pub async fn algorithms() -> ApiResponse<AlgorithmList> {
    ApiResponse::ok(
        AlgorithmList {
            algorithms: ::text::supported_algorithms(),
        },
        "Supported hash algorithms",
    )
}

pub async fn encodings() -> ApiResponse<EncodingList> {
    ApiResponse::ok(
        EncodingList {
            encodings: ::text::supported_encodings(),
        },
        "Supported encodings",
    )
}
