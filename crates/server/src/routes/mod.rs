//! API route handlers
//!
//! Every utility lives in its own module and exposes a `group(base)` function
//! returning its routes and descriptor:
//!
//! - `pdf`: password removal and document info
//! - `text`: hashing and binary-to-text encodings
//! - `image`: resize, convert and header inspection
//!
//! `health` holds the liveness probe. The root endpoint and the 404 fallback
//! live here.

pub mod health;
pub mod image;
pub mod pdf;
pub mod text;

use crate::error::{ServerError, ServerResult};
use crate::response::ApiResponse;
use crate::state::ServerState;
use crate::utility::{UtilityGroup, UtilityInfo};
use axum::extract::State;
use axum::routing::{get, MethodRouter};
use serde::Serialize;
use std::sync::Arc;

/// Every utility group, mounted under `prefix`, in registry order.
pub fn utility_groups(prefix: &str) -> Vec<UtilityGroup> {
    vec![
        pdf::group(&format!("{prefix}/pdf")),
        text::group(&format!("{prefix}/text")),
        image::group(&format!("{prefix}/image")),
    ]
}

/// `GET {base}`: the group's own descriptor.
pub(crate) fn info_route(info: &UtilityInfo) -> MethodRouter<Arc<ServerState>> {
    let info = info.clone();
    get(move || async move {
        let message = format!("{} information", info.name);
        ApiResponse::ok(info, message)
    })
}

#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub name: String,
    pub version: String,
    pub description: String,
    pub api_prefix: String,
    pub utilities: Vec<UtilityInfo>,
}

/// API version and base info
///
/// Root endpoint (`GET /`): service identity plus the descriptor of every
/// mounted utility group.
pub async fn api_info(
    State(state): State<Arc<ServerState>>,
) -> ServerResult<ApiResponse<ServiceInfo>> {
    let config = &state.config;
    Ok(ApiResponse::ok(
        ServiceInfo {
            name: config.service_name.clone(),
            version: config.service_version.clone(),
            description: config.service_description.clone(),
            api_prefix: config.api_prefix.clone(),
            utilities: state.utilities.to_vec(),
        },
        format!("Welcome to {}", config.service_name),
    ))
}

/// 404 Not Found handler
pub async fn not_found() -> ServerError {
    ServerError::NotFound
}
