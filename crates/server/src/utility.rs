//! Utility group registry types.

use std::sync::Arc;

use axum::Router;
use serde::{Deserialize, Serialize};

use crate::state::ServerState;

/// One endpoint as advertised in a [`UtilityInfo`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointInfo {
    pub method: String,
    pub path: String,
    pub summary: String,
}

impl EndpointInfo {
    pub fn new(method: &str, path: impl Into<String>, summary: &str) -> Self {
        Self {
            method: method.to_string(),
            path: path.into(),
            summary: summary.to_string(),
        }
    }
}

/// Self-description of a utility group, built once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtilityInfo {
    pub name: String,
    pub description: String,
    pub version: String,
    pub base_path: String,
    pub endpoints: Vec<EndpointInfo>,
}

/// A utility's routes together with its descriptor.
pub struct UtilityGroup {
    pub info: UtilityInfo,
    pub routes: Router<Arc<ServerState>>,
}
