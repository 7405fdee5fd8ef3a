use crate::config::{Limits, ServerConfig};
use crate::utility::UtilityInfo;
use std::sync::Arc;
use std::time::Instant;

/// Shared application state. Read-only after startup.
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Validation limits derived from the configuration
    pub limits: Limits,

    /// Descriptors of every mounted utility group
    pub utilities: Arc<[UtilityInfo]>,

    pub started_at: Instant,
}

impl ServerState {
    pub fn new(config: ServerConfig, utilities: Vec<UtilityInfo>) -> Self {
        Self {
            limits: config.limits(),
            config: Arc::new(config),
            utilities: utilities.into(),
            started_at: Instant::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
