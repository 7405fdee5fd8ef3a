use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

const MB: usize = 1024 * 1024;

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server bind address
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Prefix every utility group is mounted under
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,

    #[serde(default = "default_service_name")]
    pub service_name: String,

    #[serde(default = "default_service_version")]
    pub service_version: String,

    #[serde(default = "default_service_description")]
    pub service_description: String,

    /// Largest accepted uploaded or decoded file, in MB
    #[serde(default = "default_max_upload_size_mb")]
    pub max_upload_size_mb: usize,

    /// Maximum request body size in MB
    #[serde(default = "default_max_body_size_mb")]
    pub max_body_size_mb: usize,

    /// Largest accepted text input, in bytes
    #[serde(default = "default_max_text_bytes")]
    pub max_text_bytes: usize,

    /// Largest accepted resize target on either side, in pixels
    #[serde(default = "default_max_image_dimension")]
    pub max_image_dimension: u32,

    /// Enable CORS
    #[serde(default = "default_true")]
    pub enable_cors: bool,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Input limits enforced by request validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub max_text_bytes: usize,
    pub max_upload_bytes: usize,
    pub max_image_dimension: u32,
}

impl Default for Limits {
    fn default() -> Self {
        ServerConfig::default().limits()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            port: default_port(),
            api_prefix: default_api_prefix(),
            service_name: default_service_name(),
            service_version: default_service_version(),
            service_description: default_service_description(),
            max_upload_size_mb: default_max_upload_size_mb(),
            max_body_size_mb: default_max_body_size_mb(),
            max_text_bytes: default_max_text_bytes(),
            max_image_dimension: default_max_image_dimension(),
            enable_cors: default_true(),
            log_level: default_log_level(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from `.env`, an optional `toolbelt` config file and
    /// `TOOLBELT__*` environment variables, in increasing precedence.
    ///
    /// A bare `PORT` variable is honoured as a default that any other source
    /// overrides.
    pub fn load() -> anyhow::Result<Self> {
        // A missing .env file is the common case.
        let _ = dotenvy::dotenv();

        let mut builder = config::Config::builder();
        if let Some(port) = std::env::var("PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            builder = builder.set_default("port", i64::from(port))?;
        }

        let builder = builder
            .add_source(config::File::with_name("toolbelt").required(false))
            .add_source(
                config::Environment::with_prefix("TOOLBELT")
                    .separator("__")
                    .try_parsing(true),
            );

        let config: ServerConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the router cannot be built from.
    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.api_prefix.starts_with('/') || self.api_prefix.ends_with('/') {
            anyhow::bail!(
                "api_prefix must start with '/' and must not end with '/', got {:?}",
                self.api_prefix
            );
        }
        if self.max_upload_size_mb == 0 || self.max_body_size_mb == 0 {
            anyhow::bail!("upload and body size limits must be positive");
        }
        if self.max_text_bytes == 0 || self.max_image_dimension == 0 {
            anyhow::bail!("text and image dimension limits must be positive");
        }
        Ok(())
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr_str = format!("{}:{}", self.bind_addr, self.port);
        Ok(addr_str.parse()?)
    }

    /// Get max body size in bytes
    pub fn max_body_size(&self) -> usize {
        self.max_body_size_mb * MB
    }

    pub fn limits(&self) -> Limits {
        Limits {
            max_text_bytes: self.max_text_bytes,
            max_upload_bytes: self.max_upload_size_mb * MB,
            max_image_dimension: self.max_image_dimension,
        }
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    4001
}

fn default_api_prefix() -> String {
    "/api/v1".to_string()
}

fn default_service_name() -> String {
    "Toolbelt Utilities API".to_string()
}

fn default_service_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_service_description() -> String {
    "Small, independent utilities for PDFs, text and images behind one HTTP API".to_string()
}

fn default_max_upload_size_mb() -> usize {
    10
}

fn default_max_body_size_mb() -> usize {
    16
}

fn default_max_text_bytes() -> usize {
    MB
}

fn default_max_image_dimension() -> u32 {
    10_000
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.port, 4001);
        assert_eq!(cfg.api_prefix, "/api/v1");
        assert_eq!(cfg.max_upload_size_mb, 10);
        assert_eq!(cfg.max_text_bytes, 1024 * 1024);
        assert_eq!(cfg.max_image_dimension, 10_000);
        assert!(cfg.enable_cors);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_socket_addr() {
        let cfg = ServerConfig::default();
        let addr = cfg.socket_addr().unwrap();
        assert_eq!(addr.port(), 4001);
    }

    #[test]
    fn test_limits_are_in_bytes() {
        let cfg = ServerConfig {
            max_upload_size_mb: 2,
            ..ServerConfig::default()
        };
        assert_eq!(cfg.limits().max_upload_bytes, 2 * 1024 * 1024);
        assert_eq!(cfg.max_body_size(), 16 * 1024 * 1024);
    }

    #[test]
    fn test_validate_rejects_bad_prefix() {
        for prefix in ["api/v1", "/api/v1/", ""] {
            let cfg = ServerConfig {
                api_prefix: prefix.to_string(),
                ..ServerConfig::default()
            };
            assert!(cfg.validate().is_err(), "{prefix:?}");
        }
    }

    #[test]
    fn test_validate_rejects_zero_limits() {
        let cfg = ServerConfig {
            max_text_bytes: 0,
            ..ServerConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let cfg: ServerConfig =
            serde_json::from_str(r#"{"port": 9000, "api_prefix": "/tools"}"#).unwrap();
        assert_eq!(cfg.port, 9000);
        assert_eq!(cfg.api_prefix, "/tools");
        assert_eq!(cfg.service_name, "Toolbelt Utilities API");
    }
}
