//! Toolbelt Server - one HTTP API for small PDF, text and image utilities
//!
//! Each utility is an independent, stateless group of endpoints mounted under
//! a versioned prefix (`/api/v1` by default):
//!
//! - **PDF**: remove password protection, inspect documents
//! - **Text**: hash with MD5/SHA-1/SHA-2, base64/base32/base16 encode and decode
//! - **Image**: resize, convert between formats, read header information
//!
//! Successful JSON responses are wrapped as `{success, data, message}`; every
//! failure as `{success: false, message, error: {kind, message, field}}`.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     server::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # API Endpoints
//!
//! - `GET /` - Service information and utility descriptors
//! - `GET /health` - Liveness probe
//! - `GET /api/v1/{pdf,text,image}` - Utility descriptor
//! - `POST /api/v1/pdf/unlock` - Unlock a PDF (multipart)
//! - `POST /api/v1/pdf/info` - PDF information (multipart)
//! - `POST /api/v1/text/{hash,encode,decode}` - Text operations
//! - `GET /api/v1/text/{algorithms,encodings}` - Allow-lists
//! - `POST /api/v1/image/{resize,convert,info}` - Image operations (base64 JSON)
//! - `POST /api/v1/image/{resize,convert,info}/file` - Image operations (multipart)
//! - `GET /api/v1/image/formats` - Allow-list

pub mod config;
pub mod error;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;
pub mod upload;
pub mod utility;
pub mod validation;

pub use config::{Limits, ServerConfig};
pub use error::{ErrorKind, ServerError, ServerResult};
pub use response::ApiResponse;
pub use server::{build_router, start_server};
pub use state::ServerState;
