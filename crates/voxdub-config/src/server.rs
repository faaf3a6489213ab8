use std::{net::SocketAddr, path::PathBuf};

use serde::Deserialize;

use crate::{cors::CorsConfig, health::HealthConfig};

/// Largest accepted upload, matching the 50 MiB limit of the browser client
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 50 << 20;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub listen_address: Option<SocketAddr>,
    /// Request body limit for `/api/convert`
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
    /// Directory with a pre-built web client, served for unmatched paths
    #[serde(default)]
    pub static_dir: Option<PathBuf>,
    #[serde(default)]
    pub health: HealthConfig,
    #[serde(default)]
    pub cors: Option<CorsConfig>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_address: None,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            static_dir: None,
            health: HealthConfig::default(),
            cors: None,
        }
    }
}

#[allow(clippy::missing_const_for_fn)]
fn default_max_upload_bytes() -> usize {
    DEFAULT_MAX_UPLOAD_BYTES
}
