#![allow(clippy::must_use_candidate)]

pub mod cors;
mod env;
pub mod google;
pub mod health;
mod loader;
pub mod pipeline;
pub mod server;
pub mod telemetry;

use serde::Deserialize;

pub use cors::*;
pub use env::ExpandError;
pub use google::*;
pub use health::*;
pub use pipeline::*;
pub use server::*;
pub use telemetry::{ExportProtocol, ExporterConfig, LogFormat, TelemetryConfig};

/// Top-level voxdub configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Google Cloud credentials and endpoints
    #[serde(default)]
    pub google: GoogleConfig,
    /// Languages, voice and audio settings of the dubbing pipeline
    #[serde(default)]
    pub pipeline: PipelineConfig,
    /// Telemetry configuration
    #[serde(default)]
    pub telemetry: Option<TelemetryConfig>,
}
