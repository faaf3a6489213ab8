//! Programmatic configuration builder for integration tests

use std::{net::SocketAddr, path::Path};

use base64::{Engine, engine::general_purpose::STANDARD};
use secrecy::SecretString;
use voxdub_config::{Config, GoogleConfig, HealthConfig, ServerConfig};

use super::mock_google::MockGoogle;

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Minimal defaults with no credentials
    ///
    /// The credential file lives in `dir`, so nothing from the working
    /// directory leaks into a test.
    pub fn new(dir: &Path) -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    health: HealthConfig {
                        enabled: true,
                        ..HealthConfig::default()
                    },
                    ..ServerConfig::default()
                },
                google: GoogleConfig {
                    credentials_file: dir.join("voice-dubbing-app.json"),
                    ..GoogleConfig::default()
                },
                ..Config::default()
            },
        }
    }

    /// Point all three Google services at the mock
    pub fn with_mock(mut self, mock: &MockGoogle) -> Self {
        self.config.google.speech_base_url = Some(mock.url("/speech/v1"));
        self.config.google.translate_base_url = Some(mock.url("/translate/v2"));
        self.config.google.tts_base_url = Some(mock.url("/tts/v1"));
        self
    }

    pub fn with_api_key(mut self, key: &str) -> Self {
        self.config.google.api_key = Some(SecretString::from(key));
        self
    }

    /// Configure the base64 credential blob from a raw document
    pub fn with_credentials_document(mut self, document: &str) -> Self {
        self.config.google.credentials_base64 = Some(SecretString::from(STANDARD.encode(document)));
        self
    }

    /// Configure a raw, already encoded blob
    pub fn with_credentials_blob(mut self, blob: &str) -> Self {
        self.config.google.credentials_base64 = Some(SecretString::from(blob));
        self
    }

    pub fn with_max_upload_bytes(mut self, limit: usize) -> Self {
        self.config.server.max_upload_bytes = limit;
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
