use std::path::Path;

use secrecy::ExposeSecret;

use crate::{Config, SUPPORTED_SAMPLE_RATES};

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, a placeholder cannot be
    /// expanded, the TOML is malformed, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::from_toml_str(&raw)
    }

    /// Parse and validate configuration from TOML text
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`], minus the file access
    pub fn from_toml_str(raw: &str) -> anyhow::Result<Self> {
        let expanded = crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid setting
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_pipeline()?;
        self.validate_google()?;
        Ok(())
    }

    fn validate_pipeline(&self) -> anyhow::Result<()> {
        let pipeline = &self.pipeline;

        for (field, value) in [
            ("source_language", &pipeline.source_language),
            ("target_language", &pipeline.target_language),
            ("voice_language", &pipeline.voice_language),
        ] {
            if value.trim().is_empty() {
                anyhow::bail!("pipeline.{field} must not be empty");
            }
        }

        if !SUPPORTED_SAMPLE_RATES.contains(&pipeline.sample_rate_hertz) {
            anyhow::bail!(
                "pipeline.sample_rate_hertz must be between 8000 and 48000, got {}",
                pipeline.sample_rate_hertz
            );
        }

        Ok(())
    }

    fn validate_google(&self) -> anyhow::Result<()> {
        let google = &self.google;

        if google.credentials_file.as_os_str().is_empty() {
            anyhow::bail!("google.credentials_file must not be empty");
        }

        if google.request_timeout.is_zero() {
            anyhow::bail!("google.request_timeout must be greater than zero");
        }

        if google
            .api_key
            .as_ref()
            .is_some_and(|key| key.expose_secret().trim().is_empty())
        {
            tracing::debug!("google.api_key is set but empty, it will be ignored");
        }

        Ok(())
    }
}
