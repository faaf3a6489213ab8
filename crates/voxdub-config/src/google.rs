use std::{path::PathBuf, time::Duration};

use secrecy::SecretString;
use serde::Deserialize;

/// Google Cloud access configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GoogleConfig {
    /// Base64-encoded service-account JSON document
    ///
    /// Usually `{{ env.GOOGLE_APPLICATION_CREDENTIALS_BASE64 | default("") }}`.
    /// An empty value counts as absent.
    #[serde(default)]
    pub credentials_base64: Option<SecretString>,
    /// Where the decoded service-account document is written at startup,
    /// and where an existing one is looked up when no blob is configured
    #[serde(default = "default_credentials_file")]
    pub credentials_file: PathBuf,
    /// API key used when no service-account document is available
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Speech-to-Text base URL override
    #[serde(default)]
    pub speech_base_url: Option<String>,
    /// Translation base URL override
    #[serde(default)]
    pub translate_base_url: Option<String>,
    /// Text-to-Speech base URL override
    #[serde(default)]
    pub tts_base_url: Option<String>,
    /// Upper bound for a single upstream call
    #[serde(
        default = "default_request_timeout",
        deserialize_with = "duration_str::deserialize_duration"
    )]
    pub request_timeout: Duration,
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            credentials_base64: None,
            credentials_file: default_credentials_file(),
            api_key: None,
            speech_base_url: None,
            translate_base_url: None,
            tts_base_url: None,
            request_timeout: default_request_timeout(),
        }
    }
}

fn default_credentials_file() -> PathBuf {
    PathBuf::from("voice-dubbing-app.json")
}

#[allow(clippy::missing_const_for_fn)]
fn default_request_timeout() -> Duration {
    Duration::from_secs(120)
}
