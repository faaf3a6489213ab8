use std::sync::Arc;

use stt::GoogleSpeechProvider;
use translate::GoogleTranslateProvider;
use tts::GoogleTtsProvider;
use voxdub_auth::AuthError;
use voxdub_config::Config;
use voxdub_pipeline::{ConversionPipeline, ConvertError};

/// What `/api/convert` can do, decided once at startup
///
/// The server starts even without usable credentials so that the failure
/// surfaces on every conversion request instead of as a crash loop.
#[derive(Clone)]
pub enum Conversion {
    Ready(ConversionPipeline),
    CredentialsMissing,
    CredentialsFailed(Arc<str>),
}

impl Conversion {
    /// Provision credentials and wire the Google clients into a pipeline
    ///
    /// # Errors
    ///
    /// Returns an error only if the HTTP client cannot be built; credential
    /// problems are captured in the returned state.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let client = voxdub_auth::http_client(config.google.request_timeout)?;

        let credentials = match voxdub_auth::provision(&config.google) {
            Ok(Some(credentials)) => credentials,
            Ok(None) => return Ok(Self::CredentialsMissing),
            Err(e) => return Ok(Self::failed(&e)),
        };

        let source = credentials.source();
        let auth = match credentials.into_auth(client.clone()) {
            Ok(auth) => auth,
            Err(e) => return Ok(Self::failed(&e)),
        };

        tracing::info!(auth = %auth.describe(), ?source, "Google credentials ready");

        let google = &config.google;
        let stt = GoogleSpeechProvider::new(
            "google-speech".to_string(),
            client.clone(),
            auth.clone(),
            google.speech_base_url.clone(),
        );
        let translator = GoogleTranslateProvider::new(
            "google-translate".to_string(),
            client.clone(),
            auth.clone(),
            google.translate_base_url.clone(),
        );
        let tts = GoogleTtsProvider::new("google-tts".to_string(), client, auth, google.tts_base_url.clone());

        Ok(Self::Ready(ConversionPipeline::new(
            Arc::new(stt),
            Arc::new(translator),
            Arc::new(tts),
            config.pipeline.clone(),
        )))
    }

    fn failed(error: &AuthError) -> Self {
        tracing::error!(error = %error, "failed to set up Google credentials");
        Self::CredentialsFailed(error.to_string().into())
    }

    /// The pipeline, or the credential error every request should fail with
    pub fn pipeline(&self) -> Result<&ConversionPipeline, ConvertError> {
        match self {
            Self::Ready(pipeline) => Ok(pipeline),
            Self::CredentialsMissing => Err(ConvertError::CredentialsMissing),
            Self::CredentialsFailed(reason) => Err(ConvertError::CredentialsFailed(reason.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use base64::{Engine, engine::general_purpose::STANDARD};
    use secrecy::SecretString;
    use voxdub_config::GoogleConfig;

    use super::*;

    fn config(google: GoogleConfig) -> Config {
        Config {
            google,
            ..Config::default()
        }
    }

    #[test]
    fn nothing_configured_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        let conversion = Conversion::from_config(&config(GoogleConfig {
            credentials_file: dir.path().join("absent.json"),
            ..GoogleConfig::default()
        }))
        .unwrap();

        assert!(matches!(conversion.pipeline(), Err(ConvertError::CredentialsMissing)));
    }

    #[test]
    fn undecodable_blob_is_failed() {
        let dir = tempfile::tempdir().unwrap();
        let conversion = Conversion::from_config(&config(GoogleConfig {
            credentials_base64: Some(SecretString::from(STANDARD.encode("not json"))),
            credentials_file: dir.path().join("key.json"),
            ..GoogleConfig::default()
        }))
        .unwrap();

        assert!(matches!(conversion.pipeline(), Err(ConvertError::CredentialsFailed(_))));
    }

    #[test]
    fn api_key_is_ready() {
        let dir = tempfile::tempdir().unwrap();
        let conversion = Conversion::from_config(&config(GoogleConfig {
            credentials_file: dir.path().join("absent.json"),
            api_key: Some(SecretString::from("key")),
            ..GoogleConfig::default()
        }))
        .unwrap();

        assert!(conversion.pipeline().is_ok());
    }
}
