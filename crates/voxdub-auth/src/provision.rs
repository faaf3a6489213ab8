use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use base64::{Engine, engine::general_purpose::STANDARD};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use voxdub_config::GoogleConfig;

use crate::{error::AuthError, google_auth::GoogleAuth, service_account::ServiceAccountKey};

/// Where the credentials in use came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    /// Decoded from the configured base64 blob and written to the credential file
    EncodedBlob,
    /// Read from a credential file that already existed
    ExistingFile,
    /// The configured API key
    ApiKey,
}

/// Credentials resolved at startup
#[derive(Debug)]
pub enum Credentials {
    ServiceAccount {
        key: ServiceAccountKey,
        path: PathBuf,
        source: CredentialSource,
    },
    ApiKey(SecretString),
}

impl Credentials {
    pub const fn source(&self) -> CredentialSource {
        match self {
            Self::ServiceAccount { source, .. } => *source,
            Self::ApiKey(_) => CredentialSource::ApiKey,
        }
    }

    /// Build the request authorizer handed to the service clients
    pub fn into_auth(self, client: Client) -> Result<GoogleAuth, AuthError> {
        match self {
            Self::ServiceAccount { key, .. } => GoogleAuth::service_account(key, client),
            Self::ApiKey(key) => Ok(GoogleAuth::api_key(key)),
        }
    }
}

/// Resolve Google credentials once for the lifetime of the process
///
/// Order: the base64 blob (decoded, validated and written to
/// `credentials_file`), then an existing `credentials_file`, then the API
/// key. Returns `Ok(None)` when none of them is configured.
pub fn provision(config: &GoogleConfig) -> Result<Option<Credentials>, AuthError> {
    if let Some(blob) = non_empty(config.credentials_base64.as_ref()) {
        let document = decode_blob(blob)?;
        let key = ServiceAccountKey::from_json(&document)?;

        write_key_file(&config.credentials_file, &document)?;

        tracing::info!(
            path = %config.credentials_file.display(),
            client_email = %key.client_email,
            "provisioned Google credentials from encoded blob"
        );

        return Ok(Some(Credentials::ServiceAccount {
            key,
            path: config.credentials_file.clone(),
            source: CredentialSource::EncodedBlob,
        }));
    }

    if config.credentials_file.is_file() {
        let document = fs::read_to_string(&config.credentials_file).map_err(|source| AuthError::Io {
            path: config.credentials_file.display().to_string(),
            source,
        })?;
        let key = ServiceAccountKey::from_json(&document)?;

        tracing::info!(
            path = %config.credentials_file.display(),
            client_email = %key.client_email,
            "using existing Google credential file"
        );

        return Ok(Some(Credentials::ServiceAccount {
            key,
            path: config.credentials_file.clone(),
            source: CredentialSource::ExistingFile,
        }));
    }

    if let Some(key) = non_empty(config.api_key.as_ref()) {
        tracing::info!("using Google API key");
        return Ok(Some(Credentials::ApiKey(key.clone())));
    }

    tracing::warn!(
        path = %config.credentials_file.display(),
        "no Google credentials configured, conversions will fail"
    );

    Ok(None)
}

fn non_empty(secret: Option<&SecretString>) -> Option<&SecretString> {
    secret.filter(|value| !value.expose_secret().trim().is_empty())
}

fn decode_blob(blob: &SecretString) -> Result<String, AuthError> {
    let bytes = STANDARD
        .decode(blob.expose_secret().trim())
        .map_err(|e| AuthError::Decode(e.to_string()))?;

    String::from_utf8(bytes).map_err(|e| AuthError::Decode(e.to_string()))
}

fn write_key_file(path: &Path, document: &str) -> Result<(), AuthError> {
    let io_error = |source| AuthError::Io {
        path: path.display().to_string(),
        source,
    };

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error)?;
    }

    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path).map_err(io_error)?;
    file.write_all(document.as_bytes()).map_err(io_error)?;

    Ok(())
}
