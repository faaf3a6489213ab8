use thiserror::Error;

/// Credential provisioning and token acquisition failures
#[derive(Debug, Error)]
pub enum AuthError {
    /// The configured blob is not valid base64 or not UTF-8
    #[error("credential blob could not be decoded: {0}")]
    Decode(String),

    /// The document is not a usable service-account key
    #[error("invalid service account key: {0}")]
    InvalidKey(String),

    /// Reading or writing the credential file failed
    #[error("credential file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Signing the token assertion failed
    #[error("failed to sign token assertion: {0}")]
    Signing(String),

    /// The token endpoint could not be reached or rejected the assertion
    #[error("token exchange failed: {0}")]
    TokenExchange(String),
}
