use thiserror::Error;
use voxdub_auth::AuthError;

pub type Result<T> = std::result::Result<T, SttError>;

/// Speech recognition errors
#[derive(Debug, Error)]
pub enum SttError {
    /// The service rejected the request (bad encoding, unsupported rate, ...)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The service rejected our credentials
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Provider API returned an error
    #[error("Provider API error ({status}): {message}")]
    ProviderApiError { status: u16, message: String },

    /// Network or connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Credentials could not be attached to the request
    #[error("Credential error: {0}")]
    Auth(#[from] AuthError),

    /// Internal error
    /// If Some(message), it describes an unexpected provider payload
    #[error("Internal error")]
    InternalError(Option<String>),
}
