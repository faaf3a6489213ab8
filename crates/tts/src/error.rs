use thiserror::Error;
use voxdub_auth::AuthError;

pub type Result<T> = std::result::Result<T, TtsError>;

/// Speech synthesis errors
#[derive(Debug, Error)]
pub enum TtsError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Provider API error ({status}): {message}")]
    ProviderApiError { status: u16, message: String },

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Credential error: {0}")]
    Auth(#[from] AuthError),

    #[error("Internal error")]
    InternalError(Option<String>),
}
