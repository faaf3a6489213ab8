use thiserror::Error;
use voxdub_auth::AuthError;

pub type Result<T> = std::result::Result<T, TranslateError>;

/// Translation errors
#[derive(Debug, Error)]
pub enum TranslateError {
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

    /// The service answered successfully but without a translation
    #[error("Provider returned no translation")]
    EmptyResponse,

    #[error("Internal error")]
    InternalError(Option<String>),
}
