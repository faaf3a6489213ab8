use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use stt::SttError;
use thiserror::Error;
use translate::TranslateError;
use tts::TtsError;

use crate::pipeline::Stage;

/// Why a conversion request failed
///
/// Every variant answers with HTTP 500. The body only ever carries the
/// category message from [`ConvertError::client_message`]; the details stay
/// in the server log.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// No credentials were configured at startup
    #[error("Google credentials missing")]
    CredentialsMissing,

    /// Credentials were configured but could not be set up
    #[error("Failed to setup Google credentials: {0}")]
    CredentialsFailed(String),

    /// The multipart body was unreadable or had no `audio` file
    #[error("Upload failed: {0}")]
    Upload(String),

    /// The recognizer returned nothing usable
    #[error("Transcription produced no text")]
    EmptyTranscription,

    #[error("Transcription failed: {0}")]
    Transcription(#[source] SttError),

    #[error("Translation failed: {0}")]
    Translation(#[source] TranslateError),

    #[error("Synthesis failed: {0}")]
    Synthesis(#[source] TtsError),
}

impl ConvertError {
    /// Message that is safe to expose to API consumers
    pub const fn client_message(&self) -> &'static str {
        match self {
            Self::CredentialsMissing => "Google credentials missing",
            Self::CredentialsFailed(_) => "Failed to setup Google credentials",
            Self::Upload(_) => "File upload failed.",
            Self::EmptyTranscription | Self::Transcription(_) | Self::Translation(_) | Self::Synthesis(_) => {
                "Audio conversion failed. Try again."
            }
        }
    }

    /// Last stage the request entered before failing
    pub const fn stage(&self) -> Stage {
        match self {
            Self::CredentialsMissing | Self::CredentialsFailed(_) | Self::Upload(_) => Stage::Received,
            Self::EmptyTranscription | Self::Transcription(_) => Stage::Transcribing,
            Self::Translation(_) => Stage::Translating,
            Self::Synthesis(_) => Stage::Synthesizing,
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: &'static str,
}

impl IntoResponse for ConvertError {
    fn into_response(self) -> Response {
        tracing::error!(stage = %Stage::Failed, failed_in = %self.stage(), error = %self, "conversion failed");

        let body = ErrorResponse {
            error: self.client_message(),
        };

        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use http_body_util::BodyExt;

    use super::*;

    async fn body_json(error: ConvertError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();

        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn credentials_missing_body() {
        let (status, body) = body_json(ConvertError::CredentialsMissing).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, serde_json::json!({"error": "Google credentials missing"}));
    }

    #[tokio::test]
    async fn provider_details_are_not_exposed() {
        let error = ConvertError::Translation(TranslateError::ProviderApiError {
            status: 503,
            message: "backend projects/secret-project unavailable".to_string(),
        });

        let (status, body) = body_json(error).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, serde_json::json!({"error": "Audio conversion failed. Try again."}));
    }

    #[test]
    fn categories() {
        assert_eq!(
            ConvertError::CredentialsFailed("bad blob".into()).client_message(),
            "Failed to setup Google credentials"
        );
        assert_eq!(ConvertError::Upload("no audio".into()).client_message(), "File upload failed.");
        assert_eq!(
            ConvertError::EmptyTranscription.client_message(),
            "Audio conversion failed. Try again."
        );
        assert_eq!(
            ConvertError::Synthesis(TtsError::ConnectionError("reset".into())).stage(),
            Stage::Synthesizing
        );
    }
}
