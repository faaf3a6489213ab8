use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::STANDARD};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use voxdub_auth::GoogleAuth;

use crate::{
    error::SttError,
    types::{Alternative, AudioEncoding, RecognizeRequest, RecognizeResponse, Segment},
};

use super::SttProvider;

const DEFAULT_SPEECH_API_URL: &str = "https://speech.googleapis.com/v1";

/// Google Cloud Speech-to-Text (v1, synchronous `speech:recognize`)
pub struct GoogleSpeechProvider {
    client: Client,
    base_url: String,
    auth: GoogleAuth,
    name: String,
}

impl GoogleSpeechProvider {
    pub fn new(name: String, client: Client, auth: GoogleAuth, base_url: Option<String>) -> Self {
        let base_url = base_url.unwrap_or_else(|| DEFAULT_SPEECH_API_URL.to_string());

        Self {
            client,
            base_url,
            auth,
            name,
        }
    }
}

#[derive(Serialize)]
struct GoogleRecognizeRequest<'a> {
    config: RecognitionConfig<'a>,
    audio: RecognitionAudio,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RecognitionConfig<'a> {
    encoding: AudioEncoding,
    sample_rate_hertz: u32,
    language_code: &'a str,
}

#[derive(Serialize)]
struct RecognitionAudio {
    content: String,
}

#[derive(Deserialize)]
struct GoogleRecognizeResponse {
    #[serde(default)]
    results: Vec<GoogleResult>,
}

#[derive(Deserialize)]
struct GoogleResult {
    #[serde(default)]
    alternatives: Vec<GoogleAlternative>,
}

#[derive(Deserialize)]
struct GoogleAlternative {
    #[serde(default)]
    transcript: String,
    #[serde(default)]
    confidence: Option<f32>,
}

impl From<GoogleRecognizeResponse> for RecognizeResponse {
    fn from(response: GoogleRecognizeResponse) -> Self {
        Self {
            segments: response
                .results
                .into_iter()
                .map(|result| Segment {
                    alternatives: result
                        .alternatives
                        .into_iter()
                        .map(|alternative| Alternative {
                            transcript: alternative.transcript,
                            confidence: alternative.confidence,
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

fn wire_request(request: &RecognizeRequest) -> GoogleRecognizeRequest<'_> {
    GoogleRecognizeRequest {
        config: RecognitionConfig {
            encoding: request.encoding,
            sample_rate_hertz: request.sample_rate_hertz,
            language_code: &request.language_code,
        },
        audio: RecognitionAudio {
            content: STANDARD.encode(&request.audio),
        },
    }
}

#[async_trait]
impl SttProvider for GoogleSpeechProvider {
    async fn recognize(&self, request: RecognizeRequest) -> crate::error::Result<RecognizeResponse> {
        let url = format!("{}/speech:recognize", self.base_url.trim_end_matches('/'));

        tracing::debug!(
            "Google speech request: {} bytes, encoding={}, rate={}, language={}",
            request.audio.len(),
            request.encoding,
            request.sample_rate_hertz,
            request.language_code,
        );

        let body = wire_request(&request);

        let response = self
            .auth
            .authorize(self.client.post(&url))
            .await?
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Google speech request failed: {e}");
                SttError::ConnectionError(format!("Failed to send request to Google Speech: {e}"))
            })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());

            tracing::error!("Google speech API error ({status}): {error_text}");

            return Err(match status.as_u16() {
                401 | 403 => SttError::AuthenticationFailed(error_text),
                400 => SttError::InvalidRequest(error_text),
                _ => SttError::ProviderApiError {
                    status: status.as_u16(),
                    message: error_text,
                },
            });
        }

        let result: GoogleRecognizeResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Google speech response: {e}");
            SttError::InternalError(Some(e.to_string()))
        })?;

        tracing::debug!("Google speech recognition complete, {} segment(s)", result.results.len());

        Ok(result.into())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
