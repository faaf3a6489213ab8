use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::STANDARD};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use voxdub_auth::GoogleAuth;

use crate::{
    error::TtsError,
    types::{SpeechEncoding, SpeechRequest, SpeechResponse, VoiceGender},
};

use super::TtsProvider;

const DEFAULT_TTS_API_URL: &str = "https://texttospeech.googleapis.com/v1";

/// Google Cloud Text-to-Speech provider
pub struct GoogleTtsProvider {
    client: Client,
    base_url: String,
    auth: GoogleAuth,
    name: String,
}

impl GoogleTtsProvider {
    pub fn new(name: String, client: Client, auth: GoogleAuth, base_url: Option<String>) -> Self {
        let base_url = base_url.unwrap_or_else(|| DEFAULT_TTS_API_URL.to_string());

        Self {
            client,
            base_url,
            auth,
            name,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeRequest<'a> {
    input: SynthesisInput<'a>,
    voice: VoiceSelection<'a>,
    audio_config: AudioConfig,
}

#[derive(Serialize)]
struct SynthesisInput<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceSelection<'a> {
    language_code: &'a str,
    ssml_gender: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AudioConfig {
    audio_encoding: &'static str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeResponse {
    #[serde(default)]
    audio_content: String,
}

const fn gender_name(gender: VoiceGender) -> &'static str {
    match gender {
        VoiceGender::Female => "FEMALE",
        VoiceGender::Male => "MALE",
        VoiceGender::Neutral => "NEUTRAL",
    }
}

const fn encoding_name(encoding: SpeechEncoding) -> &'static str {
    match encoding {
        SpeechEncoding::Mp3 => "MP3",
        SpeechEncoding::Linear16 => "LINEAR16",
        SpeechEncoding::OggOpus => "OGG_OPUS",
    }
}

fn wire_request(request: &SpeechRequest) -> SynthesizeRequest<'_> {
    SynthesizeRequest {
        input: SynthesisInput { text: &request.text },
        voice: VoiceSelection {
            language_code: &request.language_code,
            ssml_gender: gender_name(request.gender),
            name: request.voice_name.as_deref(),
        },
        audio_config: AudioConfig {
            audio_encoding: encoding_name(request.encoding),
        },
    }
}

#[async_trait]
impl TtsProvider for GoogleTtsProvider {
    async fn synthesize(&self, request: SpeechRequest) -> crate::error::Result<SpeechResponse> {
        let url = format!("{}/text:synthesize", self.base_url.trim_end_matches('/'));

        tracing::debug!(
            "Google TTS request: language={}, gender={}, input_len={}",
            request.language_code,
            gender_name(request.gender),
            request.text.len(),
        );

        let response = self
            .auth
            .authorize(self.client.post(&url))
            .await?
            .json(&wire_request(&request))
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Google TTS request failed: {e}");
                TtsError::ConnectionError(format!("Failed to send request to Google TTS: {e}"))
            })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());

            tracing::error!("Google TTS API error ({status}): {error_text}");

            return Err(match status.as_u16() {
                401 | 403 => TtsError::AuthenticationFailed(error_text),
                400 => TtsError::InvalidRequest(error_text),
                _ => TtsError::ProviderApiError {
                    status: status.as_u16(),
                    message: error_text,
                },
            });
        }

        let result: SynthesizeResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Google TTS response: {e}");
            TtsError::InternalError(Some(e.to_string()))
        })?;

        let audio = STANDARD.decode(result.audio_content).map_err(|e| {
            tracing::error!("Google TTS returned undecodable audio: {e}");
            TtsError::InternalError(Some(e.to_string()))
        })?;

        tracing::debug!("Google TTS synthesis complete, {} bytes", audio.len());

        Ok(SpeechResponse {
            audio,
            content_type: request.encoding.content_type().to_string(),
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}
