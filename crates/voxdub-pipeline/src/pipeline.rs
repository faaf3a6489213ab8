use std::{fmt, sync::Arc};

use axum::response::{IntoResponse, Response};
use http::header;
use stt::{AudioEncoding, RecognizeRequest, SttProvider};
use translate::{TranslateProvider, TranslationRequest};
use tts::{SpeechRequest, TtsProvider};
use voxdub_config::{PipelineConfig, SUPPORTED_SAMPLE_RATES};

use crate::{encoding::encoding_for_filename, error::ConvertError, wav::wav_sample_rate};

/// Where a conversion request currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Received,
    Transcribing,
    Translating,
    Synthesizing,
    Complete,
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Received => "received",
            Self::Transcribing => "transcribing",
            Self::Translating => "translating",
            Self::Synthesizing => "synthesizing",
            Self::Complete => "complete",
            Self::Failed => "failed",
        })
    }
}

/// One uploaded audio file
#[derive(Debug, Clone)]
pub struct UploadedAudio {
    pub audio: Vec<u8>,
    /// Client supplied file name, only used for the encoding hint
    pub filename: String,
}

/// Dubbed speech ready to be sent back
#[derive(Debug, Clone)]
pub struct SynthesizedAudio {
    pub audio: Vec<u8>,
    pub content_type: String,
    /// Suggested download name, e.g. `sample_hindi.mp3`
    pub filename: String,
}

impl IntoResponse for SynthesizedAudio {
    fn into_response(self) -> Response {
        let disposition = format!("inline; filename=\"{}\"", self.filename);

        (
            [
                (header::CONTENT_TYPE, self.content_type),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            self.audio,
        )
            .into_response()
    }
}

/// Transcribe, translate and re-voice one upload
///
/// Providers are injected so the pipeline holds no credentials of its own
/// and can be driven by fakes in tests.
#[derive(Clone)]
pub struct ConversionPipeline {
    stt: Arc<dyn SttProvider>,
    translator: Arc<dyn TranslateProvider>,
    tts: Arc<dyn TtsProvider>,
    settings: PipelineConfig,
}

impl ConversionPipeline {
    pub fn new(
        stt: Arc<dyn SttProvider>,
        translator: Arc<dyn TranslateProvider>,
        tts: Arc<dyn TtsProvider>,
        settings: PipelineConfig,
    ) -> Self {
        Self {
            stt,
            translator,
            tts,
            settings,
        }
    }

    pub const fn settings(&self) -> &PipelineConfig {
        &self.settings
    }

    /// Run the three stages in order, stopping at the first failure
    #[tracing::instrument(skip_all, fields(filename = %upload.filename, bytes = upload.audio.len()))]
    pub async fn run(&self, upload: UploadedAudio) -> Result<SynthesizedAudio, ConvertError> {
        let UploadedAudio { audio, filename } = upload;

        let encoding = encoding_for_filename(&filename);
        let sample_rate_hertz = self.sample_rate(encoding, &audio);

        tracing::info!(
            stage = %Stage::Transcribing,
            provider = self.stt.name(),
            %encoding,
            sample_rate_hertz,
            "transcribing upload"
        );

        let recognized = self
            .stt
            .recognize(RecognizeRequest {
                audio,
                encoding,
                sample_rate_hertz,
                language_code: self.settings.source_language.clone(),
            })
            .await
            .map_err(ConvertError::Transcription)?;

        let transcript = recognized.transcript();

        if transcript.trim().is_empty() {
            return Err(ConvertError::EmptyTranscription);
        }

        tracing::info!(
            stage = %Stage::Translating,
            provider = self.translator.name(),
            segments = recognized.segments.len(),
            transcript_len = transcript.len(),
            "translating transcript"
        );

        let translated = self
            .translator
            .translate(TranslationRequest {
                text: transcript,
                target_language: self.settings.target_language.clone(),
                source_language: None,
            })
            .await
            .map_err(ConvertError::Translation)?;

        tracing::info!(
            stage = %Stage::Synthesizing,
            provider = self.tts.name(),
            detected_source = translated.detected_source_language.as_deref().unwrap_or("unknown"),
            "synthesizing translation"
        );

        let speech = self
            .tts
            .synthesize(SpeechRequest {
                text: translated.text,
                language_code: self.settings.voice_language.clone(),
                gender: self.settings.voice_gender,
                voice_name: self.settings.voice_name.clone(),
                encoding: self.settings.output_encoding,
            })
            .await
            .map_err(ConvertError::Synthesis)?;

        tracing::info!(stage = %Stage::Complete, audio_bytes = speech.audio.len(), "conversion complete");

        Ok(SynthesizedAudio {
            audio: speech.audio,
            content_type: speech.content_type,
            filename: download_name(&filename, self.settings.output_encoding.extension()),
        })
    }

    fn sample_rate(&self, encoding: AudioEncoding, audio: &[u8]) -> u32 {
        let sniff = self.settings.detect_sample_rate && encoding == AudioEncoding::Linear16;

        match sniff.then(|| wav_sample_rate(audio)).flatten() {
            Some(rate) if SUPPORTED_SAMPLE_RATES.contains(&rate) => rate,
            Some(rate) => {
                tracing::debug!(
                    declared = rate,
                    fallback = self.settings.sample_rate_hertz,
                    "WAV header rate is unsupported, using configured rate"
                );
                self.settings.sample_rate_hertz
            }
            None => self.settings.sample_rate_hertz,
        }
    }
}

/// `<stem>_hindi.<ext>`, restricted to characters safe in a quoted header value
fn download_name(filename: &str, extension: &str) -> String {
    let stem = filename.rsplit_once('.').map_or(filename, |(stem, _)| stem);
    let stem: String = stem
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    let stem = if stem.is_empty() { "audio" } else { stem.as_str() };

    format!("{stem}_hindi.{extension}")
}
