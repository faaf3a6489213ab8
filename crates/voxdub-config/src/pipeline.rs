use std::ops::RangeInclusive;

use serde::Deserialize;

/// Sample rates the recognizer accepts
pub const SUPPORTED_SAMPLE_RATES: RangeInclusive<u32> = 8_000..=48_000;

/// Settings for the transcribe, translate and synthesize sequence
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    /// BCP-47 code of the spoken language in uploads
    #[serde(default = "default_source_language")]
    pub source_language: String,
    /// ISO 639-1 code passed to the translation service
    #[serde(default = "default_target_language")]
    pub target_language: String,
    /// BCP-47 code of the synthesized voice
    #[serde(default = "default_voice_language")]
    pub voice_language: String,
    #[serde(default)]
    pub voice_gender: VoiceGender,
    /// Specific voice, e.g. `hi-IN-Wavenet-A`; the service picks one when unset
    #[serde(default)]
    pub voice_name: Option<String>,
    #[serde(default)]
    pub output_encoding: SpeechEncoding,
    /// Sample rate reported to the transcription service
    #[serde(default = "default_sample_rate")]
    pub sample_rate_hertz: u32,
    /// Prefer the rate declared in a WAV header over `sample_rate_hertz`
    #[serde(default = "default_detect_sample_rate")]
    pub detect_sample_rate: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            source_language: default_source_language(),
            target_language: default_target_language(),
            voice_language: default_voice_language(),
            voice_gender: VoiceGender::default(),
            voice_name: None,
            output_encoding: SpeechEncoding::default(),
            sample_rate_hertz: default_sample_rate(),
            detect_sample_rate: default_detect_sample_rate(),
        }
    }
}

/// Gender requested for the synthesized voice
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoiceGender {
    #[default]
    Female,
    Male,
    Neutral,
}

/// Container/codec of the synthesized audio
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeechEncoding {
    #[default]
    Mp3,
    Linear16,
    OggOpus,
}

impl SpeechEncoding {
    /// MIME type of the audio returned to clients
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Mp3 => "audio/mpeg",
            Self::Linear16 => "audio/wav",
            Self::OggOpus => "audio/ogg",
        }
    }

    /// File extension for download names
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Linear16 => "wav",
            Self::OggOpus => "ogg",
        }
    }
}

fn default_source_language() -> String {
    "en-US".to_string()
}

fn default_target_language() -> String {
    "hi".to_string()
}

fn default_voice_language() -> String {
    "hi-IN".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_sample_rate() -> u32 {
    44_100
}

#[allow(clippy::missing_const_for_fn)]
fn default_detect_sample_rate() -> bool {
    true
}
