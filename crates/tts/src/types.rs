pub use voxdub_config::{SpeechEncoding, VoiceGender};

/// Speech synthesis request
#[derive(Debug, Clone)]
pub struct SpeechRequest {
    /// Text to synthesize into speech
    pub text: String,
    /// BCP-47 language of the voice, e.g. `hi-IN`
    pub language_code: String,
    pub gender: VoiceGender,
    /// Specific voice name; the service picks one matching language and gender when unset
    pub voice_name: Option<String>,
    pub encoding: SpeechEncoding,
}

/// Raw audio response from a TTS provider
#[derive(Debug, Clone)]
pub struct SpeechResponse {
    /// Raw audio bytes
    pub audio: Vec<u8>,
    /// Content type of the audio (e.g. "audio/mpeg")
    pub content_type: String,
}
