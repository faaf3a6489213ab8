/// Text to translate and the language to translate it into
#[derive(Debug, Clone)]
pub struct TranslationRequest {
    pub text: String,
    /// ISO 639-1 target language, e.g. `hi`
    pub target_language: String,
    /// Source language; detected by the service when `None`
    pub source_language: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationResponse {
    pub text: String,
    /// Language the service detected, when no source was given
    pub detected_source_language: Option<String>,
}
