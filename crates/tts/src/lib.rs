#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod error;
mod provider;
mod types;

pub use error::{Result, TtsError};
pub use provider::{TtsProvider, google::GoogleTtsProvider};
pub use types::{SpeechEncoding, SpeechRequest, SpeechResponse, VoiceGender};
