#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions
)]

//! Speech recognition client for the dubbing pipeline

mod error;
mod provider;
mod types;

pub use error::{Result, SttError};
pub use provider::{SttProvider, google::GoogleSpeechProvider};
pub use types::{Alternative, AudioEncoding, RecognizeRequest, RecognizeResponse, Segment};
