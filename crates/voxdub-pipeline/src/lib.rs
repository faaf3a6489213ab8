#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

//! The dubbing pipeline: English speech in, Hindi speech out
//!
//! [`ConversionPipeline::run`] drives one upload through transcription,
//! translation and synthesis, strictly in that order. Any failure aborts
//! the request; nothing is retried and no partial result is returned.

mod encoding;
mod error;
mod pipeline;
mod wav;

pub use encoding::encoding_for_filename;
pub use error::ConvertError;
pub use pipeline::{ConversionPipeline, Stage, SynthesizedAudio, UploadedAudio};
pub use wav::wav_sample_rate;
