use std::fmt;

use serde::Serialize;

/// Audio encoding declared to the recognizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AudioEncoding {
    /// Uncompressed 16-bit signed little-endian PCM
    #[serde(rename = "LINEAR16")]
    Linear16,
    #[serde(rename = "MP3")]
    Mp3,
    #[serde(rename = "AAC_LC")]
    AacLc,
}

impl AudioEncoding {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Linear16 => "LINEAR16",
            Self::Mp3 => "MP3",
            Self::AacLc => "AAC_LC",
        }
    }
}

impl fmt::Display for AudioEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A synchronous recognition request for one uploaded file
#[derive(Debug)]
pub struct RecognizeRequest {
    /// Raw audio file bytes
    pub audio: Vec<u8>,
    pub encoding: AudioEncoding,
    pub sample_rate_hertz: u32,
    /// BCP-47 language of the speech, e.g. `en-US`
    pub language_code: String,
}

/// Recognition result, one segment per consecutive portion of audio
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RecognizeResponse {
    pub segments: Vec<Segment>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Segment {
    /// Hypotheses ordered from most to least likely
    pub alternatives: Vec<Alternative>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Alternative {
    pub transcript: String,
    pub confidence: Option<f32>,
}

impl RecognizeResponse {
    /// Space-join the best alternative of every segment, in segment order
    ///
    /// Segments without any alternative contribute nothing.
    pub fn transcript(&self) -> String {
        self.segments
            .iter()
            .filter_map(|segment| segment.alternatives.first())
            .map(|alternative| alternative.transcript.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
