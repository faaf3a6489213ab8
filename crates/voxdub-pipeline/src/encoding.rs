use stt::AudioEncoding;

/// Guess the recognizer encoding from an upload's file name
///
/// Only the extension is inspected, case-insensitively; the audio itself is
/// not validated. Unknown or missing extensions fall back to LINEAR16.
pub fn encoding_for_filename(filename: &str) -> AudioEncoding {
    let Some((_, extension)) = filename.rsplit_once('.') else {
        return AudioEncoding::Linear16;
    };

    match extension.to_ascii_lowercase().as_str() {
        "mp3" => AudioEncoding::Mp3,
        "m4a" | "aac" => AudioEncoding::AacLc,
        _ => AudioEncoding::Linear16,
    }
}
