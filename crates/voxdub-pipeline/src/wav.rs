const RIFF: &[u8; 4] = b"RIFF";
const WAVE: &[u8; 4] = b"WAVE";
const FMT: &[u8; 4] = b"fmt ";

/// Sample rate declared in the `fmt ` chunk of a RIFF/WAVE file
///
/// Returns `None` for anything that is not a well-formed WAVE header, so
/// callers can fall back to a configured rate.
pub fn wav_sample_rate(bytes: &[u8]) -> Option<u32> {
    if bytes.get(0..4)? != RIFF || bytes.get(8..12)? != WAVE {
        return None;
    }

    let mut offset = 12;

    while let Some(header) = bytes.get(offset..offset + 8) {
        let id = &header[0..4];
        let size = usize::try_from(u32::from_le_bytes([header[4], header[5], header[6], header[7]])).ok()?;
        let body = offset + 8;

        if id == FMT {
            // audio_format (2) + channels (2) precede the sample rate
            let rate = bytes.get(body + 4..body + 8)?;
            let rate = u32::from_le_bytes([rate[0], rate[1], rate[2], rate[3]]);
            return (rate > 0).then_some(rate);
        }

        // chunks are padded to an even length
        offset = body.checked_add(size)?.checked_add(size % 2)?;
    }

    None
}
