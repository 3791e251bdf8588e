use base64::{engine::general_purpose, Engine as _};

use crate::{AudioError, AudioFormatParams};

const HEADER_LEN: usize = 44;
const FMT_CHUNK_SIZE: u32 = 16;
const FORMAT_PCM: u16 = 1;

/// Wrap raw little-endian PCM bytes in a canonical 44-byte RIFF/WAVE header.
///
/// The result is `44 + data.len()` bytes and playable by any standard WAV
/// decoder. The PCM bytes are appended unmodified.
pub fn encode_wav(
    data: &[u8],
    sample_rate: u32,
    channels: u16,
    bits_per_sample: u16,
) -> Result<Vec<u8>, AudioError> {
    let params = AudioFormatParams::new(sample_rate, channels, bits_per_sample)?;

    // data size plus the 36-byte header remainder must fit the riff size field
    if data.len() > (u32::MAX - 36) as usize {
        return Err(AudioError::Format(
            "PCM payload too large for a WAV container".into(),
        ));
    }
    let data_size = data.len() as u32;
    let riff_size = 36 + data_size; // total file size minus the 8-byte RIFF preamble

    let mut out = Vec::with_capacity(HEADER_LEN + data.len());

    // RIFF header
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&riff_size.to_le_bytes());
    out.extend_from_slice(b"WAVE");

    // fmt chunk
    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&FMT_CHUNK_SIZE.to_le_bytes());
    out.extend_from_slice(&FORMAT_PCM.to_le_bytes());
    out.extend_from_slice(&params.channels.to_le_bytes());
    out.extend_from_slice(&params.sample_rate.to_le_bytes());
    out.extend_from_slice(&params.byte_rate().to_le_bytes());
    out.extend_from_slice(&params.block_align().to_le_bytes());
    out.extend_from_slice(&params.bits_per_sample.to_le_bytes());

    // data chunk
    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_size.to_le_bytes());
    out.extend_from_slice(data);

    Ok(out)
}

/// Encode PCM bytes as a WAV container and return it as standard base64,
/// the form the HTTP layer ships in JSON responses.
pub fn encode_wav_base64(
    data: &[u8],
    sample_rate: u32,
    channels: u16,
    bits_per_sample: u16,
) -> Result<String, AudioError> {
    let wav = encode_wav(data, sample_rate, channels, bits_per_sample)?;
    Ok(general_purpose::STANDARD.encode(wav))
}
