//! Pure audio conversion core: base64 decoding of raw PCM payloads and
//! WAV container encoding. No I/O, no logging, no shared state — every
//! function is a deterministic in-memory transform.

mod wav;

pub use wav::{encode_wav, encode_wav_base64};

use base64::{engine::general_purpose, Engine as _};
use thiserror::Error;

/// Errors produced by the conversion core.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("invalid base64 audio payload: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("invalid audio format: {0}")]
    Format(String),

    #[error("decoded audio is empty")]
    EmptyData,
}

/// PCM format parameters for a WAV header.
///
/// Construction validates the fields, so a value of this type always
/// describes an encodable format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioFormatParams {
    pub sample_rate: u32,
    pub channels: u16,
    pub bits_per_sample: u16,
}

impl AudioFormatParams {
    pub fn new(sample_rate: u32, channels: u16, bits_per_sample: u16) -> Result<Self, AudioError> {
        if sample_rate == 0 {
            return Err(AudioError::Format("sample rate must be positive".into()));
        }
        if channels == 0 {
            return Err(AudioError::Format("channel count must be positive".into()));
        }
        if bits_per_sample == 0 || bits_per_sample % 8 != 0 {
            return Err(AudioError::Format(format!(
                "bits per sample must be a positive multiple of 8, got {bits_per_sample}"
            )));
        }
        // block align must fit the header's uint16 field
        let block_align = channels
            .checked_mul(bits_per_sample / 8)
            .ok_or_else(|| AudioError::Format("block align overflows 16 bits".into()))?;
        // byte rate must fit the header's uint32 field
        sample_rate
            .checked_mul(u32::from(block_align))
            .ok_or_else(|| AudioError::Format("byte rate overflows 32 bits".into()))?;
        Ok(Self {
            sample_rate,
            channels,
            bits_per_sample,
        })
    }

    /// Bytes consumed per second of audio.
    pub fn byte_rate(&self) -> u32 {
        self.sample_rate * u32::from(self.block_align())
    }

    /// Bytes per sample frame across all channels.
    pub fn block_align(&self) -> u16 {
        self.channels * (self.bits_per_sample / 8)
    }
}

/// Decode a standard-alphabet, padded base64 string into raw bytes.
pub fn decode_base64(input: &str) -> Result<Vec<u8>, AudioError> {
    Ok(general_purpose::STANDARD.decode(input)?)
}
