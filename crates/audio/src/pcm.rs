//! Mono PCM16 payload decoding and duration probing.
//!
//! Voiceover payloads arrive as base64 text wrapping little-endian signed
//! 16-bit samples with no container header.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use cueline_project_model::AudioPayload;

use crate::error::{AudioError, AudioResult};

const BYTES_PER_SAMPLE: usize = 2;

/// Decoded mono PCM16 audio ready for playback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PcmBuffer {
    samples: Vec<i16>,
    sample_rate: u32,
}

impl PcmBuffer {
    pub fn new(samples: Vec<i16>, sample_rate: u32) -> AudioResult<Self> {
        if sample_rate == 0 {
            return Err(AudioError::InvalidSampleRate { rate: sample_rate });
        }
        Ok(Self {
            samples,
            sample_rate,
        })
    }

    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Exact duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Index of the sample at `secs`, clamped to the buffer.
    pub fn sample_index_at(&self, secs: f64) -> usize {
        let index = (secs.max(0.0) * self.sample_rate as f64).floor() as usize;
        index.min(self.samples.len())
    }
}

/// Decode a base64 mono PCM16 payload.
pub fn decode(data: &str, sample_rate: u32) -> AudioResult<PcmBuffer> {
    if sample_rate == 0 {
        return Err(AudioError::InvalidSampleRate { rate: sample_rate });
    }

    let bytes = STANDARD.decode(data.trim())?;
    if bytes.len() % BYTES_PER_SAMPLE != 0 {
        return Err(AudioError::OddByteLength { len: bytes.len() });
    }

    let samples = bytes
        .chunks_exact(BYTES_PER_SAMPLE)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
        .collect();

    PcmBuffer::new(samples, sample_rate)
}

/// Decode an attached payload at its own sample rate.
pub fn decode_payload(payload: &AudioPayload) -> AudioResult<PcmBuffer> {
    decode(&payload.data, payload.sample_rate)
}

/// Number of bytes `data` decodes to, computed from its length alone.
///
/// Only the padded form is accepted, so the length must be a multiple of 4.
/// Characters are not validated; use [`decode`] for that.
pub fn decoded_byte_len(data: &str) -> AudioResult<usize> {
    let data = data.trim();
    if data.len() % 4 != 0 {
        return Err(AudioError::InvalidPayloadLength { len: data.len() });
    }
    let padding = data.bytes().rev().take(2).filter(|&b| b == b'=').count();
    Ok(data.len() / 4 * 3 - padding)
}

/// Duration of a PCM16 payload in seconds without decoding it.
pub fn fast_duration(data: &str, sample_rate: u32) -> AudioResult<f64> {
    if sample_rate == 0 {
        return Err(AudioError::InvalidSampleRate { rate: sample_rate });
    }
    let bytes = decoded_byte_len(data)?;
    if bytes % BYTES_PER_SAMPLE != 0 {
        return Err(AudioError::OddByteLength { len: bytes });
    }
    Ok((bytes / BYTES_PER_SAMPLE) as f64 / sample_rate as f64)
}

/// [`fast_duration`] for an attached payload.
pub fn payload_duration(payload: &AudioPayload) -> AudioResult<f64> {
    fast_duration(&payload.data, payload.sample_rate)
}

/// Encode samples as a base64 PCM16 payload body.
pub fn encode(samples: &[i16]) -> String {
    let bytes: Vec<u8> = samples.iter().flat_map(|s| s.to_le_bytes()).collect();
    STANDARD.encode(bytes)
}
