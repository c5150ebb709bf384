//! Audio error types.

use cueline_common::error::CuelineError;

/// Errors raised while decoding payloads or driving an audio engine.
#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("Invalid base64 audio payload: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    #[error("Base64 payload length {len} is not a multiple of 4")]
    InvalidPayloadLength { len: usize },

    #[error("PCM16 payload has odd byte length {len}")]
    OddByteLength { len: usize },

    #[error("Invalid sample rate: {rate}")]
    InvalidSampleRate { rate: u32 },

    #[error("Audio engine error: {message}")]
    Engine { message: String },
}

/// Result type alias using AudioError.
pub type AudioResult<T> = Result<T, AudioError>;

impl AudioError {
    pub fn engine(msg: impl Into<String>) -> Self {
        Self::Engine {
            message: msg.into(),
        }
    }
}

impl From<AudioError> for CuelineError {
    fn from(err: AudioError) -> Self {
        CuelineError::audio(err.to_string())
    }
}
