//! Voice synthesis seam.
//!
//! The real synthesizer is a remote service returning base64 PCM16; the
//! core only needs something that turns narration into an [`AudioPayload`].

use cueline_project_model::{AudioPayload, DEFAULT_SAMPLE_RATE};

use crate::error::{AudioError, AudioResult};
use crate::pcm;

/// Turns clean narration into a voiceover payload.
pub trait VoiceSynthesizer {
    fn synthesize(&mut self, text: &str) -> AudioResult<AudioPayload>;
}

/// Offline synthesizer producing silence sized to a fixed speaking rate.
///
/// Lets voiceover-dependent flows run without the remote service.
#[derive(Debug, Clone)]
pub struct SilentVoice {
    pub chars_per_second: f64,
    pub sample_rate: u32,
}

impl SilentVoice {
    pub fn new(chars_per_second: f64, sample_rate: u32) -> Self {
        Self {
            chars_per_second,
            sample_rate,
        }
    }
}

impl Default for SilentVoice {
    fn default() -> Self {
        Self::new(4.0, DEFAULT_SAMPLE_RATE)
    }
}

impl VoiceSynthesizer for SilentVoice {
    fn synthesize(&mut self, text: &str) -> AudioResult<AudioPayload> {
        if self.sample_rate == 0 {
            return Err(AudioError::InvalidSampleRate {
                rate: self.sample_rate,
            });
        }
        if self.chars_per_second.is_nan() || self.chars_per_second <= 0.0 {
            return Err(AudioError::engine("speaking rate must be positive"));
        }

        let chars = text.chars().filter(|c| !c.is_whitespace()).count();
        let secs = chars as f64 / self.chars_per_second;
        let samples = (secs * self.sample_rate as f64).round() as usize;
        tracing::debug!(chars, secs, samples, "Synthesizing silent voiceover");

        Ok(AudioPayload::new(
            pcm::encode(&vec![0i16; samples]),
            self.sample_rate,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_voice_length_follows_text() {
        let mut voice = SilentVoice::new(4.0, 1_000);
        let payload = voice.synthesize("abcd efgh").unwrap();
        let secs = pcm::payload_duration(&payload).unwrap();
        assert!((secs - 2.0).abs() < 1e-9);

        let decoded = pcm::decode_payload(&payload).unwrap();
        assert!(decoded.samples().iter().all(|&s| s == 0));
    }

    #[test]
    fn test_silent_voice_rejects_bad_rate() {
        let mut voice = SilentVoice::new(0.0, 1_000);
        assert!(voice.synthesize("abc").is_err());
    }
}
