//! Audio engine capability and source handles.
//!
//! The scheduler talks to platform audio only through [`AudioEngine`]. A
//! clip is voiced either by its decoded payload or by speech synthesis of
//! its narration, never both; [`AudioSourceHandle`] tags which one is live
//! so a single `stop` path cancels either.

use std::collections::HashSet;

use cueline_project_model::AudioPayload;

use crate::error::AudioResult;
use crate::pcm::{self, PcmBuffer};

/// Identifier an engine assigns to a started source.
pub type SourceId = u64;

/// Platform audio capability.
///
/// Implementations must treat stopping an unknown or finished source as a
/// no-op.
pub trait AudioEngine {
    /// Decode a payload into a playable buffer.
    fn decode(&mut self, payload: &AudioPayload) -> AudioResult<PcmBuffer> {
        pcm::decode_payload(payload)
    }

    /// Start playing `buffer` from `start_secs` into it.
    fn play(&mut self, buffer: &PcmBuffer, start_secs: f64) -> AudioResult<SourceId>;

    /// Stop a buffer started with [`AudioEngine::play`].
    fn stop(&mut self, id: SourceId);

    /// Start speaking `text` with the platform speech synthesizer.
    fn speak(&mut self, text: &str) -> AudioResult<SourceId>;

    /// Cancel an utterance started with [`AudioEngine::speak`].
    fn cancel_speech(&mut self, id: SourceId);
}

impl<E: AudioEngine + ?Sized> AudioEngine for Box<E> {
    fn decode(&mut self, payload: &AudioPayload) -> AudioResult<PcmBuffer> {
        (**self).decode(payload)
    }

    fn play(&mut self, buffer: &PcmBuffer, start_secs: f64) -> AudioResult<SourceId> {
        (**self).play(buffer, start_secs)
    }

    fn stop(&mut self, id: SourceId) {
        (**self).stop(id)
    }

    fn speak(&mut self, text: &str) -> AudioResult<SourceId> {
        (**self).speak(text)
    }

    fn cancel_speech(&mut self, id: SourceId) {
        (**self).cancel_speech(id)
    }
}

impl<E: AudioEngine + ?Sized> AudioEngine for &mut E {
    fn decode(&mut self, payload: &AudioPayload) -> AudioResult<PcmBuffer> {
        (**self).decode(payload)
    }

    fn play(&mut self, buffer: &PcmBuffer, start_secs: f64) -> AudioResult<SourceId> {
        (**self).play(buffer, start_secs)
    }

    fn stop(&mut self, id: SourceId) {
        (**self).stop(id)
    }

    fn speak(&mut self, text: &str) -> AudioResult<SourceId> {
        (**self).speak(text)
    }

    fn cancel_speech(&mut self, id: SourceId) {
        (**self).cancel_speech(id)
    }
}

/// What to voice a clip with.
#[derive(Debug, Clone, PartialEq)]
pub enum AudioSource {
    /// Decoded voiceover, started `start_secs` into the buffer.
    Decoded { buffer: PcmBuffer, start_secs: f64 },
    /// Text for the speech synthesizer.
    SpeechFallback { text: String },
}

/// A live source on an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioSourceHandle {
    Decoded(SourceId),
    SpeechFallback(SourceId),
}

impl AudioSourceHandle {
    /// Start `source` on `engine`.
    pub fn start<E: AudioEngine + ?Sized>(
        engine: &mut E,
        source: &AudioSource,
    ) -> AudioResult<Self> {
        match source {
            AudioSource::Decoded { buffer, start_secs } => {
                engine.play(buffer, *start_secs).map(Self::Decoded)
            }
            AudioSource::SpeechFallback { text } => engine.speak(text).map(Self::SpeechFallback),
        }
    }

    /// Stop the source. Stopping a finished source is a no-op.
    pub fn stop<E: AudioEngine + ?Sized>(self, engine: &mut E) {
        match self {
            Self::Decoded(id) => engine.stop(id),
            Self::SpeechFallback(id) => engine.cancel_speech(id),
        }
    }

    pub fn id(&self) -> SourceId {
        match self {
            Self::Decoded(id) | Self::SpeechFallback(id) => *id,
        }
    }

    pub fn is_speech(&self) -> bool {
        matches!(self, Self::SpeechFallback(_))
    }
}

/// Something an engine was asked to do.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    Play {
        id: SourceId,
        samples: usize,
        start_sample: usize,
    },
    Stop {
        id: SourceId,
    },
    Speak {
        id: SourceId,
        text: String,
    },
    CancelSpeech {
        id: SourceId,
    },
}

/// Engine that produces no sound and records every request.
///
/// Used for headless playback and as a test double.
#[derive(Debug, Default)]
pub struct NullAudioEngine {
    next_id: SourceId,
    active: HashSet<SourceId>,
    events: Vec<EngineEvent>,
}

impl NullAudioEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests received so far, oldest first.
    pub fn events(&self) -> &[EngineEvent] {
        &self.events
    }

    /// Sources started and not yet stopped.
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    fn allocate(&mut self) -> SourceId {
        self.next_id += 1;
        self.active.insert(self.next_id);
        self.next_id
    }
}

impl AudioEngine for NullAudioEngine {
    fn play(&mut self, buffer: &PcmBuffer, start_secs: f64) -> AudioResult<SourceId> {
        let id = self.allocate();
        let start_sample = buffer.sample_index_at(start_secs);
        tracing::debug!(
            id,
            samples = buffer.len(),
            duration_secs = buffer.duration_secs(),
            start_sample,
            "Playing decoded voiceover"
        );
        self.events.push(EngineEvent::Play {
            id,
            samples: buffer.len(),
            start_sample,
        });
        Ok(id)
    }

    fn stop(&mut self, id: SourceId) {
        if self.active.remove(&id) {
            tracing::debug!(id, "Stopped voiceover");
            self.events.push(EngineEvent::Stop { id });
        }
    }

    fn speak(&mut self, text: &str) -> AudioResult<SourceId> {
        let id = self.allocate();
        tracing::debug!(id, chars = text.chars().count(), "Speaking narration");
        self.events.push(EngineEvent::Speak {
            id,
            text: text.to_string(),
        });
        Ok(id)
    }

    fn cancel_speech(&mut self, id: SourceId) {
        if self.active.remove(&id) {
            tracing::debug!(id, "Cancelled speech");
            self.events.push(EngineEvent::CancelSpeech { id });
        }
    }
}
