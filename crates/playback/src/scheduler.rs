//! Playback state machine.
//!
//! The scheduler owns a [`Clock`] and an [`AudioEngine`] and is driven by
//! periodic [`PlaybackScheduler::tick`] calls. Each tick recomputes the
//! playhead from the clock anchor, resolves it against the current clip list
//! and, when the active clip changes, swaps the voiceover. The clip list is
//! passed in on every call so edits between ticks are picked up.

use cueline_audio::{AudioEngine, AudioSource, AudioSourceHandle};
use cueline_common::clock::Clock;
use cueline_project_model::{total_duration, Clip, ClipId};
use cueline_sync_core::cue::subtitle_text;
use cueline_sync_core::index::{locate, FramePosition};
use serde::Serialize;

/// Scheduler state. A paused scheduler is `Stopped` with its playhead kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackState {
    Stopped,
    Playing,
}

/// Everything the presentation layer needs for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Frame {
    pub playhead_secs: f64,
    pub state: PlaybackState,
    #[serde(flatten)]
    pub position: FramePosition,
}

/// The clip whose audio was last dispatched.
#[derive(Debug, Clone, Copy)]
struct Dispatched {
    index: usize,
    clip_id: ClipId,
    handle: Option<AudioSourceHandle>,
}

/// Drives the playhead and edge-triggers per-clip audio.
pub struct PlaybackScheduler<C: Clock, E: AudioEngine> {
    clock: C,
    engine: E,
    state: PlaybackState,
    playhead_secs: f64,
    /// Clock time (ms) at which the playhead would have been zero.
    anchor_ms: f64,
    dispatched: Option<Dispatched>,
}

impl<C: Clock, E: AudioEngine> PlaybackScheduler<C, E> {
    pub fn new(clock: C, engine: E) -> Self {
        Self {
            clock,
            engine,
            state: PlaybackState::Stopped,
            playhead_secs: 0.0,
            anchor_ms: 0.0,
            dispatched: None,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// Global playhead as of the last tick or seek.
    pub fn playhead(&self) -> f64 {
        self.playhead_secs
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Start or resume from the current playhead.
    ///
    /// A playhead already at the end of the sequence restarts from zero.
    /// Does nothing on an empty list.
    pub fn play(&mut self, clips: &[Clip]) {
        if clips.is_empty() {
            tracing::debug!("Nothing to play");
            return;
        }
        if self.playhead_secs >= total_duration(clips) {
            self.playhead_secs = 0.0;
        }
        self.anchor_ms = self.clock.now_ms() - self.playhead_secs * 1000.0;
        self.state = PlaybackState::Playing;
        tracing::info!(playhead = self.playhead_secs, "Playback started");
    }

    /// Stop and keep the playhead.
    pub fn pause(&mut self) {
        self.cancel_audio();
        if self.is_playing() {
            tracing::info!(playhead = self.playhead_secs, "Playback paused");
        }
        self.state = PlaybackState::Stopped;
    }

    /// Stop and rewind to zero.
    pub fn stop(&mut self) {
        self.pause();
        self.playhead_secs = 0.0;
    }

    /// Jump to `time_secs`. Current audio is cancelled and re-dispatched on
    /// the next tick; a playing scheduler continues from the new position.
    pub fn seek(&mut self, time_secs: f64) {
        self.cancel_audio();
        self.playhead_secs = if time_secs.is_finite() {
            time_secs.max(0.0)
        } else {
            0.0
        };
        if self.is_playing() {
            self.anchor_ms = self.clock.now_ms() - self.playhead_secs * 1000.0;
        }
        tracing::debug!(playhead = self.playhead_secs, "Seek");
    }

    /// Advance the playhead and dispatch audio if the active clip changed.
    ///
    /// Returns `None` only for an empty list. Reaching the end of the
    /// sequence clamps the playhead and stops playback.
    pub fn tick(&mut self, clips: &[Clip]) -> Option<Frame> {
        if clips.is_empty() {
            if self.is_playing() {
                tracing::info!("Timeline emptied, stopping playback");
            }
            self.pause();
            return None;
        }

        if self.is_playing() {
            let total = total_duration(clips);
            let playhead = ((self.clock.now_ms() - self.anchor_ms) / 1000.0).max(0.0);
            if playhead >= total {
                self.playhead_secs = total;
                self.pause();
                tracing::info!(total, "Playback finished");
            } else {
                self.playhead_secs = playhead;
            }
        }

        let position = locate(self.playhead_secs, clips)?;
        if self.is_playing() {
            self.dispatch_if_changed(&clips[position.active_clip_index], &position);
        }

        Some(Frame {
            playhead_secs: self.playhead_secs,
            state: self.state,
            position,
        })
    }

    fn dispatch_if_changed(&mut self, clip: &Clip, position: &FramePosition) {
        let unchanged = self
            .dispatched
            .is_some_and(|d| d.index == position.active_clip_index && d.clip_id == clip.id);
        if unchanged {
            return;
        }

        self.cancel_audio();
        let handle = match self.select_source(clip, position.local_secs) {
            Some(source) => match AudioSourceHandle::start(&mut self.engine, &source) {
                Ok(handle) => Some(handle),
                Err(e) => {
                    tracing::warn!(
                        clip_id = %clip.id,
                        error = %e,
                        "Audio playback failed, continuing silently"
                    );
                    None
                }
            },
            None => None,
        };

        tracing::debug!(
            index = position.active_clip_index,
            clip_id = %clip.id,
            speech = handle.is_some_and(|h| h.is_speech()),
            silent = handle.is_none(),
            "Clip audio dispatched"
        );
        self.dispatched = Some(Dispatched {
            index: position.active_clip_index,
            clip_id: clip.id,
            handle,
        });
    }

    /// Voiceover if it decodes, else speech of the narration, else silence.
    fn select_source(&mut self, clip: &Clip, local_secs: f64) -> Option<AudioSource> {
        if let Some(payload) = &clip.audio {
            match self.engine.decode(payload) {
                Ok(buffer) => {
                    return Some(AudioSource::Decoded {
                        buffer,
                        start_secs: local_secs,
                    });
                }
                Err(e) => {
                    tracing::warn!(
                        clip_id = %clip.id,
                        error = %e,
                        "Voiceover decode failed, falling back to speech"
                    );
                }
            }
        }

        let text = subtitle_text(&clip.clean_narration);
        if text.is_empty() {
            None
        } else {
            Some(AudioSource::SpeechFallback { text })
        }
    }

    fn cancel_audio(&mut self) {
        if let Some(dispatched) = self.dispatched.take() {
            if let Some(handle) = dispatched.handle {
                handle.stop(&mut self.engine);
            }
        }
    }
}

impl<C: Clock, E: AudioEngine> Drop for PlaybackScheduler<C, E> {
    fn drop(&mut self) {
        self.cancel_audio();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cueline_audio::{pcm, EngineEvent, NullAudioEngine};
    use cueline_common::clock::ManualClock;
    use cueline_project_model::AudioPayload;

    fn clip(id: u64, duration: f64, narration: &str) -> Clip {
        let mut clip = Clip::blank(ClipId(id), duration);
        clip.narration_text = narration.to_string();
        clip.clean_narration = narration.to_string();
        clip
    }

    fn scheduler() -> (ManualClock, PlaybackScheduler<ManualClock, NullAudioEngine>) {
        let clock = ManualClock::new();
        let scheduler = PlaybackScheduler::new(clock.clone(), NullAudioEngine::new());
        (clock, scheduler)
    }

    #[test]
    fn test_tick_follows_clock() {
        let clips = vec![clip(1, 5.0, "one"), clip(2, 3.0, "two")];
        let (clock, mut s) = scheduler();
        clock.set_ms(10_000.0);
        s.play(&clips);

        clock.advance_ms(6_000.0);
        let frame = s.tick(&clips).unwrap();
        assert_eq!(frame.playhead_secs, 6.0);
        assert_eq!(frame.position.active_clip_index, 1);
        assert_eq!(frame.position.local_secs, 1.0);
        assert_eq!(frame.state, PlaybackState::Playing);
    }

    #[test]
    fn test_auto_stop_clamps_at_end() {
        let clips = vec![clip(1, 5.0, "one")];
        let (clock, mut s) = scheduler();
        s.play(&clips);
        s.tick(&clips);
        clock.advance_ms(9_000.0);

        let frame = s.tick(&clips).unwrap();
        assert_eq!(frame.playhead_secs, 5.0);
        assert_eq!(frame.state, PlaybackState::Stopped);
        assert_eq!(s.engine().active_count(), 0);
    }

    #[test]
    fn test_play_at_end_restarts() {
        let clips = vec![clip(1, 5.0, "one")];
        let (_clock, mut s) = scheduler();
        s.seek(5.0);
        s.play(&clips);
        assert_eq!(s.tick(&clips).unwrap().playhead_secs, 0.0);
    }

    #[test]
    fn test_pause_keeps_playhead_and_stop_rewinds() {
        let clips = vec![clip(1, 5.0, "one")];
        let (clock, mut s) = scheduler();
        s.play(&clips);
        clock.advance_ms(2_000.0);
        s.tick(&clips);
        s.pause();
        assert_eq!(s.playhead(), 2.0);
        assert_eq!(s.engine().active_count(), 0);

        // Paused time does not count.
        clock.advance_ms(10_000.0);
        s.play(&clips);
        clock.advance_ms(1_000.0);
        assert_eq!(s.tick(&clips).unwrap().playhead_secs, 3.0);

        s.stop();
        assert_eq!(s.playhead(), 0.0);
        assert_eq!(s.state(), PlaybackState::Stopped);
    }

    #[test]
    fn test_seek_while_playing_reanchors() {
        let clips = vec![clip(1, 5.0, "one"), clip(2, 5.0, "two")];
        let (clock, mut s) = scheduler();
        s.play(&clips);
        clock.advance_ms(1_000.0);
        s.tick(&clips);

        s.seek(7.0);
        clock.advance_ms(500.0);
        let frame = s.tick(&clips).unwrap();
        assert_eq!(frame.playhead_secs, 7.5);
        assert_eq!(frame.position.clip_id, ClipId(2));
    }

    #[test]
    fn test_source_selection() {
        let mut voiced = clip(1, 5.0, "ignored");
        voiced.audio = Some(AudioPayload::new(pcm::encode(&[0i16; 500]), 100));
        let mut broken = clip(2, 5.0, "broken  audio ");
        broken.audio = Some(AudioPayload::new("AA=", 100));
        let silent = clip(3, 5.0, "");
        let clips = vec![voiced, broken, silent];

        let (clock, mut s) = scheduler();
        s.seek(2.0);
        s.play(&clips);
        s.tick(&clips);
        clock.advance_ms(4_000.0);
        s.tick(&clips);
        clock.advance_ms(5_000.0);
        s.tick(&clips);

        assert_eq!(
            s.engine().events(),
            &[
                EngineEvent::Play {
                    id: 1,
                    samples: 500,
                    start_sample: 200
                },
                EngineEvent::Stop { id: 1 },
                EngineEvent::Speak {
                    id: 2,
                    text: "broken audio".to_string()
                },
                EngineEvent::CancelSpeech { id: 2 },
            ]
        );
    }

    #[test]
    fn test_paused_tick_does_not_dispatch() {
        let clips = vec![clip(1, 5.0, "one")];
        let (_clock, mut s) = scheduler();
        s.seek(1.0);
        let frame = s.tick(&clips).unwrap();
        assert_eq!(frame.state, PlaybackState::Stopped);
        assert_eq!(frame.playhead_secs, 1.0);
        assert!(s.engine().events().is_empty());
    }

    #[test]
    fn test_empty_list() {
        let (_clock, mut s) = scheduler();
        s.play(&[]);
        assert_eq!(s.state(), PlaybackState::Stopped);
        assert!(s.tick(&[]).is_none());
    }
}
