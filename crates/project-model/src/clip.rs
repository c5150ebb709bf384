//! Clip, marker, and audio payload types.
//!
//! A clip's timing fields are derived state: `clean_narration`,
//! `duration_secs` and `markers` are recomputed from `narration_text` (and
//! from `audio` when present) by the sync core. This module only holds the
//! data and the checks that do not need the parser.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identity of a clip within its timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClipId(pub u64);

impl ClipId {
    /// The id following this one.
    pub fn next(self) -> ClipId {
        ClipId(self.0 + 1)
    }
}

impl fmt::Display for ClipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An animation cue point inside a clip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    /// Marker id, taken from the cue token or its ordinal.
    pub id: u32,

    /// Offset from the start of the clip, in seconds.
    #[serde(rename = "time")]
    pub time_secs: f64,
}

impl Marker {
    pub fn new(id: u32, time_secs: f64) -> Self {
        Self { id, time_secs }
    }
}

/// Voiceover audio attached to a clip: base64 mono PCM16 little-endian.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioPayload {
    /// Base64-encoded sample bytes.
    pub data: String,

    /// Samples per second.
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
}

/// Sample rate used by the voice synthesis service.
pub const DEFAULT_SAMPLE_RATE: u32 = 24_000;

fn default_sample_rate() -> u32 {
    DEFAULT_SAMPLE_RATE
}

impl AudioPayload {
    pub fn new(data: impl Into<String>, sample_rate: u32) -> Self {
        Self {
            data: data.into(),
            sample_rate,
        }
    }
}

/// One timed unit of the storyboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clip {
    /// Stable identity.
    pub id: ClipId,

    /// Display title.
    #[serde(default)]
    pub title: String,

    /// Raw narration, may contain inline cue tokens.
    #[serde(default)]
    pub narration_text: String,

    /// Narration with cue tokens removed.
    #[serde(default)]
    pub clean_narration: String,

    /// Clip length in seconds. Text-derived unless `audio` is present.
    pub duration_secs: f64,

    /// Cue markers, sorted by time and within `[0, duration_secs]`.
    #[serde(default)]
    pub markers: Vec<Marker>,

    /// Voiceover audio. Cleared whenever the narration or duration is edited.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<AudioPayload>,

    /// Visual description for the rendering layer. Never interpreted here.
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub visual: serde_json::Value,
}

impl Clip {
    /// A clip with no narration and the given duration.
    pub fn blank(id: ClipId, duration_secs: f64) -> Self {
        Self {
            id,
            title: String::new(),
            narration_text: String::new(),
            clean_narration: String::new(),
            duration_secs,
            markers: Vec::new(),
            audio: None,
            visual: serde_json::Value::Null,
        }
    }

    /// Whether the duration comes from attached audio.
    pub fn has_audio(&self) -> bool {
        self.audio.is_some()
    }

    /// Whether markers are sorted ascending and within `[0, duration_secs]`.
    pub fn markers_in_bounds(&self) -> bool {
        let sorted = self
            .markers
            .windows(2)
            .all(|pair| pair[0].time_secs <= pair[1].time_secs);
        let in_range = self
            .markers
            .iter()
            .all(|m| m.time_secs >= 0.0 && m.time_secs <= self.duration_secs);
        sorted && in_range
    }

    /// Clamp marker times into `[0, duration_secs]`, keeping their order.
    pub fn clamp_markers(&mut self) {
        let duration = self.duration_secs.max(0.0);
        for marker in &mut self.markers {
            marker.time_secs = marker.time_secs.clamp(0.0, duration);
        }
    }
}

/// A clip proposal from the generation provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClipStub {
    #[serde(default)]
    pub title: String,

    #[serde(default, alias = "narration")]
    pub narration_text: String,

    /// Provider's suggested duration in seconds.
    #[serde(default)]
    pub duration_hint: Option<f64>,

    #[serde(default)]
    pub visual: serde_json::Value,
}

/// First id not used by any clip in `clips`.
pub fn next_clip_id(clips: &[Clip]) -> ClipId {
    clips
        .iter()
        .map(|c| c.id)
        .max()
        .map(ClipId::next)
        .unwrap_or(ClipId(1))
}
