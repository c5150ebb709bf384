//! Structural edits over the ordered clip list.
//!
//! Every operator consumes the list and returns the edited list. An unknown
//! clip id leaves the list untouched, since the clip may have been deleted
//! by an earlier edit in the same interaction.

use cueline_common::config::TimingConfig;
use cueline_project_model::{next_clip_id, Clip, ClipId, Marker};
use serde::{Deserialize, Serialize};

use crate::{cue, narration};

/// Direction for [`move_clip`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Towards the start of the sequence (-1).
    Earlier,
    /// Towards the end of the sequence (+1).
    Later,
}

impl Direction {
    /// Map a `-1`/`+1` step; anything else is not a direction.
    pub fn from_step(step: i32) -> Option<Self> {
        match step {
            -1 => Some(Self::Earlier),
            1 => Some(Self::Later),
            _ => None,
        }
    }
}

fn find(clips: &[Clip], id: ClipId, op: &str) -> Option<usize> {
    find_hinted(clips, None, id, op)
}

/// Check `hint` first, then fall back to scanning for `id`.
fn find_hinted(clips: &[Clip], hint: Option<usize>, id: ClipId, op: &str) -> Option<usize> {
    if let Some(index) = hint.filter(|&i| clips.get(i).is_some_and(|c| c.id == id)) {
        return Some(index);
    }
    let index = clips.iter().position(|c| c.id == id);
    if index.is_none() {
        tracing::debug!(clip_id = %id, op, "Edit target not found, ignoring");
    }
    index
}

/// Grow or shrink a clip by `delta_secs`, never below the duration floor.
///
/// Only this clip's duration changes. Its voiceover is dropped because the
/// audio no longer matches, and markers past the new end are clamped onto
/// it.
pub fn trim(clips: Vec<Clip>, id: ClipId, delta_secs: f64, timing: &TimingConfig) -> Vec<Clip> {
    trim_inner(clips, None, id, delta_secs, timing)
}

/// [`trim`] for pointer drags, which fire on every move event.
///
/// `index_hint` is where the caller last saw the clip; when it still holds
/// `id` the lookup is O(1). A stale hint falls back to the id search.
pub fn trim_at(
    clips: Vec<Clip>,
    index_hint: usize,
    id: ClipId,
    delta_secs: f64,
    timing: &TimingConfig,
) -> Vec<Clip> {
    trim_inner(clips, Some(index_hint), id, delta_secs, timing)
}

fn trim_inner(
    mut clips: Vec<Clip>,
    hint: Option<usize>,
    id: ClipId,
    delta_secs: f64,
    timing: &TimingConfig,
) -> Vec<Clip> {
    if !delta_secs.is_finite() {
        return clips;
    }
    let Some(index) = find_hinted(&clips, hint, id, "trim") else {
        return clips;
    };

    let clip = &mut clips[index];
    clip.duration_secs = (clip.duration_secs + delta_secs).max(timing.min_clip_secs);
    clip.audio = None;
    clip.clamp_markers();
    clips
}

/// Cut a clip in two at `offset_secs`, which must lie strictly inside it.
///
/// The narration is cut after the share of spoken characters proportional
/// to the offset, with no regard for word boundaries. Markers before the
/// offset stay on the left; the rest move right, shifted by the offset.
/// Cue tokens follow their markers, so re-parsing either half yields the
/// same marker count. Both halves lose the voiceover. The right half gets a
/// fresh id and neither half is floored to the minimum duration.
pub fn split(mut clips: Vec<Clip>, id: ClipId, offset_secs: f64) -> Vec<Clip> {
    let Some(index) = find(&clips, id, "split") else {
        return clips;
    };
    let duration = clips[index].duration_secs;
    if !(offset_secs > 0.0 && offset_secs < duration) {
        tracing::debug!(clip_id = %id, offset_secs, duration, "Split offset outside clip");
        return clips;
    }

    // Ordered so that left + right == duration exactly.
    let (left_secs, right_secs) = if offset_secs <= duration / 2.0 {
        let right = duration - offset_secs;
        (duration - right, right)
    } else {
        (offset_secs, duration - offset_secs)
    };

    let right_id = next_clip_id(&clips);
    let original = clips.remove(index);

    let (left_markers, right_markers): (Vec<Marker>, Vec<Marker>) = original
        .markers
        .iter()
        .partition(|m| m.time_secs < offset_secs);

    let clean: Vec<char> = original.clean_narration.chars().collect();
    let cut = cue::spoken_cut(&original.clean_narration, offset_secs / duration);
    let (left_text, right_text) =
        cue::split_narration(&original.narration_text, cut, left_markers.len());

    let mut left = Clip {
        id: original.id,
        title: original.title.clone(),
        narration_text: left_text,
        clean_narration: clean[..cut].iter().collect(),
        duration_secs: left_secs,
        markers: left_markers,
        audio: None,
        visual: original.visual.clone(),
    };

    let mut right = Clip {
        id: right_id,
        title: original.title,
        narration_text: right_text,
        clean_narration: clean[cut..].iter().collect(),
        duration_secs: right_secs,
        markers: right_markers
            .into_iter()
            .map(|m| Marker::new(m.id, m.time_secs - offset_secs))
            .collect(),
        audio: None,
        visual: original.visual,
    };
    left.clamp_markers();
    right.clamp_markers();

    clips.insert(index, right);
    clips.insert(index, left);
    clips
}

/// Swap a clip with its neighbour. No-op at either end.
pub fn move_clip(mut clips: Vec<Clip>, id: ClipId, direction: Direction) -> Vec<Clip> {
    let Some(index) = find(&clips, id, "move") else {
        return clips;
    };
    let target = match direction {
        Direction::Earlier => index.checked_sub(1),
        Direction::Later => Some(index + 1).filter(|&t| t < clips.len()),
    };
    if let Some(target) = target {
        clips.swap(index, target);
    }
    clips
}

/// Insert a deep copy with a fresh id right after the source clip.
pub fn duplicate(mut clips: Vec<Clip>, id: ClipId) -> Vec<Clip> {
    let Some(index) = find(&clips, id, "duplicate") else {
        return clips;
    };
    let mut copy = clips[index].clone();
    copy.id = next_clip_id(&clips);
    clips.insert(index + 1, copy);
    clips
}

/// Remove a clip.
pub fn delete(mut clips: Vec<Clip>, id: ClipId) -> Vec<Clip> {
    if let Some(index) = find(&clips, id, "delete") {
        clips.remove(index);
    }
    clips
}

/// Append an empty clip of the minimum duration.
pub fn add(mut clips: Vec<Clip>, timing: &TimingConfig) -> Vec<Clip> {
    let id = next_clip_id(&clips);
    clips.push(Clip::blank(id, timing.min_clip_secs));
    clips
}

/// Replace a clip's narration, re-deriving its timing.
pub fn edit_narration(
    mut clips: Vec<Clip>,
    id: ClipId,
    text: &str,
    timing: &TimingConfig,
) -> Vec<Clip> {
    if let Some(index) = find(&clips, id, "edit_narration") {
        narration::set_narration(&mut clips[index], text, timing);
    }
    clips
}

/// A serializable edit, for command streams and undo logs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditOp {
    Trim {
        clip_id: ClipId,
        delta_secs: f64,
        /// Where the caller last saw the clip, for O(1) drag updates.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        index_hint: Option<usize>,
    },
    Split { clip_id: ClipId, offset_secs: f64 },
    Move { clip_id: ClipId, direction: Direction },
    Duplicate { clip_id: ClipId },
    Delete { clip_id: ClipId },
    Add,
    SetNarration { clip_id: ClipId, text: String },
}

impl EditOp {
    /// Apply this edit to `clips`.
    pub fn apply(&self, clips: Vec<Clip>, timing: &TimingConfig) -> Vec<Clip> {
        match self {
            EditOp::Trim {
                clip_id,
                delta_secs,
                index_hint,
            } => trim_inner(clips, *index_hint, *clip_id, *delta_secs, timing),
            EditOp::Split { clip_id, offset_secs } => split(clips, *clip_id, *offset_secs),
            EditOp::Move { clip_id, direction } => move_clip(clips, *clip_id, *direction),
            EditOp::Duplicate { clip_id } => duplicate(clips, *clip_id),
            EditOp::Delete { clip_id } => delete(clips, *clip_id),
            EditOp::Add => add(clips, timing),
            EditOp::SetNarration { clip_id, text } => {
                edit_narration(clips, *clip_id, text, timing)
            }
        }
    }
}
