//! Turning generation-provider stubs into timed clips.

use cueline_common::config::TimingConfig;
use cueline_project_model::{Clip, ClipId, ClipStub};

use crate::duration::speaking_char_count;
use crate::narration::new_clip;

/// Build clips from provider stubs, numbering ids from 1.
///
/// Timing comes from the narration text. The provider's duration hint is
/// only consulted for stubs with nothing to say.
pub fn clips_from_stubs(stubs: Vec<ClipStub>, timing: &TimingConfig) -> Vec<Clip> {
    stubs
        .into_iter()
        .enumerate()
        .map(|(i, stub)| {
            let id = ClipId(i as u64 + 1);
            let mut clip = new_clip(id, stub.title, stub.narration_text, timing);
            clip.visual = stub.visual;

            if speaking_char_count(&clip.clean_narration) == 0 {
                if let Some(hint) = stub.duration_hint.filter(|h| h.is_finite()) {
                    clip.duration_secs = hint.max(timing.min_clip_secs);
                    clip.clamp_markers();
                }
            }
            tracing::debug!(
                clip_id = %clip.id,
                duration = clip.duration_secs,
                markers = clip.markers.len(),
                "Clip created from stub"
            );
            clip
        })
        .collect()
}
