//! Keeping a clip's derived timing consistent with its narration and audio.
//!
//! - Editing narration drops the voiceover and re-derives clean text,
//!   duration and markers from the text.
//! - Attaching a voiceover makes its length authoritative: duration becomes
//!   the audio length rounded up to whole seconds and markers are re-aligned.

use cueline_audio::{pcm, AudioResult};
use cueline_common::config::TimingConfig;
use cueline_project_model::{AudioPayload, Clip, ClipId};

use crate::cue::parse_narration;

/// Build a clip whose timing is derived from `narration`.
pub fn new_clip(
    id: ClipId,
    title: impl Into<String>,
    narration: impl Into<String>,
    timing: &TimingConfig,
) -> Clip {
    let mut clip = Clip::blank(id, timing.min_clip_secs);
    clip.title = title.into();
    set_narration(&mut clip, narration, timing);
    clip
}

/// Replace the narration, clearing audio and re-deriving timing.
pub fn set_narration(clip: &mut Clip, narration: impl Into<String>, timing: &TimingConfig) {
    clip.narration_text = narration.into();
    if clip.audio.take().is_some() {
        tracing::debug!(clip_id = %clip.id, "Narration changed, voiceover cleared");
    }
    retime_from_text(clip, timing);
}

/// Attach a voiceover and resync duration and markers to it.
///
/// On a malformed payload the clip falls back to text-derived timing with no
/// audio and the error is returned.
pub fn set_audio(
    clip: &mut Clip,
    payload: AudioPayload,
    timing: &TimingConfig,
) -> AudioResult<()> {
    match audio_duration_secs(&payload, timing) {
        Ok(duration) => {
            let parsed = parse_narration(&clip.narration_text, duration, timing);
            clip.clean_narration = parsed.clean_text;
            clip.markers = parsed.markers;
            clip.duration_secs = duration;
            clip.audio = Some(payload);
            tracing::debug!(clip_id = %clip.id, duration, "Voiceover attached");
            Ok(())
        }
        Err(e) => {
            tracing::warn!(
                clip_id = %clip.id,
                error = %e,
                "Rejected voiceover, using text timing"
            );
            clear_audio(clip, timing);
            Err(e)
        }
    }
}

/// Drop the voiceover and return to text-derived timing.
pub fn clear_audio(clip: &mut Clip, timing: &TimingConfig) {
    clip.audio = None;
    retime_from_text(clip, timing);
}

/// Clip duration implied by a voiceover: whole seconds, rounded up, floored.
pub fn audio_duration_secs(payload: &AudioPayload, timing: &TimingConfig) -> AudioResult<f64> {
    let secs = pcm::payload_duration(payload)?;
    Ok(secs.ceil().max(timing.min_clip_secs))
}

fn retime_from_text(clip: &mut Clip, timing: &TimingConfig) {
    let parsed = parse_narration(&clip.narration_text, 0.0, timing);
    clip.clean_narration = parsed.clean_text;
    clip.markers = parsed.markers;
    clip.duration_secs = parsed.duration_secs;
}
