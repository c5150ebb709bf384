//! Consistency checks for loaded timelines.

use std::collections::HashSet;

use cueline_common::config::TimingConfig;
use cueline_project_model::Clip;

use crate::cue::strip_cues;
use crate::narration::audio_duration_secs;

/// Check that every clip's derived state agrees with its source fields.
///
/// Durations only need to be positive: split halves may sit below
/// `min_clip_secs`, which trim, add and the estimator enforce.
///
/// Returns a list of human-readable problems; empty means the timeline is
/// consistent.
pub fn validate_timeline(clips: &[Clip], timing: &TimingConfig) -> Vec<String> {
    let mut issues = Vec::new();
    let mut seen = HashSet::new();

    for (index, clip) in clips.iter().enumerate() {
        let label = format!("clip #{index} (id {})", clip.id);

        if !seen.insert(clip.id) {
            issues.push(format!("{label}: duplicate id"));
        }

        if !(clip.duration_secs.is_finite() && clip.duration_secs > 0.0) {
            issues.push(format!(
                "{label}: duration {} is not a positive number of seconds",
                clip.duration_secs
            ));
        }

        if !clip.markers.windows(2).all(|w| w[0].time_secs <= w[1].time_secs) {
            issues.push(format!("{label}: markers are not in time order"));
        }
        if clip
            .markers
            .iter()
            .any(|m| m.time_secs < 0.0 || m.time_secs > clip.duration_secs)
        {
            issues.push(format!("{label}: marker outside [0, duration]"));
        }

        if clip.clean_narration != strip_cues(&clip.narration_text) {
            issues.push(format!("{label}: clean narration is stale"));
        }

        if let Some(payload) = &clip.audio {
            match audio_duration_secs(payload, timing) {
                Ok(expected) if (expected - clip.duration_secs).abs() > f64::EPSILON => {
                    issues.push(format!(
                        "{label}: duration {} does not match voiceover ({expected}s)",
                        clip.duration_secs
                    ));
                }
                Ok(_) => {}
                Err(e) => issues.push(format!("{label}: unreadable voiceover: {e}")),
            }
        }
    }

    issues
}
