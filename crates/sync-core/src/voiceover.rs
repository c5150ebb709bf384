//! Batch voiceover synthesis across a timeline.

use cueline_audio::VoiceSynthesizer;
use cueline_common::config::TimingConfig;
use cueline_project_model::{Clip, ClipId};
use serde::Serialize;

use crate::cue::subtitle_text;
use crate::narration::set_audio;

/// Outcome of [`attach_voiceovers`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VoiceoverReport {
    /// Clips that received a voiceover.
    pub voiced: Vec<ClipId>,
    /// Clips skipped because they already had audio or nothing to say.
    pub skipped: Vec<ClipId>,
    /// Clips whose synthesis or payload failed, with the reason.
    pub failed: Vec<(ClipId, String)>,
}

/// Synthesize and attach audio for every clip that has narration but no
/// voiceover yet. Failures are recorded and the batch carries on; failed
/// clips keep their text-derived timing.
pub fn attach_voiceovers<S: VoiceSynthesizer + ?Sized>(
    clips: &mut [Clip],
    synth: &mut S,
    timing: &TimingConfig,
) -> VoiceoverReport {
    let mut report = VoiceoverReport::default();

    for clip in clips.iter_mut() {
        let text = subtitle_text(&clip.clean_narration);
        if clip.has_audio() || text.is_empty() {
            report.skipped.push(clip.id);
            continue;
        }

        let result = synth
            .synthesize(&text)
            .and_then(|payload| set_audio(clip, payload, timing));

        match result {
            Ok(()) => report.voiced.push(clip.id),
            Err(e) => {
                tracing::warn!(clip_id = %clip.id, error = %e, "Voiceover failed");
                report.failed.push((clip.id, e.to_string()));
            }
        }
    }

    tracing::info!(
        voiced = report.voiced.len(),
        skipped = report.skipped.len(),
        failed = report.failed.len(),
        "Voiceover batch finished"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::narration::new_clip;
    use cueline_audio::{AudioError, AudioResult, SilentVoice};
    use cueline_project_model::AudioPayload;

    struct FlakyVoice {
        calls: usize,
    }

    impl VoiceSynthesizer for FlakyVoice {
        fn synthesize(&mut self, text: &str) -> AudioResult<AudioPayload> {
            self.calls += 1;
            if text.contains("fail") {
                Err(AudioError::engine("service unavailable"))
            } else {
                SilentVoice::new(2.0, 100).synthesize(text)
            }
        }
    }

    #[test]
    fn test_batch_voices_skips_and_reports_failures() {
        let timing = TimingConfig::default();
        let mut clips = vec![
            new_clip(ClipId(1), "", "abcdefghijklmnop", &timing),
            new_clip(ClipId(2), "", "[M]", &timing),
            new_clip(ClipId(3), "", "please fail", &timing),
        ];
        let mut voice = FlakyVoice { calls: 0 };

        let report = attach_voiceovers(&mut clips, &mut voice, &timing);

        assert_eq!(report.voiced, vec![ClipId(1)]);
        assert_eq!(report.skipped, vec![ClipId(2)]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, ClipId(3));
        assert_eq!(voice.calls, 2);

        // 16 chars at 2 chars/sec -> 8s of audio.
        assert!(clips[0].has_audio());
        assert_eq!(clips[0].duration_secs, 8.0);
        assert!(!clips[2].has_audio());

        // Second pass leaves voiced clips alone.
        let again = attach_voiceovers(&mut clips, &mut voice, &timing);
        assert!(again.skipped.contains(&ClipId(1)));
    }
}
