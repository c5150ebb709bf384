//! Mapping the global playhead onto the clip sequence.

use cueline_project_model::{Clip, ClipId};
use serde::Serialize;

/// The clip under the playhead.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolved<'a> {
    pub clip_index: usize,
    pub clip: &'a Clip,
    /// Global time at which the clip starts.
    pub clip_start_secs: f64,
    /// Playhead relative to the clip start, within `[0, clip.duration_secs]`.
    pub local_secs: f64,
}

/// Find the clip whose `[start, start + duration)` interval contains
/// `playhead_secs`.
///
/// At or past the end of the sequence the last clip is returned with its
/// local time clamped to its duration. Negative or NaN playheads resolve as
/// zero. Returns `None` only for an empty list.
pub fn resolve(playhead_secs: f64, clips: &[Clip]) -> Option<Resolved<'_>> {
    let playhead = if playhead_secs.is_nan() {
        0.0
    } else {
        playhead_secs.max(0.0)
    };

    let mut start = 0.0;
    for (clip_index, clip) in clips.iter().enumerate() {
        let end = start + clip.duration_secs;
        if playhead < end {
            return Some(Resolved {
                clip_index,
                clip,
                clip_start_secs: start,
                local_secs: (playhead - start).clamp(0.0, clip.duration_secs.max(0.0)),
            });
        }
        start = end;
    }

    let clip_index = clips.len().checked_sub(1)?;
    let clip = &clips[clip_index];
    Some(Resolved {
        clip_index,
        clip,
        clip_start_secs: start - clip.duration_secs,
        local_secs: clip.duration_secs,
    })
}

/// Number of markers already reached at `local_secs`.
pub fn animation_step(clip: &Clip, local_secs: f64) -> usize {
    clip.markers.partition_point(|m| m.time_secs <= local_secs)
}

/// What the rendering layer needs for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FramePosition {
    pub active_clip_index: usize,
    pub clip_id: ClipId,
    pub clip_start_secs: f64,
    pub local_secs: f64,
    pub animation_step: usize,
}

/// [`resolve`] plus [`animation_step`] in one call.
pub fn locate(playhead_secs: f64, clips: &[Clip]) -> Option<FramePosition> {
    resolve(playhead_secs, clips).map(|r| FramePosition {
        active_clip_index: r.clip_index,
        clip_id: r.clip.id,
        clip_start_secs: r.clip_start_secs,
        local_secs: r.local_secs,
        animation_step: animation_step(r.clip, r.local_secs),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cueline_project_model::{total_duration, Marker};
    use proptest::prelude::*;

    fn clips(durations: &[f64]) -> Vec<Clip> {
        durations
            .iter()
            .enumerate()
            .map(|(i, d)| Clip::blank(ClipId(i as u64 + 1), *d))
            .collect()
    }

    #[test]
    fn test_worked_example_resolve() {
        let clips = clips(&[5.0, 3.0, 4.0]);
        let r = resolve(6.0, &clips).unwrap();
        assert_eq!(r.clip_index, 1);
        assert_eq!(r.clip_start_secs, 5.0);
        assert_eq!(r.local_secs, 1.0);
    }

    #[test]
    fn test_boundaries_are_half_open() {
        let clips = clips(&[5.0, 3.0, 4.0]);
        assert_eq!(resolve(0.0, &clips).unwrap().clip_index, 0);
        assert_eq!(resolve(5.0, &clips).unwrap().clip_index, 1);
        assert_eq!(resolve(8.0, &clips).unwrap().clip_index, 2);
    }

    #[test]
    fn test_end_of_sequence_is_terminal() {
        let clips = clips(&[5.0, 3.0, 4.0]);
        for t in [12.0, 20.0, f64::INFINITY] {
            let r = resolve(t, &clips).unwrap();
            assert_eq!(r.clip_index, 2);
            assert_eq!(r.clip_start_secs, 8.0);
            assert_eq!(r.local_secs, 4.0);
        }
    }

    #[test]
    fn test_negative_and_nan_playhead() {
        let clips = clips(&[2.0]);
        assert_eq!(resolve(-3.0, &clips).unwrap().local_secs, 0.0);
        assert_eq!(resolve(f64::NAN, &clips).unwrap().local_secs, 0.0);
    }

    #[test]
    fn test_empty_list() {
        assert!(resolve(1.0, &[]).is_none());
        assert!(locate(1.0, &[]).is_none());
    }

    #[test]
    fn test_zero_length_clip_is_skipped() {
        let clips = clips(&[2.0, 0.0, 3.0]);
        assert_eq!(resolve(2.0, &clips).unwrap().clip_index, 2);
    }

    #[test]
    fn test_animation_step_counts_reached_markers() {
        let mut clip = Clip::blank(ClipId(1), 10.0);
        clip.markers = vec![
            Marker::new(1, 2.0),
            Marker::new(2, 2.0),
            Marker::new(3, 7.5),
        ];
        assert_eq!(animation_step(&clip, 0.0), 0);
        assert_eq!(animation_step(&clip, 1.99), 0);
        assert_eq!(animation_step(&clip, 2.0), 2);
        assert_eq!(animation_step(&clip, 7.5), 3);
        assert_eq!(animation_step(&clip, 10.0), 3);
    }

    #[test]
    fn test_locate() {
        let mut clips = clips(&[4.0, 4.0]);
        clips[1].markers = vec![Marker::new(1, 1.0)];
        let frame = locate(5.5, &clips).unwrap();
        assert_eq!(frame.active_clip_index, 1);
        assert_eq!(frame.clip_id, ClipId(2));
        assert_eq!(frame.animation_step, 1);
    }

    proptest! {
        #[test]
        fn resolve_stays_in_range(
            durations in proptest::collection::vec(0.1f64..30.0, 1..12),
            fraction in 0.0f64..1.0,
        ) {
            let clips = clips(&durations);
            let total = total_duration(&clips);
            let playhead = fraction * total;
            let r = resolve(playhead, &clips).unwrap();
            prop_assert!(r.clip_index < clips.len());
            prop_assert!(r.local_secs >= 0.0);
            prop_assert!(r.local_secs <= r.clip.duration_secs);

            let end = resolve(total, &clips).unwrap();
            prop_assert_eq!(end.clip_index, clips.len() - 1);
            prop_assert_eq!(end.local_secs, end.clip.duration_secs);
        }
    }
}
