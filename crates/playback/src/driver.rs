//! Real-time tick loop around [`PlaybackScheduler`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use cueline_audio::AudioEngine;
use cueline_common::clock::Clock;
use cueline_project_model::Clip;
use tokio::time::MissedTickBehavior;

use crate::scheduler::{Frame, PlaybackScheduler};

/// Play `clips` from the scheduler's current playhead until the sequence
/// ends or `stop_flag` is raised, calling `on_frame` once per tick.
///
/// Late ticks are skipped rather than bunched. The scheduler is paused on
/// exit so no audio outlives the loop. Returns the number of ticks run.
pub async fn run_playback<C, E, F>(
    scheduler: &mut PlaybackScheduler<C, E>,
    clips: &[Clip],
    period: Duration,
    stop_flag: Arc<AtomicBool>,
    mut on_frame: F,
) -> u64
where
    C: Clock,
    E: AudioEngine,
    F: FnMut(&Frame),
{
    let mut interval = tokio::time::interval(period.max(Duration::from_millis(1)));
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    if !scheduler.is_playing() {
        scheduler.play(clips);
    }
    tracing::info!(
        period_ms = period.as_millis() as u64,
        clips = clips.len(),
        "Playback loop started"
    );

    let mut ticks = 0u64;
    while scheduler.is_playing() {
        interval.tick().await;
        if stop_flag.load(Ordering::Relaxed) {
            tracing::info!(playhead = scheduler.playhead(), "Playback interrupted");
            break;
        }

        ticks += 1;
        if let Some(frame) = scheduler.tick(clips) {
            on_frame(&frame);
        }
    }

    scheduler.pause();
    tracing::info!(ticks, playhead = scheduler.playhead(), "Playback loop stopped");
    ticks
}
