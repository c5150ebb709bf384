//! Simulate real-time playback of a timeline.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use cueline_audio::NullAudioEngine;
use cueline_common::clock::{SystemClock, TickRate};
use cueline_common::config::AppConfig;
use cueline_common::error::CuelineError;
use cueline_playback::{run_playback, PlaybackScheduler};
use cueline_sync_core::cue::subtitle_text;

use super::load_timeline;

pub async fn run(path: PathBuf, from: f64, config: &AppConfig) -> anyhow::Result<()> {
    let timeline = load_timeline(&path)?;
    if timeline.is_empty() {
        return Err(CuelineError::playback("timeline has no clips").into());
    }

    let clock = SystemClock::start();
    tracing::debug!(epoch = clock.epoch_wall(), "Playback clock started");
    let mut scheduler = PlaybackScheduler::new(clock, NullAudioEngine::new());
    scheduler.seek(from);

    let stop_flag = Arc::new(AtomicBool::new(false));
    let flag = stop_flag.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            flag.store(true, Ordering::SeqCst);
        }
    });

    let tick_rate = TickRate::from_interval_ms(config.playback.tick_interval_ms);
    let mut progress = TickRate::from_interval_ms(1000);
    let mut last_shown = None;

    println!(
        "Playing {} ({} clips, {:.2}s). Press Ctrl+C to stop...",
        path.display(),
        timeline.len(),
        timeline.total_duration()
    );
    println!();

    let ticks = run_playback(
        &mut scheduler,
        &timeline.clips,
        tick_rate.interval(),
        stop_flag,
        |frame| {
            let pos = &frame.position;
            let key = (pos.active_clip_index, pos.animation_step);
            if last_shown != Some(key) {
                let clip = &timeline.clips[pos.active_clip_index];
                if last_shown.map(|(index, _)| index) != Some(pos.active_clip_index) {
                    println!(
                        "[{:>7.2}s] clip #{} \"{}\": {}",
                        frame.playhead_secs,
                        clip.id,
                        clip.title,
                        subtitle_text(&clip.clean_narration)
                    );
                }
                if pos.animation_step > 0 {
                    println!(
                        "[{:>7.2}s]   step {} of {}",
                        frame.playhead_secs,
                        pos.animation_step,
                        clip.markers.len()
                    );
                }
                last_shown = Some(key);
            } else if progress.should_tick(frame.playhead_secs * 1000.0) {
                tracing::debug!(playhead = frame.playhead_secs, "Playing");
            }
        },
    )
    .await;

    println!();
    println!(
        "Stopped at {:.2}s after {} tick(s), {} audio request(s).",
        scheduler.playhead(),
        ticks,
        scheduler.engine().events().len()
    );

    Ok(())
}
