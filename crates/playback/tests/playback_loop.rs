use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use cueline_audio::{EngineEvent, NullAudioEngine};
use cueline_common::clock::ManualClock;
use cueline_playback::{run_playback, PlaybackScheduler, PlaybackState};
use cueline_project_model::{Clip, ClipId};

fn clips() -> Vec<Clip> {
    [2.0, 3.0, 1.0]
        .iter()
        .enumerate()
        .map(|(i, d)| {
            let mut clip = Clip::blank(ClipId(i as u64 + 1), *d);
            clip.clean_narration = format!("clip number {}", i + 1);
            clip
        })
        .collect()
}

#[tokio::test]
async fn loop_runs_to_end_of_sequence() {
    let clips = clips();
    let clock = ManualClock::new();
    let mut scheduler = PlaybackScheduler::new(clock.clone(), NullAudioEngine::new());

    let mut frames = Vec::new();
    let ticks = run_playback(
        &mut scheduler,
        &clips,
        Duration::from_millis(1),
        Arc::new(AtomicBool::new(false)),
        |frame| {
            frames.push(*frame);
            clock.advance_ms(250.0);
        },
    )
    .await;

    assert_eq!(ticks, frames.len() as u64);
    assert_eq!(scheduler.state(), PlaybackState::Stopped);
    assert_eq!(scheduler.playhead(), 6.0);

    let last = frames.last().unwrap();
    assert_eq!(last.state, PlaybackState::Stopped);
    assert_eq!(last.position.active_clip_index, 2);

    let spoken: Vec<_> = scheduler
        .engine()
        .events()
        .iter()
        .filter_map(|e| match e {
            EngineEvent::Speak { text, .. } => Some(text.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(spoken, vec!["clip number 1", "clip number 2", "clip number 3"]);
    assert_eq!(scheduler.engine().active_count(), 0);
}

#[tokio::test]
async fn stop_flag_interrupts_and_keeps_playhead() {
    let clips = clips();
    let clock = ManualClock::new();
    let mut scheduler = PlaybackScheduler::new(clock.clone(), NullAudioEngine::new());
    let stop_flag = Arc::new(AtomicBool::new(false));

    let flag = stop_flag.clone();
    let ticks = run_playback(
        &mut scheduler,
        &clips,
        Duration::from_millis(1),
        stop_flag,
        |frame| {
            if frame.playhead_secs >= 2.5 {
                flag.store(true, Ordering::SeqCst);
            }
            clock.advance_ms(500.0);
        },
    )
    .await;

    assert_eq!(ticks, 6);
    assert_eq!(scheduler.state(), PlaybackState::Stopped);
    assert_eq!(scheduler.playhead(), 2.5);
    assert_eq!(scheduler.engine().active_count(), 0);
}

#[tokio::test]
async fn empty_timeline_returns_immediately() {
    let mut scheduler = PlaybackScheduler::new(ManualClock::new(), NullAudioEngine::new());
    let ticks = run_playback(
        &mut scheduler,
        &[],
        Duration::from_millis(30),
        Arc::new(AtomicBool::new(false)),
        |_| {},
    )
    .await;
    assert_eq!(ticks, 0);
}
