//! Resolve a playhead time against a timeline.

use std::path::PathBuf;

use cueline_sync_core::index::locate;

use super::load_timeline;

pub fn run(path: PathBuf, seconds: f64) -> anyhow::Result<()> {
    let timeline = load_timeline(&path)?;
    let Some(frame) = locate(seconds, &timeline.clips) else {
        println!("Timeline is empty.");
        return Ok(());
    };

    let clip = &timeline.clips[frame.active_clip_index];
    println!("Playhead {seconds:.2}s:");
    println!(
        "  Clip: #{} \"{}\" (index {})",
        frame.clip_id, clip.title, frame.active_clip_index
    );
    println!("  Clip start: {:.2}s", frame.clip_start_secs);
    println!("  Local time: {:.2}s of {:.2}s", frame.local_secs, clip.duration_secs);
    println!("  Animation step: {} of {}", frame.animation_step, clip.markers.len());

    Ok(())
}
