//! Attach placeholder voiceovers to clips without audio.

use std::path::PathBuf;

use cueline_audio::SilentVoice;
use cueline_common::config::AppConfig;
use cueline_sync_core::voiceover::attach_voiceovers;

use super::{load_timeline, save_timeline};

pub fn run(path: PathBuf, config: &AppConfig) -> anyhow::Result<()> {
    let mut timeline = load_timeline(&path)?;
    let mut voice = SilentVoice::new(config.timing.chars_per_second, config.playback.sample_rate);

    let report = attach_voiceovers(&mut timeline.clips, &mut voice, &config.timing);
    save_timeline(&timeline, &path)?;

    println!("Voiceovers attached: {}", report.voiced.len());
    println!("Skipped: {}", report.skipped.len());
    if !report.failed.is_empty() {
        println!("Failed:");
        for (id, reason) in &report.failed {
            println!("  - clip #{id}: {reason}");
        }
    }
    println!("Total duration: {:.2}s", timeline.total_duration());

    Ok(())
}
