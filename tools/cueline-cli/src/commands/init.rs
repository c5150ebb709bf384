//! Create a timeline from clip stubs.

use std::path::PathBuf;

use cueline_common::config::AppConfig;
use cueline_common::error::CuelineError;
use cueline_project_model::{ClipStub, Timeline};
use cueline_sync_core::storyboard::clips_from_stubs;

use super::save_timeline;

pub fn run(path: PathBuf, stubs: PathBuf, force: bool, config: &AppConfig) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
    }

    let content = std::fs::read_to_string(&stubs)
        .map_err(|e| anyhow::anyhow!("Failed to read stubs {}: {e}", stubs.display()))?;
    let stubs: Vec<ClipStub> = serde_json::from_str(&content)
        .map_err(|e| CuelineError::parse(format!("invalid clip stubs: {e}")))?;

    let clips = clips_from_stubs(stubs, &config.timing);
    let timeline = Timeline::from_clips(clips);
    save_timeline(&timeline, &path)?;

    println!("Created timeline at {}", path.display());
    println!("  Clips: {}", timeline.len());
    println!("  Total duration: {:.2}s", timeline.total_duration());
    for clip in &timeline.clips {
        println!(
            "  #{} {:<24} {:>6.2}s  {} marker(s)",
            clip.id,
            clip.title,
            clip.duration_secs,
            clip.markers.len()
        );
    }

    Ok(())
}
