//! Estimate narration duration.

use cueline_common::config::AppConfig;
use cueline_sync_core::cue::strip_cues;
use cueline_sync_core::duration::{estimate_duration, speaking_char_count};

pub fn run(text: String, config: &AppConfig) -> anyhow::Result<()> {
    let clean = strip_cues(&text);
    let chars = speaking_char_count(&clean);
    let secs = estimate_duration(&clean, &config.timing);

    println!("Speaking characters: {chars}");
    println!(
        "Rate: {} chars/s (minimum {}s)",
        config.timing.chars_per_second, config.timing.min_clip_secs
    );
    println!("Estimated duration: {secs}s");

    Ok(())
}
