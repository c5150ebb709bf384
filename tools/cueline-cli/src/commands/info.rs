//! Show timeline information.

use std::path::PathBuf;

use super::load_timeline;

pub fn run(path: PathBuf) -> anyhow::Result<()> {
    let timeline = load_timeline(&path)?;

    println!("Timeline: {}", path.display());
    println!("  Version: {}", timeline.version);
    println!("  Clips: {}", timeline.len());
    println!("  Total duration: {:.2}s", timeline.total_duration());
    println!();

    println!("Clips:");
    for (clip, start) in timeline.clips.iter().zip(timeline.start_offsets()) {
        let audio = match &clip.audio {
            Some(payload) => format!("voiceover @ {} Hz", payload.sample_rate),
            None => "speech fallback".to_string(),
        };
        println!(
            "  #{:<4} {:>7.2}s +{:<6.2} {:<24} {} marker(s), {}",
            clip.id,
            start,
            clip.duration_secs,
            clip.title,
            clip.markers.len(),
            audio
        );
    }

    Ok(())
}
