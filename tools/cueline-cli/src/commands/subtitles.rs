//! Export subtitles for a timeline.

use std::path::PathBuf;

use cueline_sync_core::subtitles::{
    render_subtitles, save_subtitles, subtitle_cues, SubtitleFormat,
};

use super::load_timeline;

pub fn run(path: PathBuf, output: Option<PathBuf>) -> anyhow::Result<()> {
    let timeline = load_timeline(&path)?;
    let cues = subtitle_cues(&timeline.clips);

    match output {
        Some(output) => {
            save_subtitles(&cues, &output)?;
            println!("Wrote {} cue(s) to {}", cues.len(), output.display());
        }
        None => print!("{}", render_subtitles(&cues, SubtitleFormat::Srt)),
    }

    Ok(())
}
