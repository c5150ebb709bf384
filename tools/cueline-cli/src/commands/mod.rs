pub mod edit;
pub mod estimate;
pub mod info;
pub mod init;
pub mod parse;
pub mod play;
pub mod probe;
pub mod resolve;
pub mod subtitles;
pub mod validate;
pub mod voiceover;

use std::path::Path;

use cueline_common::error::CuelineError;
use cueline_project_model::Timeline;

pub(crate) fn load_timeline(path: &Path) -> anyhow::Result<Timeline> {
    Timeline::load(path).map_err(|e| CuelineError::timeline(e.to_string()).into())
}

pub(crate) fn save_timeline(timeline: &Timeline, path: &Path) -> anyhow::Result<()> {
    timeline
        .save(path)
        .map_err(|e| anyhow::anyhow!("Failed to save timeline: {e}"))
}
