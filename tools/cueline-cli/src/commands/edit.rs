//! Apply an edit operation to a timeline file.

use std::path::PathBuf;

use cueline_common::config::AppConfig;
use cueline_sync_core::edit::EditOp;

use super::{load_timeline, save_timeline};

pub fn run(
    path: PathBuf,
    output: Option<PathBuf>,
    op: EditOp,
    config: &AppConfig,
) -> anyhow::Result<()> {
    let mut timeline = load_timeline(&path)?;
    let before = timeline.clips.clone();

    timeline.clips = op.apply(std::mem::take(&mut timeline.clips), &config.timing);
    tracing::info!(op = ?op, clips = timeline.len(), "Edit applied");

    if timeline.clips == before {
        println!("No change (unknown clip id or no-op edit).");
        return Ok(());
    }

    let target = output.unwrap_or(path);
    save_timeline(&timeline, &target)?;

    println!("Saved {}", target.display());
    println!("  Clips: {} (was {})", timeline.len(), before.len());
    println!("  Total duration: {:.2}s", timeline.total_duration());

    Ok(())
}
