//! Validate a timeline file.

use std::path::PathBuf;

use cueline_common::config::AppConfig;
use cueline_sync_core::validate::validate_timeline;

use super::load_timeline;

pub fn run(path: PathBuf, config: &AppConfig) -> anyhow::Result<()> {
    println!("Validating timeline at: {}", path.display());

    let timeline = load_timeline(&path)?;
    println!("  Version: {}", timeline.version);
    println!("  Clips: {}", timeline.len());
    println!("  Total duration: {:.2}s", timeline.total_duration());

    let errors = validate_timeline(&timeline.clips, &config.timing);
    if errors.is_empty() {
        println!("\nTimeline is valid.");
    } else {
        println!("\nValidation issues:");
        for error in &errors {
            println!("  - {error}");
        }
        println!(
            "\n{} issue(s) found. Re-run `cueline edit` or re-init to regenerate timing.",
            errors.len()
        );
    }

    Ok(())
}
