//! Parse cue tokens out of narration text.

use cueline_common::config::AppConfig;
use cueline_sync_core::cue::parse_narration;

pub fn run(
    text: String,
    duration: Option<f64>,
    json: bool,
    config: &AppConfig,
) -> anyhow::Result<()> {
    let parsed = parse_narration(&text, duration.unwrap_or(0.0), &config.timing);

    if json {
        let value = serde_json::json!({
            "clean_text": parsed.clean_text,
            "duration": parsed.duration_secs,
            "markers": parsed.markers,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("Clean text: {:?}", parsed.clean_text);
    println!(
        "Duration: {:.2}s{}",
        parsed.duration_secs,
        if duration.is_some() { "" } else { " (estimated)" }
    );
    if parsed.markers.is_empty() {
        println!("Markers: none");
    } else {
        println!("Markers:");
        for marker in &parsed.markers {
            println!("  [M{}] at {:.2}s", marker.id, marker.time_secs);
        }
    }

    Ok(())
}
