//! Measure a base64 PCM16 payload.

use std::path::PathBuf;

use cueline_audio::pcm;
use cueline_common::config::AppConfig;
use cueline_project_model::AudioPayload;
use cueline_sync_core::narration::audio_duration_secs;

pub fn run(path: PathBuf, sample_rate: Option<u32>, config: &AppConfig) -> anyhow::Result<()> {
    let data = std::fs::read_to_string(&path)
        .map_err(|e| anyhow::anyhow!("Failed to read payload {}: {e}", path.display()))?;
    let rate = sample_rate.unwrap_or(config.playback.sample_rate);
    let payload = AudioPayload::new(data.trim(), rate);

    let secs = pcm::payload_duration(&payload)?;
    let clip_secs = audio_duration_secs(&payload, &config.timing)?;

    println!("Payload: {}", path.display());
    println!("  Sample rate: {} Hz", payload.sample_rate);
    println!("  Bytes: {}", pcm::decoded_byte_len(&payload.data)?);
    println!("  Duration: {secs:.3}s");
    println!("  Clip duration: {clip_secs}s");

    Ok(())
}
