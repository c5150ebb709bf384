//! Text-derived clip duration.

use cueline_common::config::TimingConfig;

/// Characters that take speaking time: letters, digits, CJK ideographs.
pub fn speaking_char_count(text: &str) -> usize {
    text.chars().filter(|c| c.is_alphanumeric()).count()
}

/// Provisional duration for clean narration, in whole seconds.
///
/// `ceil(chars / chars_per_second)`, never below `min_clip_secs`.
pub fn estimate_duration(clean_text: &str, timing: &TimingConfig) -> f64 {
    let chars = speaking_char_count(clean_text) as f64;
    let secs = (chars / timing.chars_per_second).ceil();
    if secs.is_finite() {
        secs.max(timing.min_clip_secs)
    } else {
        timing.min_clip_secs
    }
}

/// [`estimate_duration`] with the default speaking rate and floor.
pub fn calculate_duration(clean_text: &str) -> f64 {
    estimate_duration(clean_text, &TimingConfig::default())
}
