//! Subtitle export in SRT and VTT formats.

use std::fmt::Write as _;
use std::path::Path;

use cueline_common::error::CuelineResult;
use cueline_project_model::{start_offsets, Clip};
use serde::Serialize;

use crate::cue::subtitle_text;

/// One subtitle entry on the global timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubtitleCue {
    pub start_secs: f64,
    pub end_secs: f64,
    pub text: String,
}

/// One cue per clip with something to say, spanning the clip's interval.
pub fn subtitle_cues(clips: &[Clip]) -> Vec<SubtitleCue> {
    clips
        .iter()
        .zip(start_offsets(clips))
        .filter_map(|(clip, start)| {
            let text = subtitle_text(&clip.clean_narration);
            if text.is_empty() || clip.duration_secs <= 0.0 {
                return None;
            }
            Some(SubtitleCue {
                start_secs: start,
                end_secs: start + clip.duration_secs,
                text,
            })
        })
        .collect()
}

/// Subtitle file flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubtitleFormat {
    /// SubRip: numbered cues, `HH:MM:SS,mmm`.
    Srt,
    /// WebVTT: `WEBVTT` header, `HH:MM:SS.mmm`.
    Vtt,
}

impl SubtitleFormat {
    /// `.vtt` selects WebVTT; anything else is SRT.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("vtt") => Self::Vtt,
            _ => Self::Srt,
        }
    }

    fn millis_separator(self) -> char {
        match self {
            Self::Srt => ',',
            Self::Vtt => '.',
        }
    }

    /// Format a timeline position as a cue timestamp. Negative times print
    /// as zero; milliseconds are rounded.
    pub fn timestamp(self, secs: f64) -> String {
        let total_ms = (secs.max(0.0) * 1000.0).round() as u64;
        format!(
            "{:02}:{:02}:{:02}{}{:03}",
            total_ms / 3_600_000,
            (total_ms % 3_600_000) / 60_000,
            (total_ms % 60_000) / 1000,
            self.millis_separator(),
            total_ms % 1000,
        )
    }
}

/// Render cues as a subtitle file body.
pub fn render_subtitles(cues: &[SubtitleCue], format: SubtitleFormat) -> String {
    let mut out = String::new();
    if format == SubtitleFormat::Vtt {
        out.push_str("WEBVTT\n\n");
    }

    for (number, cue) in (1..).zip(cues) {
        if format == SubtitleFormat::Srt {
            let _ = writeln!(out, "{number}");
        }
        let _ = writeln!(
            out,
            "{} --> {}\n{}\n",
            format.timestamp(cue.start_secs),
            format.timestamp(cue.end_secs),
            cue.text
        );
    }
    out
}

/// Write subtitles to `path` in the format its extension names.
pub fn save_subtitles(cues: &[SubtitleCue], path: &Path) -> CuelineResult<()> {
    let format = SubtitleFormat::from_path(path);
    std::fs::write(path, render_subtitles(cues, format))?;
    tracing::info!(path = %path.display(), cues = cues.len(), ?format, "Subtitles written");
    Ok(())
}
