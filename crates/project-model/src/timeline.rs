//! The ordered clip sequence.
//!
//! Clip start offsets are never stored; they are prefix sums of the
//! preceding durations and are recomputed on demand.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::clip::{Clip, ClipId};

/// Schema version written to timeline files.
pub const TIMELINE_VERSION: &str = "1.0";

/// Ordered list of clips plus file metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    /// Schema version.
    pub version: String,

    /// Clips in playback order.
    #[serde(default)]
    pub clips: Vec<Clip>,
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Timeline {
    /// An empty timeline.
    pub fn new() -> Self {
        Self::from_clips(Vec::new())
    }

    pub fn from_clips(clips: Vec<Clip>) -> Self {
        Self {
            version: TIMELINE_VERSION.to_string(),
            clips,
        }
    }

    /// Sum of all clip durations.
    pub fn total_duration(&self) -> f64 {
        total_duration(&self.clips)
    }

    /// Start offset of every clip, in order.
    pub fn start_offsets(&self) -> Vec<f64> {
        start_offsets(&self.clips)
    }

    /// Start offset of the clip at `index`, or `None` if out of range.
    pub fn start_of(&self, index: usize) -> Option<f64> {
        if index >= self.clips.len() {
            return None;
        }
        Some(total_duration(&self.clips[..index]))
    }

    /// Index of the clip with the given id.
    pub fn position(&self, id: ClipId) -> Option<usize> {
        self.clips.iter().position(|c| c.id == id)
    }

    pub fn get(&self, id: ClipId) -> Option<&Clip> {
        self.clips.iter().find(|c| c.id == id)
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    /// Load a timeline from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TimelineError> {
        let path = path.as_ref().to_path_buf();
        let json = std::fs::read_to_string(&path).map_err(|e| TimelineError::IoError {
            path: path.clone(),
            source: e,
        })?;
        serde_json::from_str(&json).map_err(|e| TimelineError::ParseError { path, source: e })
    }

    /// Write the timeline as pretty JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), TimelineError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| TimelineError::IoError {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| TimelineError::ParseError {
            path: path.clone(),
            source: e,
        })?;
        std::fs::write(&path, json).map_err(|e| TimelineError::IoError { path, source: e })
    }
}

/// Sum of all clip durations.
pub fn total_duration(clips: &[Clip]) -> f64 {
    clips.iter().fold(0.0, |acc, c| acc + c.duration_secs)
}

/// Prefix sums of clip durations.
pub fn start_offsets(clips: &[Clip]) -> Vec<f64> {
    let mut offset = 0.0;
    clips
        .iter()
        .map(|clip| {
            let start = offset;
            offset += clip.duration_secs;
            start
        })
        .collect()
}

/// Errors that can occur when reading or writing timeline files.
#[derive(Debug, thiserror::Error)]
pub enum TimelineError {
    #[error("I/O error at {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Parse error in {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn timeline(durations: &[f64]) -> Timeline {
        Timeline::from_clips(
            durations
                .iter()
                .enumerate()
                .map(|(i, d)| Clip::blank(ClipId(i as u64 + 1), *d))
                .collect(),
        )
    }

    #[test]
    fn test_total_and_offsets() {
        let tl = timeline(&[5.0, 3.0, 4.0]);
        assert_eq!(tl.total_duration(), 12.0);
        assert_eq!(tl.start_offsets(), vec![0.0, 5.0, 8.0]);
        assert_eq!(tl.start_of(2), Some(8.0));
        assert_eq!(tl.start_of(3), None);
    }

    #[test]
    fn test_lookup_by_id() {
        let tl = timeline(&[1.0, 2.0]);
        assert_eq!(tl.position(ClipId(2)), Some(1));
        assert_eq!(tl.get(ClipId(1)).map(|c| c.duration_secs), Some(1.0));
        assert!(tl.get(ClipId(42)).is_none());
    }

    #[test]
    fn test_empty_timeline() {
        let tl = Timeline::new();
        assert!(tl.is_empty());
        assert_eq!(tl.total_duration(), 0.0);
        assert!(tl.start_offsets().is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let dir = std::env::temp_dir().join("cueline_test_timeline");
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("timeline.json");

        let tl = timeline(&[2.0, 6.0]);
        tl.save(&path).unwrap();
        let loaded = Timeline::load(&path).unwrap();
        assert_eq!(loaded, tl);
        assert_eq!(loaded.version, TIMELINE_VERSION);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_missing_file_reports_path() {
        let err = Timeline::load("/nonexistent/cueline/timeline.json").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/cueline/timeline.json"));
    }

    proptest! {
        #[test]
        fn offsets_are_prefix_sums(durations in proptest::collection::vec(0.0f64..60.0, 1..20)) {
            let tl = timeline(&durations);
            let offsets = tl.start_offsets();
            prop_assert_eq!(offsets[0], 0.0);
            for (i, offset) in offsets.iter().enumerate() {
                prop_assert_eq!(tl.start_of(i), Some(*offset));
            }
            let last = offsets.len() - 1;
            prop_assert_eq!(offsets[last] + durations[last], tl.total_duration());
        }
    }
}
