//! Cue token parsing and proportional marker alignment.
//!
//! Narration carries inline cue tokens such as `[M]`, `[M2]` or `[M:2]`
//! marking where the next batch of visual elements should appear. Parsing
//! strips the tokens and places one marker per token at a time proportional
//! to how much narration precedes it.
//!
//! Alignment counts spoken characters: a run of whitespace counts once, so
//! the double space left behind by `"Hello [M] World"` does not stretch the
//! timing.

use std::sync::OnceLock;

use cueline_common::config::TimingConfig;
use cueline_project_model::Marker;
use regex::Regex;

use crate::duration::estimate_duration;

/// Clean text and aligned markers for one narration.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedNarration {
    /// Narration with cue tokens removed, otherwise untouched.
    pub clean_text: String,

    /// One marker per cue token, in text order.
    pub markers: Vec<Marker>,

    /// Duration the markers were aligned against.
    pub duration_secs: f64,
}

fn cue_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        // [M], [m], [M3], [M:3], [M: 3]
        Regex::new(r"(?i)\[m(?::\s*)?(\d+)?\]").expect("cue token pattern is valid")
    })
}

/// Counts characters with whitespace runs collapsed, across several pushes.
#[derive(Debug, Default, Clone, Copy)]
struct SpokenCounter {
    count: usize,
    prev_whitespace: bool,
}

impl SpokenCounter {
    fn push_char(&mut self, c: char) {
        let ws = c.is_whitespace();
        if !(ws && self.prev_whitespace) {
            self.count += 1;
        }
        self.prev_whitespace = ws;
    }

    fn push(&mut self, text: &str) {
        text.chars().for_each(|c| self.push_char(c));
    }
}

/// Number of spoken characters in `text` (whitespace runs count once).
pub fn spoken_len(text: &str) -> usize {
    let mut counter = SpokenCounter::default();
    counter.push(text);
    counter.count
}

/// Split narration into clean text and markers aligned to `duration_secs`.
///
/// A non-positive `duration_secs` means "derive it from the text" using the
/// duration estimator.
pub fn parse_narration(text: &str, duration_secs: f64, timing: &TimingConfig) -> ParsedNarration {
    let mut clean_text = String::with_capacity(text.len());
    let mut counter = SpokenCounter::default();
    let mut positions: Vec<(u32, usize)> = Vec::new();
    let mut last = 0;

    for (ordinal, caps) in cue_pattern().captures_iter(text).enumerate() {
        let Some(token) = caps.get(0) else { continue };
        let segment = &text[last..token.start()];
        clean_text.push_str(segment);
        counter.push(segment);

        let ordinal_id = u32::try_from(ordinal + 1).unwrap_or(u32::MAX);
        let id = caps
            .get(1)
            .and_then(|m| m.as_str().parse::<u32>().ok())
            .unwrap_or(ordinal_id);
        positions.push((id, counter.count));
        last = token.end();
    }
    let tail = &text[last..];
    clean_text.push_str(tail);
    counter.push(tail);

    let duration_secs = if duration_secs > 0.0 {
        duration_secs
    } else {
        estimate_duration(&clean_text, timing)
    };

    let total = counter.count;
    let markers = positions
        .into_iter()
        .map(|(id, position)| {
            let time = if total == 0 {
                0.0
            } else {
                round2(position as f64 / total as f64 * duration_secs)
            };
            Marker::new(id, time.clamp(0.0, duration_secs))
        })
        .collect();

    ParsedNarration {
        clean_text,
        markers,
        duration_secs,
    }
}

/// Remove every cue token from `text`.
pub fn strip_cues(text: &str) -> String {
    cue_pattern().replace_all(text, "").into_owned()
}

/// Clean narration as it should be shown or spoken: tokens stripped,
/// whitespace runs collapsed, ends trimmed.
pub fn subtitle_text(text: &str) -> String {
    strip_cues(text).split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Character index in `clean` where a cut at `fraction` of its speaking
/// time falls.
///
/// This inverts the alignment mapping: the cut lands after
/// `round(fraction * spoken_len)` spoken characters. Extra whitespace in a
/// run stays on the right.
pub fn spoken_cut(clean: &str, fraction: f64) -> usize {
    let total = spoken_len(clean);
    let target = ((fraction.clamp(0.0, 1.0) * total as f64).round() as usize).min(total);

    let mut counter = SpokenCounter::default();
    for (index, c) in clean.chars().enumerate() {
        if counter.count >= target {
            return index;
        }
        counter.push_char(c);
    }
    clean.chars().count()
}

/// Split raw narration so that the clean text of the left part holds
/// exactly `clean_chars` characters.
///
/// The first `left_tokens` cue tokens go left and the rest go right,
/// wherever they sit relative to the cut. A left token past the cut is
/// appended to the left part; a right token before it opens the right part.
pub fn split_narration(text: &str, clean_chars: usize, left_tokens: usize) -> (String, String) {
    let mut parts = (String::new(), String::new());
    let mut remaining = clean_chars;
    let mut last = 0;

    for (ordinal, token) in cue_pattern().find_iter(text).enumerate() {
        push_segment(&text[last..token.start()], &mut remaining, &mut parts);
        let side = if ordinal < left_tokens {
            &mut parts.0
        } else {
            &mut parts.1
        };
        side.push_str(token.as_str());
        last = token.end();
    }
    push_segment(&text[last..], &mut remaining, &mut parts);

    parts
}

/// Send up to `remaining` characters of `segment` left and the rest right.
fn push_segment(segment: &str, remaining: &mut usize, (left, right): &mut (String, String)) {
    let at = byte_offset(segment, *remaining);
    left.push_str(&segment[..at]);
    right.push_str(&segment[at..]);
    *remaining = remaining.saturating_sub(segment[..at].chars().count());
}

/// Byte offset of the `chars`-th character of `s`, or `s.len()`.
fn byte_offset(s: &str, chars: usize) -> usize {
    s.char_indices().nth(chars).map(|(i, _)| i).unwrap_or(s.len())
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn timing() -> TimingConfig {
        TimingConfig::default()
    }

    #[test]
    fn test_worked_example_hello_world() {
        let parsed = parse_narration("Hello [M] World", 10.0, &timing());
        assert_eq!(parsed.clean_text, "Hello  World");
        assert_eq!(spoken_len(&parsed.clean_text), 11);
        assert_eq!(parsed.markers.len(), 1);
        assert!((parsed.markers[0].time_secs - 5.45).abs() < 1e-9);
        assert_eq!(parsed.markers[0].id, 1);
    }

    #[test]
    fn test_no_tokens_yields_no_markers() {
        let parsed = parse_narration("Just narration.", 4.0, &timing());
        assert_eq!(parsed.clean_text, "Just narration.");
        assert!(parsed.markers.is_empty());
        assert_eq!(parsed.duration_secs, 4.0);
    }

    #[test]
    fn test_empty_text() {
        let parsed = parse_narration("", 0.0, &timing());
        assert_eq!(parsed.clean_text, "");
        assert!(parsed.markers.is_empty());
        assert_eq!(parsed.duration_secs, timing().min_clip_secs);
    }

    #[test]
    fn test_consecutive_tokens_share_time() {
        let parsed = parse_narration("abcd[M][M]efgh", 8.0, &timing());
        assert_eq!(parsed.markers.len(), 2);
        assert_eq!(parsed.markers[0].time_secs, 4.0);
        assert_eq!(parsed.markers[1].time_secs, 4.0);
        assert_eq!(parsed.markers[0].id, 1);
        assert_eq!(parsed.markers[1].id, 2);
    }

    #[test]
    fn test_explicit_ids() {
        let parsed = parse_narration("[M:7]one [m3]two [M]three", 6.0, &timing());
        let ids: Vec<u32> = parsed.markers.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![7, 3, 3]);
        assert_eq!(parsed.markers[0].time_secs, 0.0);
        assert_eq!(parsed.clean_text, "one two three");
    }

    #[test]
    fn test_zero_duration_uses_estimate() {
        // 16 letters at 4 chars/sec -> 4s
        let parsed = parse_narration("abcdefgh[M]ijklmnop", 0.0, &timing());
        assert_eq!(parsed.duration_secs, 4.0);
        assert_eq!(parsed.markers[0].time_secs, 2.0);
    }

    #[test]
    fn test_only_tokens() {
        let parsed = parse_narration("[M][M]", 5.0, &timing());
        assert_eq!(parsed.clean_text, "");
        assert_eq!(parsed.markers.len(), 2);
        assert!(parsed.markers.iter().all(|m| m.time_secs == 0.0));
    }

    #[test]
    fn test_trailing_token_lands_on_duration() {
        let parsed = parse_narration("abc[M]", 5.559, &timing());
        assert_eq!(parsed.markers[0].time_secs, 5.559);
    }

    #[test]
    fn test_cjk_narration() {
        let parsed = parse_narration("你好[M]世界", 4.0, &timing());
        assert_eq!(parsed.clean_text, "你好世界");
        assert_eq!(parsed.markers[0].time_secs, 2.0);
    }

    #[test]
    fn test_subtitle_text() {
        assert_eq!(subtitle_text(" Hello [M] World\n[M2]"), "Hello World");
        assert_eq!(strip_cues("a[M:1]b"), "ab");
        assert_eq!(strip_cues("keep [x] and [Mx]"), "keep [x] and [Mx]");
    }

    #[test]
    fn test_split_narration_sends_tokens_by_count() {
        let (left, right) = split_narration("ab[M]cd[M]ef", 3, 1);
        assert_eq!(left, "ab[M]c");
        assert_eq!(right, "d[M]ef");

        // Token exactly at the cut follows its assignment.
        assert_eq!(split_narration("ab[M]cd", 2, 0), ("ab".into(), "[M]cd".into()));
        assert_eq!(split_narration("ab[M]cd", 2, 1), ("ab[M]".into(), "cd".into()));

        // Left token past the cut is appended to the left part.
        assert_eq!(split_narration("abc[M]def", 1, 1), ("a[M]".into(), "bcdef".into()));

        // Right token before the cut opens the right part.
        assert_eq!(split_narration("ab[M]cdef", 4, 0), ("abcd".into(), "[M]ef".into()));

        assert_eq!(split_narration("héllo", 2, 0), ("hé".into(), "llo".into()));
        assert_eq!(split_narration("abc", 10, 0), ("abc".into(), String::new()));
    }

    #[test]
    fn test_spoken_cut_skips_whitespace_runs() {
        // "Hello  World": 11 spoken characters, the doubled space counts once.
        let clean = "Hello  World";
        assert_eq!(spoken_cut(clean, 6.0 / 11.0), 6);
        assert_eq!(&clean[..6], "Hello ");
        assert_eq!(spoken_cut(clean, 7.0 / 11.0), 8);
        assert_eq!(spoken_cut(clean, 0.0), 0);
        assert_eq!(spoken_cut(clean, 1.0), 12);
        assert_eq!(spoken_cut("", 0.5), 0);
    }

    proptest! {
        #[test]
        fn markers_are_counted_sorted_and_bounded(
            parts in proptest::collection::vec("[a-z ]{0,12}", 1..8),
            duration in 0.5f64..120.0,
        ) {
            let text = parts.join("[M]");
            let parsed = parse_narration(&text, duration, &TimingConfig::default());
            prop_assert_eq!(parsed.markers.len(), parts.len() - 1);
            for pair in parsed.markers.windows(2) {
                prop_assert!(pair[0].time_secs <= pair[1].time_secs);
            }
            for marker in &parsed.markers {
                prop_assert!(marker.time_secs >= 0.0 && marker.time_secs <= duration);
            }
        }

        #[test]
        fn split_narration_partitions_clean_text_and_tokens(
            parts in proptest::collection::vec("[a-z ]{0,8}", 1..5),
            k in 0usize..40,
            t in 0usize..5,
        ) {
            let text = parts.join("[M]");
            let clean = strip_cues(&text);
            let tokens = parts.len() - 1;
            let k = k.min(clean.chars().count());
            let t = t.min(tokens);

            let (left, right) = split_narration(&text, k, t);
            prop_assert_eq!(strip_cues(&left).chars().count(), k);
            prop_assert_eq!(format!("{}{}", strip_cues(&left), strip_cues(&right)), clean);
            prop_assert_eq!(left.matches("[M]").count(), t);
            prop_assert_eq!(right.matches("[M]").count(), tokens - t);
        }
    }
}
