//! Cueline Sync Core
//!
//! The timing engine behind narrated storyboards:
//! - **Cues:** Parse `[M]` tokens out of narration and align markers
//! - **Duration:** Estimate clip length from speaking rate
//! - **Index:** Resolve the global playhead to a clip, local time and
//!   animation step
//! - **Narration:** Keep clip timing in sync with text and voiceover edits
//! - **Edit:** Trim, split, move, duplicate, delete and add clips
//! - **Export:** Storyboard ingestion, batch voiceovers, subtitles and
//!   consistency checks

pub mod cue;
pub mod duration;
pub mod edit;
pub mod index;
pub mod narration;
pub mod storyboard;
pub mod subtitles;
pub mod validate;
pub mod voiceover;

pub use cue::{parse_narration, strip_cues, subtitle_text, ParsedNarration};
pub use duration::{calculate_duration, estimate_duration};
pub use edit::{Direction, EditOp};
pub use index::{animation_step, locate, resolve, FramePosition, Resolved};
pub use narration::{clear_audio, new_clip, set_audio, set_narration};
pub use storyboard::clips_from_stubs;
pub use subtitles::{
    render_subtitles, save_subtitles, subtitle_cues, SubtitleCue, SubtitleFormat,
};
pub use validate::validate_timeline;
pub use voiceover::{attach_voiceovers, VoiceoverReport};
