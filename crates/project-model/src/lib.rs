//! Cueline Project Model
//!
//! Defines the core data contracts for a narrated storyboard:
//! - **Clip:** One timed unit of narration, optional voiceover audio, and
//!   opaque visual metadata, with its animation cue markers
//! - **Timeline:** The ordered clip sequence and its derived offsets
//! - **ClipStub:** Raw clip proposals produced by a generation provider
//!
//! All times are in seconds. Marker times are local to their clip; the
//! playhead is global over the concatenated sequence.

pub mod clip;
pub mod timeline;

pub use clip::*;
pub use timeline::*;
