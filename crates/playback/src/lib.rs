//! Cueline Playback
//!
//! Real-time playback of a clip sequence:
//! - **Scheduler:** Clock-anchored playhead with play/pause/stop/seek and
//!   edge-triggered audio dispatch per active clip
//! - **Driver:** Tokio interval loop ticking the scheduler until the
//!   sequence ends or a stop flag is raised

pub mod driver;
pub mod scheduler;

pub use driver::run_playback;
pub use scheduler::{Frame, PlaybackScheduler, PlaybackState};
