//! Cueline Audio
//!
//! Voiceover handling for the playback layer:
//! - **PCM:** Base64 mono PCM16 decoding and a decode-free duration probe
//! - **Engine:** The [`AudioEngine`] capability the scheduler plays through,
//!   with decoded audio and speech synthesis as mutually exclusive sources
//! - **Voice:** The [`VoiceSynthesizer`] seam for the external TTS service

pub mod engine;
pub mod error;
pub mod pcm;
pub mod voice;

pub use engine::*;
pub use error::*;
pub use pcm::*;
pub use voice::*;
