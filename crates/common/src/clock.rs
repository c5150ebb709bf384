//! Clock abstraction for playback timing.
//!
//! The playback scheduler never reads the wall clock directly. It asks an
//! injected [`Clock`] for the current time in milliseconds, which lets tests
//! drive playback with a [`ManualClock`] instead of sleeping.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Source of monotonic time in milliseconds.
pub trait Clock {
    /// Milliseconds elapsed since an arbitrary but fixed origin.
    fn now_ms(&self) -> f64;
}

/// Monotonic clock anchored to the moment it was created.
#[derive(Debug, Clone)]
pub struct SystemClock {
    /// The instant the clock was started.
    epoch: Instant,

    /// Wall-clock time at epoch (ISO 8601 string).
    epoch_wall: String,
}

impl SystemClock {
    /// Create a new clock anchored to now.
    pub fn start() -> Self {
        Self {
            epoch: Instant::now(),
            epoch_wall: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Wall-clock time at clock start.
    pub fn epoch_wall(&self) -> &str {
        &self.epoch_wall
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::start()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64() * 1000.0
    }
}

/// Hand-driven clock for deterministic tests and offline simulation.
///
/// Clones share the same underlying time, so a test can keep one handle
/// and give another to the scheduler.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    micros: Arc<AtomicU64>,
}

impl ManualClock {
    /// Create a clock reading zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the current time.
    pub fn set_ms(&self, ms: f64) {
        self.micros.store(ms_to_micros(ms), Ordering::SeqCst);
    }

    /// Move the clock forward.
    pub fn advance_ms(&self, ms: f64) {
        self.micros.fetch_add(ms_to_micros(ms), Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.micros.load(Ordering::SeqCst) as f64 / 1000.0
    }
}

fn ms_to_micros(ms: f64) -> u64 {
    (ms.max(0.0) * 1000.0).round() as u64
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> f64 {
        (**self).now_ms()
    }
}

impl<C: Clock + ?Sized> Clock for Box<C> {
    fn now_ms(&self) -> f64 {
        (**self).now_ms()
    }
}

/// Tick period controller for the playback loop.
#[derive(Debug)]
pub struct TickRate {
    interval_ms: f64,
    last_tick_ms: Option<f64>,
}

impl TickRate {
    /// Create a controller with the given tick period in milliseconds.
    pub fn from_interval_ms(interval_ms: u64) -> Self {
        Self {
            interval_ms: interval_ms.max(1) as f64,
            last_tick_ms: None,
        }
    }

    /// Check if enough time has passed for the next tick.
    /// Returns true and updates internal state if ready.
    /// The first call always returns true.
    pub fn should_tick(&mut self, now_ms: f64) -> bool {
        match self.last_tick_ms {
            None => {
                self.last_tick_ms = Some(now_ms);
                true
            }
            Some(last) if now_ms >= last + self.interval_ms => {
                self.last_tick_ms = Some(now_ms);
                true
            }
            _ => false,
        }
    }

    /// Tick period as a [`Duration`].
    pub fn interval(&self) -> Duration {
        Duration::from_micros((self.interval_ms * 1000.0) as u64)
    }
}
