//! Time management for the simulation
//!
//! Simulated time is a virtual clock advanced from real elapsed time scaled by
//! a fixed speed multiplier. The simulation itself runs in discrete ticks of
//! one simulated second; the clock decides when the next tick is due.

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const MILLISECONDS_PER_SECOND: u64 = 1_000;
pub const MILLISECONDS_PER_DAY: u64 = MILLISECONDS_PER_SECOND * 60 * 60 * 24;

/// Length of one simulation tick in simulated milliseconds
pub const TICK_MILLIS: u64 = MILLISECONDS_PER_SECOND;

/// Latest simulated time the clock can represent (it counts microseconds)
pub const MAX_SIMULATED_MS: u64 = u64::MAX / 1_000;

/// Virtual clock driving the simulation
///
/// The clock keeps its own reading in microseconds so that sub-millisecond
/// real deltas multiplied by the speed factor still accumulate.
///
/// # Example
/// ```
/// use printer_queue_core::SimClock;
/// use std::time::Duration;
///
/// let mut clock = SimClock::new(0, 300);
/// assert!(!clock.should_tick());
///
/// clock.advance(Duration::from_millis(4)); // 1.2 simulated seconds
/// assert_eq!(clock.simulated_ms(), 1_200);
/// assert!(clock.should_tick());
/// assert!(!clock.should_tick());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimClock {
    /// Simulated time at construction (ms since epoch)
    start_ms: u64,

    /// Current simulated time (µs since epoch)
    simulated_us: u64,

    /// Last tick boundary handed out by `should_tick` (ms since epoch)
    last_tick_ms: u64,

    /// Simulated time per unit of real time
    speed_multiplier: u32,
}

impl SimClock {
    /// Create a clock reading `start_ms`
    ///
    /// # Panics
    /// Panics if `speed_multiplier` is zero
    pub fn new(start_ms: u64, speed_multiplier: u32) -> Self {
        assert!(speed_multiplier > 0, "speed_multiplier must be positive");
        Self {
            start_ms,
            simulated_us: start_ms.saturating_mul(1_000),
            last_tick_ms: start_ms,
            speed_multiplier,
        }
    }

    /// Convert a real-time delta into simulated time and add it
    ///
    /// The reading never moves backwards; on overflow it saturates.
    pub fn advance(&mut self, real_elapsed: Duration) {
        let real_us = u64::try_from(real_elapsed.as_micros()).unwrap_or(u64::MAX);
        let simulated_delta = real_us.saturating_mul(u64::from(self.speed_multiplier));
        self.simulated_us = self.simulated_us.saturating_add(simulated_delta);
    }

    /// Returns true at most once per simulated second
    ///
    /// When a tick is due the boundary moves forward by exactly one tick, not
    /// by the observed delta, so the tick grid stays fixed under irregular
    /// sampling.
    pub fn should_tick(&mut self) -> bool {
        if self.simulated_ms().saturating_sub(self.last_tick_ms) >= TICK_MILLIS {
            self.last_tick_ms += TICK_MILLIS;
            true
        } else {
            false
        }
    }

    /// Current simulated time in milliseconds since the epoch
    pub fn simulated_ms(&self) -> u64 {
        self.simulated_us / 1_000
    }

    /// Simulated time the clock was created with
    pub fn start_ms(&self) -> u64 {
        self.start_ms
    }

    /// Simulated milliseconds elapsed since the clock was created
    pub fn elapsed_ms(&self) -> u64 {
        self.simulated_ms().saturating_sub(self.start_ms)
    }

    /// Last tick boundary handed out
    pub fn last_tick_ms(&self) -> u64 {
        self.last_tick_ms
    }

    /// Current simulated time of day as `HH:MM:SS`
    pub fn time_of_day(&self) -> String {
        format_time_of_day(self.simulated_ms())
    }
}

/// Render a timestamp as `HH:MM:SS` within its day
///
/// # Example
/// ```
/// use printer_queue_core::core::time::format_time_of_day;
///
/// assert_eq!(format_time_of_day(0), "00:00:00");
/// assert_eq!(format_time_of_day(3_723_000), "01:02:03");
/// assert_eq!(format_time_of_day(86_400_000 + 61_000), "00:01:01");
/// ```
pub fn format_time_of_day(timestamp_ms: u64) -> String {
    let today = timestamp_ms % MILLISECONDS_PER_DAY;
    let total_seconds = today / MILLISECONDS_PER_SECOND;
    let hours = total_seconds / 3_600;
    let minutes = (total_seconds % 3_600) / 60;
    let seconds = total_seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}
