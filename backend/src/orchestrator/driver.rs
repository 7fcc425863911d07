//! Simulation driver - samples real time and feeds it to the orchestrator
//!
//! The driver owns no simulation state. It loops until simulated time reaches
//! the configured end, advancing the orchestrator by the real time that passed
//! since the previous sample, and pauses briefly between samples to bound CPU
//! use. Where real time comes from is a [`RealTimeSource`]: the wall clock in
//! production, a fixed step in tests.

use crate::orchestrator::engine::{Orchestrator, SimulationError};
use crate::orchestrator::report::SimulationReport;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Supplier of real elapsed time between driver samples
pub trait RealTimeSource {
    /// Real time elapsed since the previous call (or since construction)
    fn elapsed(&mut self) -> Duration;
}

/// Real time from the monotonic wall clock
///
/// Only whole microseconds are consumed per sample; the remainder carries
/// over to the next one.
#[derive(Debug, Clone)]
pub struct WallClock {
    last_sample: Instant,
}

impl WallClock {
    pub fn new() -> Self {
        Self {
            last_sample: Instant::now(),
        }
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl RealTimeSource for WallClock {
    fn elapsed(&mut self) -> Duration {
        let micros = self.last_sample.elapsed().as_micros();
        let consumed = Duration::from_micros(u64::try_from(micros).unwrap_or(u64::MAX));
        self.last_sample += consumed;
        consumed
    }
}

/// Constant real-time step per sample, for reproducible runs
///
/// # Example
/// ```
/// use printer_queue_core::orchestrator::{FixedStepSource, RealTimeSource};
/// use std::time::Duration;
///
/// let mut source = FixedStepSource::new(Duration::from_millis(1));
/// assert_eq!(source.elapsed(), Duration::from_millis(1));
/// assert_eq!(source.samples(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct FixedStepSource {
    step: Duration,
    samples: usize,
}

impl FixedStepSource {
    /// # Panics
    /// Panics if `step` is zero, since the run would never end
    pub fn new(step: Duration) -> Self {
        assert!(!step.is_zero(), "step must be positive");
        Self { step, samples: 0 }
    }

    /// Number of samples taken so far
    pub fn samples(&self) -> usize {
        self.samples
    }
}

impl RealTimeSource for FixedStepSource {
    fn elapsed(&mut self) -> Duration {
        self.samples += 1;
        self.step
    }
}

/// Run the orchestrator until simulated time reaches its end, then report
///
/// The report is built once, after the last tick.
pub fn run<S: RealTimeSource>(
    orchestrator: &mut Orchestrator,
    source: &mut S,
    pause: Duration,
) -> Result<SimulationReport, SimulationError> {
    while !orchestrator.is_finished() {
        orchestrator.advance(source.elapsed())?;

        if !pause.is_zero() {
            thread::sleep(pause);
        }
    }

    let report = orchestrator.report();
    let pending = orchestrator.state().total_jobs_queued();
    if pending > 0 {
        warn!(
            pending_jobs = pending,
            pages_left = orchestrator.state().total_pages_remaining(),
            "simulation ended with unfinished jobs"
        );
    }
    info!(
        ticks = orchestrator.ticks_run(),
        jobs_created = report.jobs_created,
        jobs_completed = report.jobs_completed,
        "simulation finished at {}",
        report.ended_at
    );

    Ok(report)
}
