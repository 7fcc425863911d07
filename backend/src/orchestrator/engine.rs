//! Orchestrator Engine
//!
//! Main simulation loop integrating all components:
//! - Virtual clock (real time scaled into simulated time)
//! - Printer progress and completion
//! - Job creation and least-loaded dispatch
//! - Event logging (complete simulation history)
//!
//! # Architecture
//!
//! ```text
//! For each sample of real time:
//! 1. Advance the clock by elapsed × speed
//! 2. If a simulated second has passed, run one tick:
//!    a. Update every printer, in index order
//!    b. Let the dispatcher create and route at most one job
//!    c. Log events
//! ```
//!
//! Printers are always updated before dispatch, so a job created in a tick
//! sees the loads left by that tick's completions.
//!
//! # Example
//!
//! ```rust
//! use printer_queue_core::orchestrator::{Orchestrator, SimulationConfig};
//! use std::time::Duration;
//!
//! let config = SimulationConfig {
//!     printer_count: 2,
//!     speed_multiplier: 1_000,
//!     rng_seed: Some(12345),
//!     start_time_ms: Some(0),
//!     ..Default::default()
//! };
//!
//! let mut orchestrator = Orchestrator::new(config, 0).unwrap();
//!
//! // At this speed 1ms of real time is one simulated second
//! for _ in 0..60 {
//!     orchestrator.advance(Duration::from_millis(1)).unwrap();
//! }
//! assert_eq!(orchestrator.state().dispatcher().jobs_created(), 2);
//! ```

use crate::arrivals::JobFactory;
use crate::core::time::{SimClock, MAX_SIMULATED_MS, MILLISECONDS_PER_SECOND};
use crate::models::event::{Event, EventLog};
use crate::models::printer::{PrinterError, DEFAULT_SHEETS_PER_MINUTE};
use crate::models::state::SimulationState;
use crate::orchestrator::dispatcher::Dispatcher;
use crate::orchestrator::driver::{self, RealTimeSource};
use crate::orchestrator::report::SimulationReport;
use crate::policy::{DispatchPolicy, LeastLoadedPolicy};
use crate::rng::RngManager;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

// ============================================================================
// Configuration Types
// ============================================================================

/// Complete simulation configuration
///
/// Every field has a default, so a partial TOML file or an empty table
/// deserializes into a runnable configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Number of printers in the pool
    pub printer_count: usize,

    /// Simulated seconds per real second
    pub speed_multiplier: u32,

    /// Simulated run length in seconds
    pub duration_secs: u64,

    /// Simulated seconds between job arrivals
    pub job_interval_secs: u64,

    /// Print rate of every printer
    pub sheets_per_minute: u32,

    /// RNG seed; `None` seeds from the start timestamp
    pub rng_seed: Option<u64>,

    /// Simulated start time (ms since epoch); `None` uses the wall clock
    pub start_time_ms: Option<u64>,

    /// Real-time pause between driver iterations (0 disables sleeping)
    pub poll_interval_ms: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            printer_count: 4,
            speed_multiplier: 300,
            duration_secs: 30 * 60,
            job_interval_secs: 30,
            sheets_per_minute: DEFAULT_SHEETS_PER_MINUTE,
            rng_seed: None,
            start_time_ms: None,
            poll_interval_ms: 1,
        }
    }
}

impl SimulationConfig {
    /// Check every field the simulation cannot run without
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.printer_count == 0 {
            return Err(SimulationError::InvalidConfiguration(
                "printer_count must be > 0".to_string(),
            ));
        }

        if self.speed_multiplier == 0 {
            return Err(SimulationError::InvalidConfiguration(
                "speed_multiplier must be > 0".to_string(),
            ));
        }

        if self.job_interval_secs == 0 {
            return Err(SimulationError::InvalidConfiguration(
                "job_interval_secs must be > 0".to_string(),
            ));
        }

        if self.sheets_per_minute == 0 || self.sheets_per_minute > 60_000 {
            return Err(SimulationError::InvalidConfiguration(
                "sheets_per_minute must be in 1..=60000".to_string(),
            ));
        }

        if self.duration_ms().is_none() || self.job_interval_ms().is_none() {
            return Err(SimulationError::InvalidConfiguration(
                "durations overflow the millisecond clock".to_string(),
            ));
        }

        if let Some(start_ms) = self.start_time_ms {
            self.end_ms(start_ms)?;
        }

        Ok(())
    }

    /// Simulated end time for a run starting at `start_ms`
    ///
    /// Fails when the end lies beyond what the clock can reach.
    pub fn end_ms(&self, start_ms: u64) -> Result<u64, SimulationError> {
        self.duration_ms()
            .and_then(|duration| start_ms.checked_add(duration))
            .filter(|end| *end <= MAX_SIMULATED_MS)
            .ok_or_else(|| {
                SimulationError::InvalidConfiguration(format!(
                    "run starting at {} ms ends past the clock limit of {} ms",
                    start_ms, MAX_SIMULATED_MS
                ))
            })
    }

    pub fn duration_ms(&self) -> Option<u64> {
        self.duration_secs.checked_mul(MILLISECONDS_PER_SECOND)
    }

    pub fn job_interval_ms(&self) -> Option<u64> {
        self.job_interval_secs.checked_mul(MILLISECONDS_PER_SECOND)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Simulation error types
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    /// Configuration validation error, raised before the run starts
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Internal accounting broke; the run cannot continue
    #[error("Internal invariant violation: {0}")]
    InternalInvariantViolation(String),
}

impl From<PrinterError> for SimulationError {
    fn from(err: PrinterError) -> Self {
        SimulationError::InternalInvariantViolation(err.to_string())
    }
}

// ============================================================================
// Orchestrator
// ============================================================================

/// Result of a single tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickResult {
    /// Simulated time the tick ran at
    pub time_ms: u64,

    /// Jobs completed this tick
    pub num_completions: usize,

    /// Printer that received a new job this tick, if any
    pub routed_to: Option<usize>,
}

/// Main orchestrator managing simulation state and tick loop
///
/// # Determinism
///
/// Job sizes come from `rng_manager` with seeded xorshift64*. Ticks driven
/// through [`Orchestrator::step`] or a fixed-step real-time source replay
/// identically for the same seed.
pub struct Orchestrator {
    state: SimulationState,

    rng_manager: RngManager,

    event_log: EventLog,

    /// Seed the RNG was created with
    seed: u64,

    /// Simulated time at which the run ends
    end_ms: u64,

    poll_interval: Duration,

    ticks_run: usize,

    jobs_completed: usize,
}

impl Orchestrator {
    /// Create new orchestrator from configuration
    ///
    /// `start_ms` is the simulated start time used when the config leaves
    /// `start_time_ms` unset.
    ///
    /// # Returns
    ///
    /// * `Ok(Orchestrator)` - Successfully initialized orchestrator
    /// * `Err(SimulationError)` - Configuration validation failed
    pub fn new(config: SimulationConfig, start_ms: u64) -> Result<Self, SimulationError> {
        Self::with_components(
            config,
            start_ms,
            JobFactory::default(),
            Box::new(LeastLoadedPolicy),
        )
    }

    /// Create an orchestrator with a custom job factory and dispatch policy
    pub fn with_components(
        config: SimulationConfig,
        start_ms: u64,
        factory: JobFactory,
        policy: Box<dyn DispatchPolicy>,
    ) -> Result<Self, SimulationError> {
        config.validate()?;

        let start_ms = config.start_time_ms.unwrap_or(start_ms);
        let end_ms = config.end_ms(start_ms)?;
        let interval_ms = config.job_interval_ms().unwrap_or(u64::MAX);
        let seed = config.rng_seed.unwrap_or(start_ms);

        let clock = SimClock::new(start_ms, config.speed_multiplier);
        let dispatcher = Dispatcher::new(start_ms, interval_ms, factory, policy);
        let state = SimulationState::new(
            clock,
            config.printer_count,
            config.sheets_per_minute,
            dispatcher,
        );

        info!(
            printers = config.printer_count,
            speed = config.speed_multiplier,
            duration_secs = config.duration_secs,
            seed,
            policy = state.dispatcher().policy_name(),
            "simulation initialized"
        );

        Ok(Self {
            state,
            rng_manager: RngManager::new(seed),
            event_log: EventLog::new(),
            seed,
            end_ms,
            poll_interval: config.poll_interval(),
            ticks_run: 0,
            jobs_completed: 0,
        })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Current simulated time (ms since epoch)
    pub fn current_time_ms(&self) -> u64 {
        self.state.clock().simulated_ms()
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn event_log(&self) -> &EventLog {
        &self.event_log
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Simulated time at which the run ends
    pub fn end_ms(&self) -> u64 {
        self.end_ms
    }

    pub fn ticks_run(&self) -> usize {
        self.ticks_run
    }

    pub fn jobs_completed(&self) -> usize {
        self.jobs_completed
    }

    /// True once simulated time has reached the configured duration
    pub fn is_finished(&self) -> bool {
        self.current_time_ms() >= self.end_ms
    }

    // ========================================================================
    // Event Logging
    // ========================================================================

    fn log_event(&mut self, event: Event) {
        info!(target: "printer_queue::events", "{}", event);
        self.event_log.log(event);
    }

    // ========================================================================
    // Tick Loop Implementation
    // ========================================================================

    /// Advance the clock by a real-time delta and tick if a second is due
    ///
    /// Returns the tick result when a tick ran.
    pub fn advance(&mut self, real_elapsed: Duration) -> Result<Option<TickResult>, SimulationError> {
        let clock = self.state.clock_mut();
        clock.advance(real_elapsed);
        if clock.should_tick() {
            self.step().map(Some)
        } else {
            Ok(None)
        }
    }

    /// Execute one simulation tick at the current simulated time
    ///
    /// 1. Update every printer in index order (completions, next starts)
    /// 2. Let the dispatcher create and route a job if one is due
    pub fn step(&mut self) -> Result<TickResult, SimulationError> {
        let now = self.current_time_ms();
        let mut events = Vec::new();
        let mut num_completions = 0;

        // STEP 1: PRINTER UPDATES
        for printer in self.state.printers_mut() {
            let printer_events = printer.update(now)?;
            num_completions += printer_events
                .iter()
                .filter(|e| matches!(e, Event::JobCompleted { .. }))
                .count();
            events.extend(printer_events);
        }

        // STEP 2: DISPATCH
        let (dispatcher, printers) = self.state.dispatcher_and_printers_mut();
        let dispatch = dispatcher.tick(now, printers, &mut self.rng_manager)?;
        let routed_to = dispatch.as_ref().map(|d| d.printer_index);
        if let Some(dispatch) = dispatch {
            events.extend(dispatch.events);
        }

        // STEP 3: LOG EVENTS
        for event in events {
            self.log_event(event);
        }

        self.ticks_run += 1;
        self.jobs_completed += num_completions;
        debug!(
            tick = self.ticks_run,
            time_ms = now,
            completions = num_completions,
            routed_to = ?routed_to,
            "tick complete"
        );

        Ok(TickResult {
            time_ms: now,
            num_completions,
            routed_to,
        })
    }

    /// Run the driver loop to the configured duration and report
    ///
    /// Sleeps `poll_interval_ms` of real time between samples.
    pub fn run<S: RealTimeSource>(
        &mut self,
        source: &mut S,
    ) -> Result<SimulationReport, SimulationError> {
        let pause = self.poll_interval;
        driver::run(self, source, pause)
    }

    /// Snapshot of the final state; printer queues are left untouched
    pub fn report(&self) -> SimulationReport {
        SimulationReport::from_state(
            &self.state,
            self.state.dispatcher().jobs_created(),
            self.jobs_completed,
        )
    }
}
