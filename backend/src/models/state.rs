//! Simulation State
//!
//! Everything the tick loop mutates: the virtual clock, the printer pool and
//! the dispatcher. Owned by the orchestrator and passed around explicitly;
//! there is no process-wide state.
//!
//! # Critical Invariants
//!
//! 1. **Stable identity**: printer `i` sits at index `i` for the whole run
//! 2. **Single owner**: a job lives in exactly one printer queue once routed

use crate::core::time::SimClock;
use crate::models::printer::Printer;
use crate::orchestrator::dispatcher::Dispatcher;

/// Complete simulation state
///
/// # Example
///
/// ```rust
/// use printer_queue_core::arrivals::JobFactory;
/// use printer_queue_core::orchestrator::Dispatcher;
/// use printer_queue_core::policy::LeastLoadedPolicy;
/// use printer_queue_core::{SimClock, SimulationState};
///
/// let clock = SimClock::new(0, 300);
/// let dispatcher = Dispatcher::new(0, 30_000, JobFactory::default(), Box::new(LeastLoadedPolicy));
/// let state = SimulationState::new(clock, 4, 7, dispatcher);
///
/// assert_eq!(state.num_printers(), 4);
/// assert_eq!(state.printers()[2].id(), 2);
/// ```
#[derive(Debug)]
pub struct SimulationState {
    clock: SimClock,
    printers: Vec<Printer>,
    dispatcher: Dispatcher,
}

impl SimulationState {
    /// Create the state with `printer_count` idle printers numbered from 0
    pub fn new(
        clock: SimClock,
        printer_count: usize,
        sheets_per_minute: u32,
        dispatcher: Dispatcher,
    ) -> Self {
        let printers = (0..printer_count)
            .map(|id| Printer::new(id, sheets_per_minute))
            .collect();

        Self {
            clock,
            printers,
            dispatcher,
        }
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut SimClock {
        &mut self.clock
    }

    pub fn printers(&self) -> &[Printer] {
        &self.printers
    }

    pub fn printers_mut(&mut self) -> &mut [Printer] {
        &mut self.printers
    }

    pub fn num_printers(&self) -> usize {
        self.printers.len()
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Borrow the dispatcher and the pool together for routing
    pub fn dispatcher_and_printers_mut(&mut self) -> (&mut Dispatcher, &mut [Printer]) {
        (&mut self.dispatcher, &mut self.printers)
    }

    /// Total pages left across every printer
    pub fn total_pages_remaining(&self) -> u64 {
        self.printers
            .iter()
            .map(|p| u64::from(p.total_pages_remaining()))
            .sum()
    }

    /// Jobs waiting or printing across every printer
    pub fn total_jobs_queued(&self) -> usize {
        self.printers.iter().map(Printer::queue_len).sum()
    }
}
