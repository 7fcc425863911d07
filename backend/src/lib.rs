//! Printer Queue Simulator Core
//!
//! Discrete-time simulation of least-loaded print-job dispatch across a fixed
//! pool of printers, each with its own FIFO queue.
//!
//! # Architecture
//!
//! - **core**: Virtual clock and time formatting
//! - **models**: Domain types (Job, Printer, Event, SimulationState)
//! - **arrivals**: Job synthesis from the weighted page distribution
//! - **policy**: Printer selection for new jobs
//! - **orchestrator**: Tick loop, dispatcher, real-time driver and report
//! - **rng**: Deterministic random number generation
//!
//! # Critical Invariants
//!
//! 1. One tick per simulated second, on a fixed grid
//! 2. Printers update before dispatch within a tick
//! 3. All randomness is deterministic (seeded RNG)

// Module declarations
pub mod arrivals;
pub mod core;
pub mod models;
pub mod orchestrator;
pub mod policy;
pub mod rng;

// Re-exports for convenience
pub use arrivals::{JobFactory, PageBand, PageDistribution};
pub use crate::core::time::SimClock;
pub use models::{
    event::{Event, EventLog},
    job::Job,
    printer::{Printer, PrinterError},
    state::SimulationState,
};
pub use orchestrator::{
    Dispatcher, FixedStepSource, Orchestrator, PrinterReport, RealTimeSource, RemainingJob,
    SimulationConfig, SimulationError, SimulationReport, TickResult, WallClock,
};
pub use rng::RngManager;
