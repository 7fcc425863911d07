//! Orchestrator - main simulation loop
//!
//! Ties the clock, the printer pool and the dispatcher together.
//!
//! See `engine.rs` for the tick loop and `driver.rs` for the real-time loop.

pub mod dispatcher;
pub mod driver;
pub mod engine;
pub mod report;

// Re-export main types for convenience
pub use dispatcher::{Dispatch, Dispatcher};
pub use driver::{FixedStepSource, RealTimeSource, WallClock};
pub use engine::{Orchestrator, SimulationConfig, SimulationError, TickResult};
pub use report::{PrinterReport, RemainingJob, SimulationReport};
