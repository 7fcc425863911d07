//! Domain models for the printer queue simulator

pub mod event;
pub mod job;
pub mod printer;
pub mod state;

// Re-exports
pub use event::{Event, EventLog};
pub use job::Job;
pub use printer::{Printer, PrinterError};
pub use state::SimulationState;
