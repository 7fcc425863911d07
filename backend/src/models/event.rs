//! Event logging for simulation replay and auditing.
//!
//! Every observable state change of the simulation is captured as an
//! [`Event`]. The orchestrator appends events to an [`EventLog`] in the order
//! they happen and forwards each one to the `tracing` sink.
//!
//! # Event Types
//!
//! - **JobCreated**: the dispatcher synthesized a new job
//! - **JobQueued**: a job was appended to a printer's queue
//! - **JobStarted**: a printer began printing its head job
//! - **JobCompleted**: a printer finished its head job
//!
//! # Example
//!
//! ```rust
//! use printer_queue_core::models::Event;
//!
//! let event = Event::JobQueued {
//!     time_ms: 30_000,
//!     printer_id: 2,
//!     job_id: 0,
//!     pages: 12,
//! };
//!
//! assert_eq!(event.to_string(), "00:00:30 Printer 2 added job to the queue Job 0 (12 Pages)");
//! ```

use crate::core::time::format_time_of_day;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Simulation event capturing a state change.
///
/// All events carry the simulated timestamp (ms since epoch) at which they
/// occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// Dispatcher synthesized a job
    JobCreated {
        time_ms: u64,
        job_id: usize,
        pages: u32,
    },

    /// Job appended to a printer queue
    JobQueued {
        time_ms: u64,
        printer_id: usize,
        job_id: usize,
        pages: u32,
    },

    /// Printer started printing its head job
    JobStarted {
        time_ms: u64,
        printer_id: usize,
        job_id: usize,
        pages: u32,
    },

    /// Printer finished its head job
    JobCompleted {
        time_ms: u64,
        printer_id: usize,
        job_id: usize,
        pages: u32,
    },
}

impl Event {
    /// Simulated time when this event occurred
    pub fn time_ms(&self) -> u64 {
        match self {
            Event::JobCreated { time_ms, .. } => *time_ms,
            Event::JobQueued { time_ms, .. } => *time_ms,
            Event::JobStarted { time_ms, .. } => *time_ms,
            Event::JobCompleted { time_ms, .. } => *time_ms,
        }
    }

    /// Short description of the event type
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::JobCreated { .. } => "JobCreated",
            Event::JobQueued { .. } => "JobQueued",
            Event::JobStarted { .. } => "JobStarted",
            Event::JobCompleted { .. } => "JobCompleted",
        }
    }

    pub fn job_id(&self) -> usize {
        match self {
            Event::JobCreated { job_id, .. } => *job_id,
            Event::JobQueued { job_id, .. } => *job_id,
            Event::JobStarted { job_id, .. } => *job_id,
            Event::JobCompleted { job_id, .. } => *job_id,
        }
    }

    /// Printer ID if the event relates to a specific printer
    pub fn printer_id(&self) -> Option<usize> {
        match self {
            Event::JobCreated { .. } => None,
            Event::JobQueued { printer_id, .. } => Some(*printer_id),
            Event::JobStarted { printer_id, .. } => Some(*printer_id),
            Event::JobCompleted { printer_id, .. } => Some(*printer_id),
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let time = format_time_of_day(self.time_ms());
        match self {
            Event::JobCreated { job_id, pages, .. } => {
                write!(f, "{} created Job {} ({} Pages)", time, job_id, pages)
            }
            Event::JobQueued {
                printer_id,
                job_id,
                pages,
                ..
            } => write!(
                f,
                "{} Printer {} added job to the queue Job {} ({} Pages)",
                time, printer_id, job_id, pages
            ),
            Event::JobStarted {
                printer_id,
                job_id,
                pages,
                ..
            } => write!(
                f,
                "{} Printer {} started printing Job {} ({} Pages)",
                time, printer_id, job_id, pages
            ),
            Event::JobCompleted {
                printer_id,
                job_id,
                pages,
                ..
            } => write!(
                f,
                "{} Printer {} finished printing Job {} ({} Pages)",
                time, printer_id, job_id, pages
            ),
        }
    }
}

/// Event log for storing and querying simulation events.
///
/// This is a simple wrapper around Vec<Event> with convenience methods.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    /// Create a new empty event log
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Add an event to the log
    pub fn log(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Get all events
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Get events of a specific type
    pub fn events_of_type(&self, event_type: &str) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }

    /// Get events for a specific job
    pub fn events_for_job(&self, job_id: usize) -> Vec<&Event> {
        self.events.iter().filter(|e| e.job_id() == job_id).collect()
    }

    /// Get events for a specific printer
    pub fn events_for_printer(&self, printer_id: usize) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.printer_id() == Some(printer_id))
            .collect()
    }

    /// Count events of a specific type
    pub fn count_of_type(&self, event_type: &str) -> usize {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .count()
    }
}
