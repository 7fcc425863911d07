//! Dispatch Policy Module
//!
//! Decides which printer receives a newly created job.
//!
//! # Policy Interface
//!
//! All policies implement the `DispatchPolicy` trait:
//! ```rust
//! use printer_queue_core::policy::DispatchPolicy;
//! use printer_queue_core::Printer;
//!
//! struct AlwaysFirst;
//!
//! impl DispatchPolicy for AlwaysFirst {
//!     fn select_printer(&self, printers: &[Printer]) -> Option<usize> {
//!         if printers.is_empty() { None } else { Some(0) }
//!     }
//!
//!     fn name(&self) -> &'static str {
//!         "always_first"
//!     }
//! }
//! ```
//!
//! Available policies:
//! 1. **LeastLoaded**: idle printer first, otherwise fewest total remaining pages

use crate::models::Printer;

pub mod least_loaded;

pub use least_loaded::LeastLoadedPolicy;

/// Printer selection for newly created jobs
pub trait DispatchPolicy: Send + Sync {
    /// Index into `printers` of the printer that should receive the next job
    ///
    /// Returns `None` only for an empty pool. Called after every printer has
    /// been updated for the current tick, so loads reflect this tick's
    /// completions.
    fn select_printer(&self, printers: &[Printer]) -> Option<usize>;

    /// Short identifier used in logs
    fn name(&self) -> &'static str;
}
